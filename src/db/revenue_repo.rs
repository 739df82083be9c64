// src/db/revenue_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::revenue::{Deal, Quote},
};

// Deals e quotes são somente leitura nesta API: o repositório só busca as
// linhas cruas; toda a agregação acontece em memória no revenue_service.
#[derive(Clone)]
pub struct RevenueRepository {
    pool: PgPool,
}

impl RevenueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_deals(&self) -> Result<Vec<Deal>, AppError> {
        let deals = sqlx::query_as::<_, Deal>("SELECT * FROM deals ORDER BY deal_date DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(deals)
    }

    pub async fn list_quotes(&self) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>("SELECT * FROM quotes ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(quotes)
    }
}
