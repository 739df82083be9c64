// src/db/catalog_repo.rs

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{AddonRule, Deliverable, RateCardEntry},
};

// SELECT do rate card: o preço já juntado ao entregável, só linhas com valor
// positivo, na ordem de exibição do catálogo.
const RATE_CARD_SELECT: &str = r#"
    SELECT
        r.talent_id, r.deliverable_id, r.base_rate,
        d.name, d.platform, d.category, d.display_order, d.is_addon, d.addon_type
    FROM talent_rates r
    JOIN deliverables d ON d.id = r.deliverable_id
    WHERE r.base_rate > 0
"#;

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CATÁLOGO (Entregáveis e regras de add-on)
    // =========================================================================

    pub async fn list_deliverables(&self) -> Result<Vec<Deliverable>, AppError> {
        let deliverables = sqlx::query_as::<_, Deliverable>(
            "SELECT * FROM deliverables ORDER BY display_order ASC, name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(deliverables)
    }

    pub async fn list_addon_rules(&self) -> Result<Vec<AddonRule>, AppError> {
        let rules = sqlx::query_as::<_, AddonRule>(
            "SELECT base_deliverable_id, addon_deliverable_id FROM deliverable_addon_rules",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rules)
    }

    // =========================================================================
    //  RATE CARDS
    // =========================================================================

    /// Linhas do rate card de um talento (base_rate > 0, ordenado pelo catálogo)
    pub async fn list_rate_card_entries(
        &self,
        talent_id: Uuid,
    ) -> Result<Vec<RateCardEntry>, AppError> {
        let entries = sqlx::query_as::<_, RateCardEntry>(&format!(
            "{RATE_CARD_SELECT} AND r.talent_id = $1 ORDER BY d.display_order ASC"
        ))
        .bind(talent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    /// Variante em massa: linhas de todos os talentos numa única query
    pub async fn list_all_rate_card_entries(&self) -> Result<Vec<RateCardEntry>, AppError> {
        let entries = sqlx::query_as::<_, RateCardEntry>(&format!(
            "{RATE_CARD_SELECT} ORDER BY r.talent_id, d.display_order ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    /// Aplica um plano de reconciliação do rate card numa transação só.
    /// O upsert usa a chave composta (talent_id, deliverable_id); aplicar o
    /// mesmo plano duas vezes produz o mesmo conjunto persistido.
    pub async fn apply_rate_plan(
        &self,
        talent_id: Uuid,
        upserts: &[(Uuid, i64)],
        deletes: &[Uuid],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for &(deliverable_id, cents) in upserts {
            sqlx::query(
                r#"
                INSERT INTO talent_rates (talent_id, deliverable_id, base_rate)
                VALUES ($1, $2, $3)
                ON CONFLICT (talent_id, deliverable_id)
                DO UPDATE SET base_rate = EXCLUDED.base_rate, updated_at = NOW()
                "#,
            )
            .bind(talent_id)
            .bind(deliverable_id)
            .bind(cents)
            .execute(&mut *tx)
            .await?;
        }

        // Valor zero/negativo significa "não oferece": a linha não pode existir
        for &deliverable_id in deletes {
            sqlx::query("DELETE FROM talent_rates WHERE talent_id = $1 AND deliverable_id = $2")
                .bind(talent_id)
                .bind(deliverable_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
