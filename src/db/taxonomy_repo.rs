// src/db/taxonomy_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::taxonomy::{Category, Platform, TalentCategory},
};

#[derive(Clone)]
pub struct TaxonomyRepository {
    pool: PgPool,
}

impl TaxonomyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_platforms(&self, only_active: bool) -> Result<Vec<Platform>, AppError> {
        let platforms = sqlx::query_as::<_, Platform>(
            r#"
            SELECT * FROM platforms
            WHERE ($1 = FALSE OR is_active = TRUE)
            ORDER BY display_order ASC, name ASC
            "#,
        )
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;
        Ok(platforms)
    }

    pub async fn list_categories(&self, only_active: bool) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
            WHERE ($1 = FALSE OR is_active = TRUE)
            ORDER BY display_order ASC, name ASC
            "#,
        )
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    /// Toda a tabela de junção, numa query só (o lookup é montado no serviço)
    pub async fn list_talent_categories(&self) -> Result<Vec<TalentCategory>, AppError> {
        let rows = sqlx::query_as::<_, TalentCategory>(
            "SELECT talent_id, category_id FROM talent_categories",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Substitui por inteiro as categorias de um talento (rebuild, não patch)
    pub async fn set_talent_categories(
        &self,
        talent_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM talent_categories WHERE talent_id = $1")
            .bind(talent_id)
            .execute(&mut *tx)
            .await?;

        for &category_id in category_ids {
            sqlx::query(
                r#"
                INSERT INTO talent_categories (talent_id, category_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(talent_id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
