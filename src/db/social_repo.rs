// src/db/social_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::social::{SocialAccount, SocialPlatform},
};

#[derive(Clone)]
pub struct SocialRepository {
    pool: PgPool,
}

impl SocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todas as contas de todos os talentos, numa única query (evita N+1 no roster)
    pub async fn list_all(&self) -> Result<Vec<SocialAccount>, AppError> {
        let accounts = sqlx::query_as::<_, SocialAccount>(
            "SELECT * FROM talent_social_accounts ORDER BY talent_id, platform",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    pub async fn list_by_talent(&self, talent_id: Uuid) -> Result<Vec<SocialAccount>, AppError> {
        let accounts = sqlx::query_as::<_, SocialAccount>(
            "SELECT * FROM talent_social_accounts WHERE talent_id = $1 ORDER BY platform",
        )
        .bind(talent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    /// Primeira conta de um talento numa plataforma específica (para o refresh de stats)
    pub async fn find_by_talent_and_platform(
        &self,
        talent_id: Uuid,
        platform: SocialPlatform,
    ) -> Result<Option<SocialAccount>, AppError> {
        let account = sqlx::query_as::<_, SocialAccount>(
            "SELECT * FROM talent_social_accounts WHERE talent_id = $1 AND platform = $2 LIMIT 1",
        )
        .bind(talent_id)
        .bind(platform)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    pub async fn create(
        &self,
        talent_id: Uuid,
        platform: SocialPlatform,
        handle: &str,
        follower_count: Option<i64>,
    ) -> Result<SocialAccount, AppError> {
        sqlx::query_as::<_, SocialAccount>(
            r#"
            INSERT INTO talent_social_accounts (talent_id, platform, handle, follower_count)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(talent_id)
        .bind(platform)
        .bind(handle)
        .bind(follower_count)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "A conta '{}' já está cadastrada para este talento.",
                        handle
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        platform: SocialPlatform,
        handle: &str,
        follower_count: Option<i64>,
    ) -> Result<SocialAccount, AppError> {
        let account = sqlx::query_as::<_, SocialAccount>(
            r#"
            UPDATE talent_social_accounts
            SET platform = $2, handle = $3, follower_count = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(platform)
        .bind(handle)
        .bind(follower_count)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Conta social não encontrada.".to_string()))?;
        Ok(account)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM talent_social_accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Conta social não encontrada.".to_string()));
        }
        Ok(())
    }

    /// Grava a contagem de seguidores vinda do scraper e carimba a sincronização
    pub async fn update_follower_count(
        &self,
        id: Uuid,
        follower_count: i64,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE talent_social_accounts
            SET follower_count = $2, last_synced_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(follower_count)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
