// src/db/talent_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::talent::{Talent, TalentStatus},
};

const TALENT_COLUMNS: &str = r#"
    id, name, category, status, avatar_url, bio, notes,
    instagram_handle, followers, tiktok_handle, tiktok_followers,
    engagement_rate, last_stats_update, created_at, updated_at
"#;

#[derive(Clone)]
pub struct TalentRepository {
    pool: PgPool,
}

impl TalentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lista o roster inteiro, ordenado por nome
    pub async fn list(&self) -> Result<Vec<Talent>, AppError> {
        let talents = sqlx::query_as::<_, Talent>(&format!(
            "SELECT {TALENT_COLUMNS} FROM talents ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(talents)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Talent>, AppError> {
        let talent = sqlx::query_as::<_, Talent>(&format!(
            "SELECT {TALENT_COLUMNS} FROM talents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(talent)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        category: Option<&str>,
        status: TalentStatus,
        bio: Option<&str>,
        notes: Option<&str>,
        instagram_handle: Option<&str>,
        tiktok_handle: Option<&str>,
    ) -> Result<Talent, AppError> {
        let talent = sqlx::query_as::<_, Talent>(&format!(
            r#"
            INSERT INTO talents (name, category, status, bio, notes, instagram_handle, tiktok_handle)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TALENT_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(category)
        .bind(status)
        .bind(bio)
        .bind(notes)
        .bind(instagram_handle)
        .bind(tiktok_handle)
        .fetch_one(&self.pool)
        .await?;
        Ok(talent)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        category: Option<&str>,
        status: TalentStatus,
        bio: Option<&str>,
        notes: Option<&str>,
        instagram_handle: Option<&str>,
        tiktok_handle: Option<&str>,
    ) -> Result<Talent, AppError> {
        let talent = sqlx::query_as::<_, Talent>(&format!(
            r#"
            UPDATE talents
            SET name = $2, category = $3, status = $4, bio = $5, notes = $6,
                instagram_handle = $7, tiktok_handle = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {TALENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(category)
        .bind(status)
        .bind(bio)
        .bind(notes)
        .bind(instagram_handle)
        .bind(tiktok_handle)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Talento não encontrado.".to_string()))?;
        Ok(talent)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM talents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Talento não encontrado.".to_string()));
        }
        Ok(())
    }

    pub async fn update_avatar_url(&self, id: Uuid, avatar_url: &str) -> Result<Talent, AppError> {
        let talent = sqlx::query_as::<_, Talent>(&format!(
            r#"
            UPDATE talents SET avatar_url = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {TALENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(avatar_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Talento não encontrado.".to_string()))?;
        Ok(talent)
    }

    /// Só carimba o horário da última atualização de estatísticas
    pub async fn touch_stats_update(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE talents SET last_stats_update = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Persiste o snapshot legado de estatísticas do Instagram no próprio talento:
    /// rótulo formatado de seguidores, taxa de engajamento e carimbo de atualização.
    pub async fn update_legacy_stats(
        &self,
        id: Uuid,
        followers_label: &str,
        engagement_rate: Option<f64>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE talents
            SET followers = $2,
                engagement_rate = COALESCE($3, engagement_rate),
                last_stats_update = NOW(),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(followers_label)
        .bind(engagement_rate)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Idem para o shape legado do TikTok: só o rótulo formatado de seguidores
    pub async fn update_legacy_tiktok_stats(
        &self,
        id: Uuid,
        followers_label: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE talents
            SET tiktok_followers = $2, last_stats_update = NOW(), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(followers_label)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
