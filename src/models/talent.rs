// src/models/talent.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

// Mapeia o CREATE TYPE talent_status do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "talent_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TalentStatus {
    Active,
    OnHold,
    Inactive,
}

// --- TALENTO (O perfil do roster) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Talent {
    pub id: Uuid,

    pub name: String,
    pub category: Option<String>,
    pub status: TalentStatus,

    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub notes: Option<String>,

    // Campos legados de plataforma única, mantidos pela importação original.
    // `followers` é o rótulo formatado ("12.5K"), não o número bruto.
    pub instagram_handle: Option<String>,
    pub followers: Option<String>,
    pub tiktok_handle: Option<String>,
    pub tiktok_followers: Option<String>,
    pub engagement_rate: Option<f64>,
    pub last_stats_update: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
