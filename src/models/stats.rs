// src/models/stats.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- CONTRATO DO PROXY DE SCRAPING ---

// POST { "usernames": [...] }
#[derive(Debug, Serialize)]
pub struct ScrapeRequest {
    pub usernames: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedProfile {
    pub username: String,
    pub followers_count: Option<i64>,
    pub engagement_rate: Option<f64>,
    pub profile_url: Option<String>,

    // Falha por item dentro de um lote que deu certo
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScraperResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<ScrapedProfile>,
    pub error: Option<String>,
}

// --- RELATÓRIO DO REFRESH EM LOTE (melhor esforço, nunca atômico) ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailedHandle {
    pub talent_id: Uuid,
    pub handle: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub refreshed: i64,
    pub failed: Vec<FailedHandle>,
}
