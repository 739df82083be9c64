// src/models/catalog.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::social::SocialPlatform;

// --- CATÁLOGO (Entregáveis vendáveis) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
    pub id: Uuid,
    pub platform: SocialPlatform,
    pub name: String,
    pub category: Option<String>,
    pub display_order: i32,
    pub is_addon: bool,
    pub addon_type: Option<String>,
}

// Regra de quais add-ons podem acompanhar um entregável base
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddonRule {
    pub base_deliverable_id: Uuid,
    pub addon_deliverable_id: Uuid,
}

// --- RATE CARD ---

// Linha do rate card: o preço já juntado ao seu entregável.
// Em centavos; linhas com valor <= 0 nunca existem no banco.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateCardEntry {
    pub talent_id: Uuid,
    pub deliverable_id: Uuid,
    pub base_rate: i64,

    pub name: String,
    pub platform: SocialPlatform,
    pub category: Option<String>,
    pub display_order: i32,
    pub is_addon: bool,
    pub addon_type: Option<String>,
}

// O rate card completo de um talento: lista canônica + visões derivadas.
// As visões são recalculadas da lista plana e nunca divergem dela.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateCard {
    pub talent_id: Uuid,
    pub entries: Vec<RateCardEntry>,
    pub main: Vec<RateCardEntry>,
    pub addons: Vec<RateCardEntry>,
    pub by_category: BTreeMap<String, Vec<RateCardEntry>>,
}
