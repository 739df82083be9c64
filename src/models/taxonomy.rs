// src/models/taxonomy.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Taxonomias administradas: plataformas e categorias de talento.
// Ambas têm o mesmo formato (slug + ordem de exibição + ativo).

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub display_order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub display_order: i32,
    pub is_active: bool,
}

// Linha da tabela de junção talento <-> categoria
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TalentCategory {
    pub talent_id: Uuid,
    pub category_id: Uuid,
}
