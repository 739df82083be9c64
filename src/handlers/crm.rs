// src/handlers/crm.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        client::Client,
        taxonomy::{Category, Platform},
    },
};

// =============================================================================
//  CLIENTES (as marcas que compram campanhas)
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ana Lima")]
    pub name: String,

    #[schema(example = "Acme Bebidas")]
    pub company: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "CRM",
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Client>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.crm_service.list_clients().await?;
    Ok((StatusCode::OK, Json(clients)))
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "CRM",
    request_body = ClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<ClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .crm_service
        .create_client(
            &payload.name,
            payload.company.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(client)))
}

// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "CRM",
    request_body = ClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do cliente")),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .crm_service
        .update_client(
            id,
            &payload.name,
            payload.company.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;
    Ok((StatusCode::OK, Json(client)))
}

// DELETE /api/clients/{id}
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "CRM",
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do cliente")),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_service.delete_client(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  TAXONOMIAS
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
pub struct TaxonomyQuery {
    // ?active=true filtra para só os ativos
    #[serde(default)]
    pub active: bool,
}

// GET /api/platforms
#[utoipa::path(
    get,
    path = "/api/platforms",
    tag = "CRM",
    params(TaxonomyQuery),
    responses(
        (status = 200, description = "Plataformas, na ordem de exibição", body = Vec<Platform>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_platforms(
    State(app_state): State<AppState>,
    Query(query): Query<TaxonomyQuery>,
) -> Result<impl IntoResponse, AppError> {
    let platforms = app_state.crm_service.list_platforms(query.active).await?;
    Ok((StatusCode::OK, Json(platforms)))
}

// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "CRM",
    params(TaxonomyQuery),
    responses(
        (status = 200, description = "Categorias, na ordem de exibição", body = Vec<Category>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    Query(query): Query<TaxonomyQuery>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.crm_service.list_categories(query.active).await?;
    Ok((StatusCode::OK, Json(categories)))
}

// GET /api/categories/by-talent
#[utoipa::path(
    get,
    path = "/api/categories/by-talent",
    tag = "CRM",
    responses(
        (status = 200, description = "Mapa talento -> ids de categoria")
    ),
    security(("api_jwt" = []))
)]
pub async fn categories_by_talent(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let lookup = app_state.crm_service.categories_by_talent().await?;
    Ok((StatusCode::OK, Json(lookup)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetTalentCategoriesPayload {
    pub category_ids: Vec<Uuid>,
}

// PUT /api/talents/{id}/categories — substitui o conjunto por inteiro
#[utoipa::path(
    put,
    path = "/api/talents/{id}/categories",
    tag = "CRM",
    request_body = SetTalentCategoriesPayload,
    responses(
        (status = 204, description = "Categorias do talento substituídas")
    ),
    params(("id" = Uuid, Path, description = "ID do talento")),
    security(("api_jwt" = []))
)]
pub async fn set_talent_categories(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetTalentCategoriesPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .crm_service
        .set_talent_categories(id, &payload.category_ids)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
