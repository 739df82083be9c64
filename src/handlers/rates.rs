// src/handlers/rates.rs

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::{Deliverable, RateCard},
};

// GET /api/deliverables
#[utoipa::path(
    get,
    path = "/api/deliverables",
    tag = "Rates",
    responses(
        (status = 200, description = "Catálogo de entregáveis", body = Vec<Deliverable>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_deliverables(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let deliverables = app_state.rate_card_service.list_deliverables().await?;
    Ok((StatusCode::OK, Json(deliverables)))
}

// GET /api/deliverables/addon-rules
#[utoipa::path(
    get,
    path = "/api/deliverables/addon-rules",
    tag = "Rates",
    responses(
        (status = 200, description = "Mapa entregável base -> add-ons permitidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn addon_rules(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rules = app_state.rate_card_service.addon_rules().await?;
    Ok((StatusCode::OK, Json(rules)))
}

// GET /api/talents/{id}/rates
#[utoipa::path(
    get,
    path = "/api/talents/{id}/rates",
    tag = "Rates",
    responses(
        (status = 200, description = "Rate card do talento", body = RateCard)
    ),
    params(("id" = Uuid, Path, description = "ID do talento")),
    security(("api_jwt" = []))
)]
pub async fn get_rate_card(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let card = app_state.rate_card_service.rate_card(id).await?;
    Ok((StatusCode::OK, Json(card)))
}

// PUT /api/talents/{id}/rates — o corpo é o próprio mapa entregável -> centavos.
// Valor <= 0 remove a linha; a operação é idempotente.
#[utoipa::path(
    put,
    path = "/api/talents/{id}/rates",
    tag = "Rates",
    request_body = HashMap<String, i64>,
    responses(
        (status = 200, description = "Rate card reconciliado e remontado", body = RateCard)
    ),
    params(("id" = Uuid, Path, description = "ID do talento")),
    security(("api_jwt" = []))
)]
pub async fn save_rates(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(rates): Json<HashMap<Uuid, i64>>,
) -> Result<impl IntoResponse, AppError> {
    let card = app_state.rate_card_service.save_rates(id, &rates).await?;
    Ok((StatusCode::OK, Json(card)))
}

// GET /api/rates/by-talent — lookup em massa talento -> entregável -> centavos
#[utoipa::path(
    get,
    path = "/api/rates/by-talent",
    tag = "Rates",
    responses(
        (status = 200, description = "Lookup aninhado de preços de todos os talentos")
    ),
    security(("api_jwt" = []))
)]
pub async fn rates_by_talent(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let lookup = app_state.rate_card_service.rates_by_talent().await?;
    Ok((StatusCode::OK, Json(lookup)))
}
