// src/handlers/stats.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{social::SocialPlatform, stats::RefreshReport},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct PlatformQuery {
    // Plataforma a raspar; o padrão é instagram
    pub platform: Option<SocialPlatform>,
}

// POST /api/stats/talents/{id}/refresh
#[utoipa::path(
    post,
    path = "/api/stats/talents/{id}/refresh",
    tag = "Stats",
    params(
        ("id" = Uuid, Path, description = "ID do talento"),
        PlatformQuery
    ),
    responses(
        (status = 200, description = "Seguidores atualizados", body = RefreshReport),
        (status = 404, description = "Talento sem handle para a plataforma"),
        (status = 502, description = "Scraper indisponível ou handle com erro")
    ),
    security(("api_jwt" = []))
)]
pub async fn refresh_talent(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PlatformQuery>,
) -> Result<impl IntoResponse, AppError> {
    let platform = query.platform.unwrap_or(SocialPlatform::Instagram);
    let report = app_state.stats_service.refresh_one(id, platform).await?;
    Ok((StatusCode::OK, Json(report)))
}

// POST /api/stats/refresh-all — lote de melhor esforço: aplica o que deu
// certo e devolve os handles que falharam, item a item
#[utoipa::path(
    post,
    path = "/api/stats/refresh-all",
    tag = "Stats",
    params(PlatformQuery),
    responses(
        (status = 200, description = "Relatório do lote (sucessos e falhas)", body = RefreshReport),
        (status = 502, description = "O lote inteiro falhou no scraper")
    ),
    security(("api_jwt" = []))
)]
pub async fn refresh_all(
    State(app_state): State<AppState>,
    Query(query): Query<PlatformQuery>,
) -> Result<impl IntoResponse, AppError> {
    let platform = query.platform.unwrap_or(SocialPlatform::Instagram);
    let report = app_state.stats_service.refresh_all(platform).await?;
    Ok((StatusCode::OK, Json(report)))
}
