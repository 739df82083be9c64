// src/handlers/dashboard.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::revenue::{
        ClientRevenue, Deal, MonthlyRevenue, Quote, QuotePipeline, RevenueGroup, RevenueSummary,
        TalentRevenue,
    },
};

// As janelas de calendário usam a data local de agora; a agregação em si é
// pura e fica no revenue_service.

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo de receita com janelas de mês e trimestre", body = RevenueSummary),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let today = Local::now().date_naive();
    let summary = app_state.revenue_service.summary(today).await?;
    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/revenue-by-talent
#[utoipa::path(
    get,
    path = "/api/dashboard/revenue-by-talent",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Receita agregada por talento, maior primeiro", body = Vec<TalentRevenue>)
    ),
    security(("api_jwt" = []))
)]
pub async fn revenue_by_talent(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.revenue_service.revenue_by_talent().await?;
    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/dashboard/revenue-by-client
#[utoipa::path(
    get,
    path = "/api/dashboard/revenue-by-client",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Receita agregada por cliente, maior primeiro", body = Vec<ClientRevenue>)
    ),
    security(("api_jwt" = []))
)]
pub async fn revenue_by_client(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.revenue_service.revenue_by_client().await?;
    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/dashboard/revenue-over-time
#[utoipa::path(
    get,
    path = "/api/dashboard/revenue-over-time",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Série dos últimos 12 meses, sem buracos", body = Vec<MonthlyRevenue>)
    ),
    security(("api_jwt" = []))
)]
pub async fn revenue_over_time(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let today = Local::now().date_naive();
    let series = app_state.revenue_service.revenue_over_time(today).await?;
    Ok((StatusCode::OK, Json(series)))
}

// GET /api/talents/{id}/revenue — estatísticas de receita de um talento só
#[utoipa::path(
    get,
    path = "/api/talents/{id}/revenue",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Receita agregada do talento (zerada se não há deals)", body = RevenueGroup)
    ),
    params(("id" = Uuid, Path, description = "ID do talento")),
    security(("api_jwt" = []))
)]
pub async fn talent_revenue(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.revenue_service.talent_stats(id).await?;
    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/dashboard/quote-pipeline
#[utoipa::path(
    get,
    path = "/api/dashboard/quote-pipeline",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Baldes por status + taxa de conversão", body = QuotePipeline)
    ),
    security(("api_jwt" = []))
)]
pub async fn quote_pipeline(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let pipeline = app_state.revenue_service.quote_pipeline().await?;
    Ok((StatusCode::OK, Json(pipeline)))
}

// GET /api/deals — linhas cruas, somente leitura
#[utoipa::path(
    get,
    path = "/api/deals",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Todos os deals, mais recente primeiro", body = Vec<Deal>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_deals(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let deals = app_state.revenue_service.list_deals().await?;
    Ok((StatusCode::OK, Json(deals)))
}

// GET /api/quotes
#[utoipa::path(
    get,
    path = "/api/quotes",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Todos os orçamentos", body = Vec<Quote>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_quotes(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let quotes = app_state.revenue_service.list_quotes().await?;
    Ok((StatusCode::OK, Json(quotes)))
}
