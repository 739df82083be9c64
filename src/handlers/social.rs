// src/handlers/social.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::social::{SocialAccountView, SocialPlatform},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialAccountPayload {
    pub platform: SocialPlatform,

    // Aceito com ou sem '@'; armazenado sempre sem
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "@maria.souza")]
    pub handle: String,

    pub follower_count: Option<i64>,
}

// GET /api/talents/{id}/accounts
#[utoipa::path(
    get,
    path = "/api/talents/{id}/accounts",
    tag = "Social",
    responses(
        (status = 200, description = "Contas sociais do talento", body = Vec<SocialAccountView>)
    ),
    params(("id" = Uuid, Path, description = "ID do talento")),
    security(("api_jwt" = []))
)]
pub async fn list_talent_accounts(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let accounts = app_state.social_service.list_by_talent(id).await?;
    Ok((StatusCode::OK, Json(accounts)))
}

// GET /api/accounts/by-talent — lookup para o grid do roster (evita N+1)
#[utoipa::path(
    get,
    path = "/api/accounts/by-talent",
    tag = "Social",
    responses(
        (status = 200, description = "Mapa talento -> contas sociais")
    ),
    security(("api_jwt" = []))
)]
pub async fn accounts_by_talent(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let lookup = app_state.social_service.accounts_by_talent().await?;
    Ok((StatusCode::OK, Json(lookup)))
}

// POST /api/talents/{id}/accounts
#[utoipa::path(
    post,
    path = "/api/talents/{id}/accounts",
    tag = "Social",
    request_body = SocialAccountPayload,
    responses(
        (status = 201, description = "Conta criada", body = SocialAccountView),
        (status = 409, description = "Conta já cadastrada")
    ),
    params(("id" = Uuid, Path, description = "ID do talento")),
    security(("api_jwt" = []))
)]
pub async fn create_account(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SocialAccountPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let account = app_state
        .social_service
        .create(id, payload.platform, &payload.handle, payload.follower_count)
        .await?;
    Ok((StatusCode::CREATED, Json(account)))
}

// PUT /api/accounts/{id}
#[utoipa::path(
    put,
    path = "/api/accounts/{id}",
    tag = "Social",
    request_body = SocialAccountPayload,
    responses(
        (status = 200, description = "Conta atualizada", body = SocialAccountView),
        (status = 404, description = "Conta não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da conta")),
    security(("api_jwt" = []))
)]
pub async fn update_account(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SocialAccountPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let account = app_state
        .social_service
        .update(id, payload.platform, &payload.handle, payload.follower_count)
        .await?;
    Ok((StatusCode::OK, Json(account)))
}

// DELETE /api/accounts/{id}
#[utoipa::path(
    delete,
    path = "/api/accounts/{id}",
    tag = "Social",
    responses(
        (status = 204, description = "Conta removida"),
        (status = 404, description = "Conta não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da conta")),
    security(("api_jwt" = []))
)]
pub async fn delete_account(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.social_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
