// src/handlers/talents.rs

use axum::{
    extract::{Multipart, Path, State},
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
    models::talent::{Talent, TalentStatus},
    services::talent_service::TalentInput,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TalentPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria Souza")]
    pub name: String,

    #[schema(example = "Lifestyle")]
    pub category: Option<String>,

    pub status: TalentStatus,

    pub bio: Option<String>,
    pub notes: Option<String>,

    // Handles legados de plataforma única; aceitos com ou sem '@'
    #[schema(example = "@maria.souza")]
    pub instagram_handle: Option<String>,
    pub tiktok_handle: Option<String>,
}

impl From<TalentPayload> for TalentInput {
    fn from(p: TalentPayload) -> Self {
        TalentInput {
            name: p.name,
            category: p.category,
            status: p.status,
            bio: p.bio,
            notes: p.notes,
            instagram_handle: p.instagram_handle,
            tiktok_handle: p.tiktok_handle,
        }
    }
}

// GET /api/talents
#[utoipa::path(
    get,
    path = "/api/talents",
    tag = "Talents",
    responses(
        (status = 200, description = "Roster completo, ordenado por nome", body = Vec<Talent>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_talents(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let talents = app_state.talent_service.list().await?;
    Ok((StatusCode::OK, Json(talents)))
}

// GET /api/talents/{id}
#[utoipa::path(
    get,
    path = "/api/talents/{id}",
    tag = "Talents",
    responses(
        (status = 200, description = "Perfil do talento", body = Talent),
        (status = 404, description = "Talento não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do talento")),
    security(("api_jwt" = []))
)]
pub async fn get_talent(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let talent = app_state.talent_service.get(id).await?;
    Ok((StatusCode::OK, Json(talent)))
}

// POST /api/talents
#[utoipa::path(
    post,
    path = "/api/talents",
    tag = "Talents",
    request_body = TalentPayload,
    responses(
        (status = 201, description = "Talento criado", body = Talent),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_talent(
    State(app_state): State<AppState>,
    Json(payload): Json<TalentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let talent = app_state.talent_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(talent)))
}

// PUT /api/talents/{id}
#[utoipa::path(
    put,
    path = "/api/talents/{id}",
    tag = "Talents",
    request_body = TalentPayload,
    responses(
        (status = 200, description = "Talento atualizado", body = Talent),
        (status = 404, description = "Talento não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do talento")),
    security(("api_jwt" = []))
)]
pub async fn update_talent(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TalentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let talent = app_state.talent_service.update(id, payload.into()).await?;
    Ok((StatusCode::OK, Json(talent)))
}

// DELETE /api/talents/{id}
#[utoipa::path(
    delete,
    path = "/api/talents/{id}",
    tag = "Talents",
    responses(
        (status = 204, description = "Talento removido"),
        (status = 404, description = "Talento não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do talento")),
    security(("api_jwt" = []))
)]
pub async fn delete_talent(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.talent_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/talents/{id}/avatar (multipart, campo "file")
#[utoipa::path(
    post,
    path = "/api/talents/{id}/avatar",
    tag = "Talents",
    responses(
        (status = 200, description = "Avatar gravado, talento com a nova URL", body = Talent),
        (status = 400, description = "Arquivo rejeitado (tipo ou tamanho)"),
        (status = 404, description = "Talento não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do talento")),
    security(("api_jwt" = []))
)]
pub async fn upload_avatar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidUpload(e.to_string()))?;

        let talent = app_state
            .talent_service
            .set_avatar(id, &content_type, &bytes)
            .await?;
        return Ok((StatusCode::OK, Json(talent)));
    }

    Err(AppError::InvalidUpload("Nenhum arquivo enviado.".to_string()))
}
