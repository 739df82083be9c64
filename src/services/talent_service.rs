// src/services/talent_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::TalentRepository,
    models::talent::{Talent, TalentStatus},
    services::{social_service::normalize_handle, storage_service::StorageService},
};

// Campos editáveis do formulário de talento, já na forma que o repo espera
#[derive(Debug, Clone)]
pub struct TalentInput {
    pub name: String,
    pub category: Option<String>,
    pub status: TalentStatus,
    pub bio: Option<String>,
    pub notes: Option<String>,
    pub instagram_handle: Option<String>,
    pub tiktok_handle: Option<String>,
}

impl TalentInput {
    // Os handles legados passam pela mesma normalização das contas sociais
    fn normalized(mut self) -> Self {
        self.instagram_handle = self.instagram_handle.map(|h| normalize_handle(&h));
        self.tiktok_handle = self.tiktok_handle.map(|h| normalize_handle(&h));
        self
    }
}

#[derive(Clone)]
pub struct TalentService {
    repo: TalentRepository,
    storage: StorageService,
}

impl TalentService {
    pub fn new(repo: TalentRepository, storage: StorageService) -> Self {
        Self { repo, storage }
    }

    pub async fn list(&self) -> Result<Vec<Talent>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Talent, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Talento não encontrado.".to_string()))
    }

    pub async fn create(&self, input: TalentInput) -> Result<Talent, AppError> {
        let input = input.normalized();
        self.repo
            .create(
                &input.name,
                input.category.as_deref(),
                input.status,
                input.bio.as_deref(),
                input.notes.as_deref(),
                input.instagram_handle.as_deref(),
                input.tiktok_handle.as_deref(),
            )
            .await
    }

    pub async fn update(&self, id: Uuid, input: TalentInput) -> Result<Talent, AppError> {
        let input = input.normalized();
        self.repo
            .update(
                id,
                &input.name,
                input.category.as_deref(),
                input.status,
                input.bio.as_deref(),
                input.notes.as_deref(),
                input.instagram_handle.as_deref(),
                input.tiktok_handle.as_deref(),
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await
    }

    /// Valida, grava o arquivo e persiste a URL pública no talento
    pub async fn set_avatar(
        &self,
        id: Uuid,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<Talent, AppError> {
        // Garante 404 antes de tocar no disco
        let current = self.get(id).await?;
        let avatar_url = self.storage.save_avatar(id, content_type, bytes).await?;
        let talent = self.repo.update_avatar_url(id, &avatar_url).await?;

        // O arquivo anterior só sai do disco depois da troca persistida
        if let Some(old_url) = current.avatar_url {
            self.storage.remove_avatar(&old_url).await;
        }

        Ok(talent)
    }
}
