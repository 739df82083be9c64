// src/services/crm_service.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, TaxonomyRepository},
    models::{
        client::Client,
        taxonomy::{Category, Platform},
    },
};

// Clientes (marcas) e taxonomias administradas andam juntos aqui: é o lado
// "cadastro" do CRM, sem nenhuma agregação.
#[derive(Clone)]
pub struct CrmService {
    client_repo: ClientRepository,
    taxonomy_repo: TaxonomyRepository,
}

impl CrmService {
    pub fn new(client_repo: ClientRepository, taxonomy_repo: TaxonomyRepository) -> Self {
        Self { client_repo, taxonomy_repo }
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.client_repo.list().await
    }

    pub async fn create_client(
        &self,
        name: &str,
        company: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Client, AppError> {
        self.client_repo.create(name, company, email, phone, notes).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_client(
        &self,
        id: Uuid,
        name: &str,
        company: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Client, AppError> {
        self.client_repo.update(id, name, company, email, phone, notes).await
    }

    pub async fn delete_client(&self, id: Uuid) -> Result<(), AppError> {
        self.client_repo.delete(id).await
    }

    // =========================================================================
    //  TAXONOMIAS
    // =========================================================================

    pub async fn list_platforms(&self, only_active: bool) -> Result<Vec<Platform>, AppError> {
        self.taxonomy_repo.list_platforms(only_active).await
    }

    pub async fn list_categories(&self, only_active: bool) -> Result<Vec<Category>, AppError> {
        self.taxonomy_repo.list_categories(only_active).await
    }

    /// Lookup talento -> ids de categoria, reconstruído por inteiro a cada
    /// chamada (nunca um patch incremental)
    pub async fn categories_by_talent(&self) -> Result<HashMap<Uuid, Vec<Uuid>>, AppError> {
        let rows = self.taxonomy_repo.list_talent_categories().await?;
        let mut lookup: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in rows {
            lookup.entry(row.talent_id).or_default().push(row.category_id);
        }
        Ok(lookup)
    }

    pub async fn set_talent_categories(
        &self,
        talent_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<(), AppError> {
        self.taxonomy_repo.set_talent_categories(talent_id, category_ids).await
    }
}
