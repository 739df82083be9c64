// src/services/social_service.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SocialRepository,
    models::social::{SocialAccount, SocialAccountView, SocialPlatform},
};

/// Normaliza um handle para armazenamento: sem espaços nas pontas e sem o
/// '@' inicial. Normalizar de novo não muda nada (idempotente).
pub fn normalize_handle(handle: &str) -> String {
    handle.trim().trim_start_matches('@').to_string()
}

#[derive(Clone)]
pub struct SocialService {
    repo: SocialRepository,
}

impl SocialService {
    pub fn new(repo: SocialRepository) -> Self {
        Self { repo }
    }

    pub async fn list_by_talent(&self, talent_id: Uuid) -> Result<Vec<SocialAccountView>, AppError> {
        let accounts = self.repo.list_by_talent(talent_id).await?;
        Ok(accounts.into_iter().map(SocialAccountView::from).collect())
    }

    /// Lookup talento -> contas, montado por inteiro de uma query só.
    /// Talentos sem conta simplesmente não aparecem; o consumidor trata a
    /// ausência como lista vazia. O mapa é sempre reconstruído do zero.
    pub async fn accounts_by_talent(
        &self,
    ) -> Result<HashMap<Uuid, Vec<SocialAccountView>>, AppError> {
        let accounts = self.repo.list_all().await?;
        Ok(group_by_talent(accounts))
    }

    pub async fn create(
        &self,
        talent_id: Uuid,
        platform: SocialPlatform,
        handle: &str,
        follower_count: Option<i64>,
    ) -> Result<SocialAccountView, AppError> {
        let handle = normalize_handle(handle);
        let account = self.repo.create(talent_id, platform, &handle, follower_count).await?;
        Ok(account.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        platform: SocialPlatform,
        handle: &str,
        follower_count: Option<i64>,
    ) -> Result<SocialAccountView, AppError> {
        let handle = normalize_handle(handle);
        let account = self.repo.update(id, platform, &handle, follower_count).await?;
        Ok(account.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await
    }
}

fn group_by_talent(accounts: Vec<SocialAccount>) -> HashMap<Uuid, Vec<SocialAccountView>> {
    let mut lookup: HashMap<Uuid, Vec<SocialAccountView>> = HashMap::new();
    for account in accounts {
        lookup.entry(account.talent_id).or_default().push(account.into());
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn strips_leading_at_and_whitespace() {
        assert_eq!(normalize_handle("@maria"), "maria");
        assert_eq!(normalize_handle("  @maria  "), "maria");
        assert_eq!(normalize_handle("maria"), "maria");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_handle("@joao.silva");
        assert_eq!(normalize_handle(&once), once);
    }

    #[test]
    fn profile_url_dispatches_per_platform() {
        assert_eq!(
            SocialPlatform::Instagram.profile_url("maria"),
            Some("https://instagram.com/maria".to_string())
        );
        assert_eq!(
            SocialPlatform::Tiktok.profile_url("maria"),
            Some("https://tiktok.com/@maria".to_string())
        );
        assert_eq!(SocialPlatform::Other.profile_url("maria"), None);
    }

    #[test]
    fn groups_accounts_by_talent() {
        let t1 = Uuid::new_v4();
        let t2 = Uuid::new_v4();
        let account = |talent_id, handle: &str| SocialAccount {
            id: Uuid::new_v4(),
            talent_id,
            platform: SocialPlatform::Instagram,
            handle: handle.to_string(),
            follower_count: None,
            last_synced_at: None,
            created_at: Utc::now(),
        };

        let lookup = group_by_talent(vec![account(t1, "a"), account(t1, "b"), account(t2, "c")]);
        assert_eq!(lookup[&t1].len(), 2);
        assert_eq!(lookup[&t2].len(), 1);
        // Talento desconhecido: ausente do mapa, nunca um erro
        assert!(lookup.get(&Uuid::new_v4()).is_none());
    }
}
