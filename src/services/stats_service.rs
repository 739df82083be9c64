// src/services/stats_service.rs
//
// Proxy para o serviço externo de scraping de seguidores + persistência dos
// resultados. O refresh em lote é melhor esforço: handles que falharam são
// reportados, os demais são gravados mesmo assim.

use std::collections::HashMap;

use reqwest::Client;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{SocialRepository, TalentRepository},
    models::{
        social::SocialPlatform,
        stats::{FailedHandle, RefreshReport, ScrapeRequest, ScrapedProfile, ScraperResponse},
    },
    services::social_service::normalize_handle,
};

/// Formata a contagem de seguidores para exibição: "950", "12.5K", "1.3M"
pub fn format_followers(count: i64) -> String {
    if count < 1_000 {
        format!("{}", count)
    } else if count < 1_000_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    }
}

// --- CLIENTE HTTP DO SCRAPER ---

#[derive(Clone)]
pub struct ScraperClient {
    client: Client,
    base_url: String,
}

impl ScraperClient {
    pub fn new(base_url: String) -> Self {
        Self { client: Client::new(), base_url }
    }

    /// Um POST com o lote inteiro de usernames. Status não-2xx ou
    /// `success=false` derrubam o lote todo; erros por item vêm no `data`.
    pub async fn scrape(&self, usernames: Vec<String>) -> Result<Vec<ScrapedProfile>, AppError> {
        let response = self
            .client
            .post(self.base_url.as_str())
            .json(&ScrapeRequest { usernames })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ScraperError(format!(
                "status HTTP {}",
                response.status()
            )));
        }

        let body: ScraperResponse = response.json().await?;
        if !body.success {
            return Err(AppError::ScraperError(
                body.error.unwrap_or_else(|| "resposta sem sucesso".to_string()),
            ));
        }

        Ok(body.data)
    }
}

// --- PLANO DE ATUALIZAÇÃO ---

// Um talento com handle resolvível para a plataforma escolhida
#[derive(Debug, Clone)]
pub struct RefreshTarget {
    pub talent_id: Uuid,
    // Conta social a atualizar; None => só o shape legado no próprio talento
    pub account_id: Option<Uuid>,
    pub handle: String,
    pub platform: SocialPlatform,
}

#[derive(Debug, Clone)]
pub struct PlannedUpdate {
    pub target: RefreshTarget,
    pub follower_count: i64,
    pub engagement_rate: Option<f64>,
}

/// Casa os perfis raspados com os alvos. Itens com `error` (ou sem contagem)
/// viram falhas reportadas; o resto vira atualização a aplicar.
pub fn plan_updates(
    targets: &[RefreshTarget],
    profiles: &[ScrapedProfile],
) -> (Vec<PlannedUpdate>, Vec<FailedHandle>) {
    let by_username: HashMap<String, &ScrapedProfile> = profiles
        .iter()
        .map(|p| (p.username.to_lowercase(), p))
        .collect();

    let mut updates = Vec::new();
    let mut failed = Vec::new();

    for target in targets {
        let profile = by_username.get(&target.handle.to_lowercase());
        match profile {
            Some(p) if p.error.is_none() && p.followers_count.is_some() => {
                updates.push(PlannedUpdate {
                    target: target.clone(),
                    follower_count: p.followers_count.unwrap_or(0),
                    engagement_rate: p.engagement_rate,
                });
            }
            Some(p) => failed.push(FailedHandle {
                talent_id: target.talent_id,
                handle: target.handle.clone(),
                error: p
                    .error
                    .clone()
                    .unwrap_or_else(|| "sem contagem de seguidores".to_string()),
            }),
            None => failed.push(FailedHandle {
                talent_id: target.talent_id,
                handle: target.handle.clone(),
                error: "handle ausente da resposta do scraper".to_string(),
            }),
        }
    }

    (updates, failed)
}

// --- SERVIÇO ---

#[derive(Clone)]
pub struct StatsService {
    scraper: ScraperClient,
    talent_repo: TalentRepository,
    social_repo: SocialRepository,
}

impl StatsService {
    pub fn new(
        scraper: ScraperClient,
        talent_repo: TalentRepository,
        social_repo: SocialRepository,
    ) -> Self {
        Self { scraper, talent_repo, social_repo }
    }

    // Resolve o handle de um talento para a plataforma: primeiro a conta
    // social, senão os campos legados do próprio talento.
    async fn resolve_target(
        &self,
        talent_id: Uuid,
        platform: SocialPlatform,
    ) -> Result<Option<RefreshTarget>, AppError> {
        if let Some(account) = self
            .social_repo
            .find_by_talent_and_platform(talent_id, platform)
            .await?
        {
            return Ok(Some(RefreshTarget {
                talent_id,
                account_id: Some(account.id),
                handle: account.handle,
                platform,
            }));
        }

        let talent = self
            .talent_repo
            .find_by_id(talent_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Talento não encontrado.".to_string()))?;

        let legacy_handle = match platform {
            SocialPlatform::Instagram => talent.instagram_handle,
            SocialPlatform::Tiktok => talent.tiktok_handle,
            _ => None,
        };

        Ok(legacy_handle.map(|h| RefreshTarget {
            talent_id,
            account_id: None,
            handle: normalize_handle(&h),
            platform,
        }))
    }

    async fn apply_update(&self, update: &PlannedUpdate) -> Result<(), AppError> {
        if let Some(account_id) = update.target.account_id {
            self.social_repo
                .update_follower_count(account_id, update.follower_count)
                .await?;
        }

        // O shape legado guarda o rótulo formatado, não o número bruto
        match update.target.platform {
            SocialPlatform::Instagram => {
                self.talent_repo
                    .update_legacy_stats(
                        update.target.talent_id,
                        &format_followers(update.follower_count),
                        update.engagement_rate,
                    )
                    .await?;
            }
            SocialPlatform::Tiktok => {
                self.talent_repo
                    .update_legacy_tiktok_stats(
                        update.target.talent_id,
                        &format_followers(update.follower_count),
                    )
                    .await?;
            }
            _ => self.talent_repo.touch_stats_update(update.target.talent_id).await?,
        }

        Ok(())
    }

    /// Refresh de um talento só: raspa exatamente um handle e persiste.
    /// Falha por item aqui é falha da operação inteira.
    pub async fn refresh_one(
        &self,
        talent_id: Uuid,
        platform: SocialPlatform,
    ) -> Result<RefreshReport, AppError> {
        let target = self
            .resolve_target(talent_id, platform)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Talento sem handle de {} cadastrado.",
                    platform.as_str()
                ))
            })?;

        let profiles = self.scraper.scrape(vec![target.handle.clone()]).await?;
        let (updates, failed) = plan_updates(std::slice::from_ref(&target), &profiles);

        let Some(update) = updates.first() else {
            let reason = failed
                .first()
                .map(|f| f.error.clone())
                .unwrap_or_else(|| "perfil não retornado".to_string());
            return Err(AppError::ScraperError(reason));
        };

        self.apply_update(update).await?;
        Ok(RefreshReport { refreshed: 1, failed: vec![] })
    }

    /// Refresh em lote: um scrape só para todos os handles resolvíveis,
    /// depois uma escrita por talento em paralelo, aguardando todas.
    /// Falha parcial não aborta: aplica o que deu certo e reporta o resto.
    pub async fn refresh_all(&self, platform: SocialPlatform) -> Result<RefreshReport, AppError> {
        let talents = self.talent_repo.list().await?;

        let mut targets = Vec::new();
        for talent in &talents {
            if let Some(target) = self.resolve_target(talent.id, platform).await? {
                targets.push(target);
            }
        }

        if targets.is_empty() {
            return Ok(RefreshReport { refreshed: 0, failed: vec![] });
        }

        let handles: Vec<String> = targets.iter().map(|t| t.handle.clone()).collect();
        tracing::info!("Atualizando {} handles de {}", handles.len(), platform.as_str());

        let profiles = self.scraper.scrape(handles).await?;
        let (updates, mut failed) = plan_updates(&targets, &profiles);

        let mut join_set = JoinSet::new();
        let mut pending: HashMap<tokio::task::Id, (Uuid, String)> = HashMap::new();
        for update in updates {
            let service = self.clone();
            let key = (update.target.talent_id, update.target.handle.clone());
            let task = join_set.spawn(async move {
                let result = service.apply_update(&update).await;
                (update, result)
            });
            pending.insert(task.id(), key);
        }

        let (refreshed, mut write_failures) = collect_write_results(join_set, pending).await;
        failed.append(&mut write_failures);

        Ok(RefreshReport { refreshed, failed })
    }
}

// Drena as escritas em paralelo. Pânico numa task de escrita não derruba o
// lote: o talento daquela task vira uma falha reportada como qualquer outra.
async fn collect_write_results(
    mut join_set: JoinSet<(PlannedUpdate, Result<(), AppError>)>,
    mut pending: HashMap<tokio::task::Id, (Uuid, String)>,
) -> (i64, Vec<FailedHandle>) {
    let mut refreshed = 0;
    let mut failed = Vec::new();

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((_, Ok(()))) => refreshed += 1,
            Ok((update, Err(e))) => {
                tracing::error!("Falha ao gravar stats de {}: {}", update.target.handle, e);
                failed.push(FailedHandle {
                    talent_id: update.target.talent_id,
                    handle: update.target.handle,
                    error: e.to_string(),
                });
            }
            Err(join_err) => {
                tracing::error!("Task de escrita de stats abortada: {}", join_err);
                if let Some((talent_id, handle)) = pending.remove(&join_err.id()) {
                    failed.push(FailedHandle {
                        talent_id,
                        handle,
                        error: "escrita abortada antes de concluir".to_string(),
                    });
                }
            }
        }
    }

    (refreshed, failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_followers_by_magnitude() {
        assert_eq!(format_followers(0), "0");
        assert_eq!(format_followers(999), "999");
        assert_eq!(format_followers(1_000), "1.0K");
        assert_eq!(format_followers(12_540), "12.5K");
        assert_eq!(format_followers(1_000_000), "1.0M");
        assert_eq!(format_followers(2_350_000), "2.4M");
    }

    fn target(handle: &str) -> RefreshTarget {
        RefreshTarget {
            talent_id: Uuid::new_v4(),
            account_id: None,
            handle: handle.to_string(),
            platform: SocialPlatform::Instagram,
        }
    }

    fn profile(username: &str, followers: Option<i64>, error: Option<&str>) -> ScrapedProfile {
        ScrapedProfile {
            username: username.to_string(),
            followers_count: followers,
            engagement_rate: None,
            profile_url: None,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn partial_batch_applies_successes_and_reports_failures() {
        let targets = vec![target("a"), target("b")];
        let profiles = vec![
            profile("a", Some(1000), None),
            profile("b", None, Some("not found")),
        ];

        let (updates, failed) = plan_updates(&targets, &profiles);

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].target.handle, "a");
        assert_eq!(updates[0].follower_count, 1000);
        assert_eq!(format_followers(updates[0].follower_count), "1.0K");

        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].handle, "b");
        assert_eq!(failed[0].error, "not found");
    }

    #[test]
    fn missing_profile_in_response_counts_as_failure() {
        let targets = vec![target("a"), target("sumiu")];
        let profiles = vec![profile("a", Some(50), None)];

        let (updates, failed) = plan_updates(&targets, &profiles);
        assert_eq!(updates.len(), 1);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].handle, "sumiu");
    }

    #[test]
    fn legacy_tiktok_plan_keeps_platform_and_formats_label() {
        let mut tiktok_target = target("dancarina");
        tiktok_target.platform = SocialPlatform::Tiktok;
        let profiles = vec![profile("dancarina", Some(1_340_000), None)];

        let (updates, failed) = plan_updates(&[tiktok_target], &profiles);

        assert!(failed.is_empty());
        assert_eq!(updates[0].target.platform, SocialPlatform::Tiktok);
        assert_eq!(updates[0].follower_count, 1_340_000);
        // O que vai para a coluna legada é o rótulo formatado
        assert_eq!(format_followers(updates[0].follower_count), "1.3M");
    }

    fn planned(handle: &str, followers: i64) -> PlannedUpdate {
        PlannedUpdate {
            target: target(handle),
            follower_count: followers,
            engagement_rate: None,
        }
    }

    #[tokio::test]
    async fn panicked_write_task_becomes_reported_failure() {
        let ok = planned("ok", 10);
        let broken = planned("quebrado", 20);
        let panicking = target("panico");

        let mut join_set = JoinSet::new();
        let mut pending = HashMap::new();

        let update = ok.clone();
        let task = join_set.spawn(async move { (update, Ok(())) });
        pending.insert(task.id(), (ok.target.talent_id, ok.target.handle.clone()));

        let update = broken.clone();
        let task = join_set.spawn(async move {
            (update, Err(AppError::ScraperError("timeout".to_string())))
        });
        pending.insert(task.id(), (broken.target.talent_id, broken.target.handle.clone()));

        let task = join_set.spawn(async move { panic!("estouro na escrita") });
        pending.insert(task.id(), (panicking.talent_id, panicking.handle.clone()));

        let (refreshed, failed) = collect_write_results(join_set, pending).await;

        assert_eq!(refreshed, 1);
        assert_eq!(failed.len(), 2);
        assert!(failed.iter().any(|f| f.handle == "quebrado"));
        assert!(failed.iter().any(|f| f.handle == "panico"));
    }

    #[test]
    fn username_match_is_case_insensitive() {
        let targets = vec![target("Maria")];
        let profiles = vec![profile("maria", Some(42), None)];

        let (updates, failed) = plan_updates(&targets, &profiles);
        assert_eq!(updates.len(), 1);
        assert!(failed.is_empty());
    }
}
