// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        CatalogRepository, ClientRepository, RevenueRepository, SocialRepository,
        TalentRepository, TaxonomyRepository, UserRepository,
    },
    services::{
        auth::AuthService, crm_service::CrmService, rate_card_service::RateCardService,
        revenue_service::RevenueService, social_service::SocialService,
        stats_service::{ScraperClient, StatsService}, storage_service::StorageService,
        talent_service::TalentService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub upload_dir: PathBuf,

    pub auth_service: AuthService,
    pub talent_service: TalentService,
    pub social_service: SocialService,
    pub rate_card_service: RateCardService,
    pub revenue_service: RevenueService,
    pub stats_service: StatsService,
    pub crm_service: CrmService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let scraper_url =
            env::var("SCRAPER_API_URL").expect("SCRAPER_API_URL deve ser definida");
        let upload_dir =
            PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let talent_repo = TalentRepository::new(db_pool.clone());
        let social_repo = SocialRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let revenue_repo = RevenueRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let taxonomy_repo = TaxonomyRepository::new(db_pool.clone());

        let storage = StorageService::new(upload_dir.clone());
        let scraper = ScraperClient::new(scraper_url);

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let talent_service = TalentService::new(talent_repo.clone(), storage);
        let social_service = SocialService::new(social_repo.clone());
        let rate_card_service = RateCardService::new(catalog_repo);
        let revenue_service = RevenueService::new(revenue_repo);
        let stats_service = StatsService::new(scraper, talent_repo, social_repo);
        let crm_service = CrmService::new(client_repo, taxonomy_repo);

        Ok(Self {
            db_pool,
            upload_dir,
            auth_service,
            talent_service,
            social_service,
            rate_card_service,
            revenue_service,
            stats_service,
            crm_service,
        })
    }
}
