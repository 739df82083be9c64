// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Talents ---
        handlers::talents::list_talents,
        handlers::talents::get_talent,
        handlers::talents::create_talent,
        handlers::talents::update_talent,
        handlers::talents::delete_talent,
        handlers::talents::upload_avatar,

        // --- Social ---
        handlers::social::list_talent_accounts,
        handlers::social::accounts_by_talent,
        handlers::social::create_account,
        handlers::social::update_account,
        handlers::social::delete_account,

        // --- Rates ---
        handlers::rates::list_deliverables,
        handlers::rates::addon_rules,
        handlers::rates::get_rate_card,
        handlers::rates::save_rates,
        handlers::rates::rates_by_talent,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::revenue_by_talent,
        handlers::dashboard::revenue_by_client,
        handlers::dashboard::revenue_over_time,
        handlers::dashboard::talent_revenue,
        handlers::dashboard::quote_pipeline,
        handlers::dashboard::list_deals,
        handlers::dashboard::list_quotes,

        // --- CRM ---
        handlers::crm::list_clients,
        handlers::crm::create_client,
        handlers::crm::update_client,
        handlers::crm::delete_client,
        handlers::crm::list_platforms,
        handlers::crm::list_categories,
        handlers::crm::categories_by_talent,
        handlers::crm::set_talent_categories,

        // --- Stats ---
        handlers::stats::refresh_talent,
        handlers::stats::refresh_all,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Talents ---
            models::talent::TalentStatus,
            models::talent::Talent,
            handlers::talents::TalentPayload,

            // --- Social ---
            models::social::SocialPlatform,
            models::social::SocialAccount,
            models::social::SocialAccountView,
            handlers::social::SocialAccountPayload,

            // --- Rates ---
            models::catalog::Deliverable,
            models::catalog::AddonRule,
            models::catalog::RateCardEntry,
            models::catalog::RateCard,

            // --- Dashboard ---
            models::revenue::QuoteStatus,
            models::revenue::Deal,
            models::revenue::Quote,
            models::revenue::RevenueGroup,
            models::revenue::TalentRevenue,
            models::revenue::ClientRevenue,
            models::revenue::MonthlyRevenue,
            models::revenue::RevenueSummary,
            models::revenue::PipelineBucket,
            models::revenue::QuotePipeline,

            // --- CRM ---
            models::client::Client,
            models::taxonomy::Platform,
            models::taxonomy::Category,
            handlers::crm::ClientPayload,
            handlers::crm::SetTalentCategoriesPayload,

            // --- Stats ---
            models::stats::FailedHandle,
            models::stats::RefreshReport,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Talents", description = "Roster de Talentos"),
        (name = "Social", description = "Contas Sociais dos Talentos"),
        (name = "Rates", description = "Catálogo de Entregáveis e Rate Cards"),
        (name = "Dashboard", description = "Receita, Pipeline e Indicadores"),
        (name = "CRM", description = "Clientes e Taxonomias"),
        (name = "Stats", description = "Atualização de Seguidores via Scraper")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
