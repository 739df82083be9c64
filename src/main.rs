// src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas)
    let user_routes = Router::new().route("/me", get(handlers::auth::get_me));

    // Roster + contas + rate card do talento
    let talent_routes = Router::new()
        .route(
            "/",
            post(handlers::talents::create_talent).get(handlers::talents::list_talents),
        )
        .route(
            "/{id}",
            get(handlers::talents::get_talent)
                .put(handlers::talents::update_talent)
                .delete(handlers::talents::delete_talent),
        )
        .route(
            "/{id}/avatar",
            post(handlers::talents::upload_avatar)
                // O teto real é 5 MB, validado no serviço; a folga é do envelope multipart
                .layer(DefaultBodyLimit::max(6 * 1024 * 1024)),
        )
        .route(
            "/{id}/accounts",
            get(handlers::social::list_talent_accounts).post(handlers::social::create_account),
        )
        .route(
            "/{id}/rates",
            get(handlers::rates::get_rate_card).put(handlers::rates::save_rates),
        )
        .route("/{id}/categories", put(handlers::crm::set_talent_categories))
        .route("/{id}/revenue", get(handlers::dashboard::talent_revenue));

    let account_routes = Router::new()
        .route("/by-talent", get(handlers::social::accounts_by_talent))
        .route(
            "/{id}",
            put(handlers::social::update_account).delete(handlers::social::delete_account),
        );

    let catalog_routes = Router::new()
        .route("/deliverables", get(handlers::rates::list_deliverables))
        .route("/deliverables/addon-rules", get(handlers::rates::addon_rules))
        .route("/rates/by-talent", get(handlers::rates::rates_by_talent));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/revenue-by-talent", get(handlers::dashboard::revenue_by_talent))
        .route("/revenue-by-client", get(handlers::dashboard::revenue_by_client))
        .route("/revenue-over-time", get(handlers::dashboard::revenue_over_time))
        .route("/quote-pipeline", get(handlers::dashboard::quote_pipeline));

    let crm_routes = Router::new()
        .route(
            "/clients",
            post(handlers::crm::create_client).get(handlers::crm::list_clients),
        )
        .route(
            "/clients/{id}",
            put(handlers::crm::update_client).delete(handlers::crm::delete_client),
        )
        .route("/platforms", get(handlers::crm::list_platforms))
        .route("/categories", get(handlers::crm::list_categories))
        .route("/categories/by-talent", get(handlers::crm::categories_by_talent));

    let stats_routes = Router::new()
        .route("/talents/{id}/refresh", post(handlers::stats::refresh_talent))
        .route("/refresh-all", post(handlers::stats::refresh_all));

    // Tudo que mexe com dados exige o Bearer token
    let protected_routes = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/talents", talent_routes)
        .nest("/api/accounts", account_routes)
        .nest("/api", catalog_routes.merge(crm_routes))
        .nest("/api/dashboard", dashboard_routes)
        .route("/api/deals", get(handlers::dashboard::list_deals))
        .route("/api/quotes", get(handlers::dashboard::list_quotes))
        .nest("/api/stats", stats_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .nest_service("/uploads", ServeDir::new(&app_state.upload_dir))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
