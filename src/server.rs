use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{PasswordHasher, TokenService};
use crate::config::AppConfig;
use crate::database::{
    InMemorySavingsPlanRepository, InMemoryUserRepository, PgSavingsPlanRepository, PgUserRepository,
    SavingsPlanRepository, UserRepository,
};
use crate::handlers::{protected, public};
use crate::middleware::authenticate;
use crate::services::{AccountService, PlanService};

/// Shared, immutable application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub accounts: Arc<AccountService>,
    pub plans: Arc<PlanService>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserRepository>,
        plans: Arc<dyn SavingsPlanRepository>,
    ) -> anyhow::Result<Self> {
        let tokens = Arc::new(TokenService::new(&config.security).context("building token service")?);
        let hasher = PasswordHasher::new(config.security.argon2).context("building password hasher")?;

        Ok(Self {
            accounts: Arc::new(AccountService::new(users.clone(), hasher, tokens.clone())),
            plans: Arc::new(PlanService::new(plans, users.clone())),
            config: Arc::new(config),
            tokens,
            users,
        })
    }

    pub fn postgres(config: AppConfig, pool: PgPool) -> anyhow::Result<Self> {
        Self::new(
            config,
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgSavingsPlanRepository::new(pool)),
        )
    }

    /// State over process-local stores; everything is lost on exit
    pub fn in_memory(config: AppConfig) -> anyhow::Result<Self> {
        Self::new(
            config,
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemorySavingsPlanRepository::new()),
        )
    }
}

/// Build the complete router: public and protected routes, authentication,
/// CORS, body limit and request tracing.
pub fn app(state: AppState) -> anyhow::Result<Router> {
    let cors = create_cors_layer(&state.config)?;
    let body_limit = state.config.api.max_request_size_bytes;
    let request_logging = state.config.api.enable_request_logging;

    let router = Router::new()
        .merge(public_routes())
        .merge(auth_routes())
        .merge(sparplan_routes())
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(from_fn_with_state(state.tokens.clone(), authenticate)),
        )
        .with_state(state);

    Ok(if request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    })
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::root_get))
        .route("/etfs", get(public::etfs_get))
        .route("/api/health", get(public::health_get))
}

fn auth_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/auth/register", post(auth::register_post))
        .route("/api/auth/login", post(auth::login_post))
        .route("/api/auth/reset-password", post(auth::reset_password_post))
}

fn sparplan_routes() -> Router<AppState> {
    use protected::sparplaene;

    Router::new()
        .route(
            "/api/sparplaene",
            get(sparplaene::plans_get).post(sparplaene::plan_post),
        )
        .route(
            "/api/sparplaene/:id",
            get(sparplaene::plan_get)
                .put(sparplaene::plan_put)
                .delete(sparplaene::plan_delete),
        )
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.security.cors_origins {
        let header_value = origin
            .parse::<HeaderValue>()
            .with_context(|| format!("invalid CORS origin {:?}", origin))?;
        origins.push(header_value);
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false))
}

/// Serve the router on an already bound listener until ctrl-c
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let app = app(state)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
