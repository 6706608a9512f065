use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use domain::ports::{PageViewStore, RegistrantStore, SchemaProvisioner};
use domain::services::{AnalyticsService, FixedWindowRateLimiter, Notifier, RegistrationService};
use persistence::repositories::{PageViewRepository, RegistrantRepository};
use persistence::schema::PgSchemaProvisioner;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{checkout, health, public_config, registration, setup, views};
use crate::services::EmailService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registration: Arc<RegistrationService>,
    pub analytics: AnalyticsService,
    pub schema: Arc<dyn SchemaProvisioner>,
}

impl AppState {
    /// Wires the services from their collaborators. The rate limiter is
    /// created here from `security`, so its state lives as long as the app.
    pub fn new(
        config: Config,
        registrants: Arc<dyn RegistrantStore>,
        page_views: Arc<dyn PageViewStore>,
        schema: Arc<dyn SchemaProvisioner>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let rate_limiter = Arc::new(FixedWindowRateLimiter::new(
            config.security.registration_max_requests,
            config.security.registration_window(),
        ));

        let registration = RegistrationService::new(
            rate_limiter,
            registrants,
            notifier,
            config.email.notification_recipients.clone(),
        );

        Self {
            config: Arc::new(config),
            registration: Arc::new(registration),
            analytics: AnalyticsService::new(page_views),
            schema,
        }
    }
}

/// Builds the application backed by PostgreSQL and the configured email provider.
pub fn create_app(config: Config, pool: PgPool) -> Router {
    let notifier = Arc::new(EmailService::new(config.email.clone()));
    let state = AppState::new(
        config,
        Arc::new(RegistrantRepository::new(pool.clone())),
        Arc::new(PageViewRepository::new(pool.clone())),
        Arc::new(PgSchemaProvisioner::new(pool)),
        notifier,
    );
    create_router(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Routes and the middleware stack over an already wired state.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    let intake_routes = Router::new()
        .route("/api/registro", post(registration::register))
        .route("/api/views", get(views::get_views).post(views::record_view))
        .route("/api/checkout", get(checkout::checkout))
        .route("/api/config/public", get(public_config::get_public_config))
        .route("/api/setup-db", get(setup::setup_db));

    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(intake_routes)
        .merge(ops_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
