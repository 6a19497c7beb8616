use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, require_auth, security_headers_middleware,
    trace_id,
};
use crate::routes::{analytics, auth, canned_responses, comments, health, tickets, users};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
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
    };

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    // Protected routes (any authenticated user; per-handler checks cover
    // ownership and the admin-only ticket mutations)
    let protected_routes = Router::new()
        // Ticket routes
        .route("/api/tickets", post(tickets::create_ticket))
        .route("/api/tickets", get(tickets::list_tickets))
        .route("/api/tickets/:id", get(tickets::get_ticket))
        .route("/api/tickets/:id", patch(tickets::update_ticket))
        .route("/api/tickets/:id", delete(tickets::delete_ticket))
        .route("/api/tickets/:id/rate", post(tickets::rate_ticket))
        // Comment routes
        .route("/api/tickets/:id/comments", post(comments::add_comment))
        .route("/api/tickets/:id/comments", get(comments::list_comments))
        // Canned response routes (reads for everyone, writes admin-checked)
        .route(
            "/api/canned-responses",
            get(canned_responses::list_canned_responses),
        )
        .route(
            "/api/canned-responses",
            post(canned_responses::create_canned_response),
        )
        .route(
            "/api/canned-responses/:id",
            put(canned_responses::update_canned_response),
        )
        .route(
            "/api/canned-responses/:id",
            delete(canned_responses::delete_canned_response),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Admin routes (authenticated and admin role required)
    let admin_routes = Router::new()
        .route("/api/users", get(users::list_users))
        .route("/api/users/:id/role", patch(users::update_user_role))
        .route("/api/users/:id", delete(users::delete_user))
        .route("/api/analytics", get(analytics::get_analytics))
        .route_layer(middleware::from_fn(require_admin))
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
