//! HTTP API for the DayFlow backend
//!
//! Route layout (everything under `/api`):
//!
//! - `GET  /api/health` - liveness, no auth
//! - `POST /api/auth/login`, `POST /api/auth/register` - tightly rate limited
//! - `GET  /api/auth/me` - caller identity
//! - CRUD under `/api/work-logs`, `/api/skills`, `/api/moods`
//! - `GET  /api/analytics/dashboard`, `GET /api/analytics/export/{type}`
//!
//! Middleware: request IDs and tracing on everything, a general token
//! bucket on the API surface with a stricter bucket on the auth pair,
//! and bearer-token auth on every route except health, login, and
//! register.

pub mod analytics;
pub mod auth;
pub mod error_response;
pub mod health;
pub mod middleware;
pub mod moods;
pub mod pagination;
pub mod rate_limit;
pub mod skills;
pub mod work_logs;

use axum::{middleware::from_fn, middleware::from_fn_with_state, routing::get, Router};
use crate::config::Settings;
use self::rate_limit::RateLimiter;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pool: PgPool, settings: Settings) -> Self {
        Self {
            pool,
            settings: Arc::new(settings),
        }
    }
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let limits = &state.settings.rate_limit;
    let api_limiter = Arc::new(RateLimiter::new(limits.api_burst, limits.api_window_secs));
    let auth_limiter = Arc::new(RateLimiter::new(limits.auth_burst, limits.auth_window_secs));

    // The whole auth mount is tightly rate limited; login and register
    // are public, /me needs a bearer token like the rest of the API
    let auth_routes = Router::new()
        .route("/login", axum::routing::post(auth::login))
        .route("/register", axum::routing::post(auth::register))
        .merge(
            Router::new().route("/me", get(auth::me)).route_layer(
                from_fn_with_state(state.clone(), middleware::require_auth),
            ),
        )
        .route_layer(from_fn_with_state(
            auth_limiter,
            rate_limit::rate_limit_middleware,
        ));

    let protected = Router::new()
        .nest("/work-logs", work_logs::routes())
        .nest("/skills", skills::routes())
        .nest("/moods", moods::routes())
        .nest("/analytics", analytics::routes())
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    let api = Router::new()
        .route("/health", get(health::health))
        .nest("/auth", auth_routes)
        .merge(protected)
        .route_layer(from_fn_with_state(
            api_limiter,
            rate_limit::rate_limit_middleware,
        ));

    Router::new()
        .nest("/api", api)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
