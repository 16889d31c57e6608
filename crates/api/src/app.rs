use axum::{
    middleware,
    routing::{delete, get, post, put},
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

use domain::models::Permission;
use shared::jwt::JwtConfig;

use crate::config::Config;
use crate::middleware::{
    auth_rate_limit_middleware, metrics_handler, metrics_middleware, rate_limit_middleware,
    require_auth, require_permission, security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    admin_articles, admin_categories, articles, auth, categories, health, import, search, stats,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
    pub auth_rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let jwt = Arc::new(JwtConfig::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry_secs,
        config.jwt.refresh_token_expiry_secs,
        config.jwt.leeway_secs,
    ));
    let config = Arc::new(config);

    let rate_limiter = (config.security.rate_limit_per_minute > 0)
        .then(|| Arc::new(RateLimiterState::new(config.security.rate_limit_per_minute)));
    let auth_rate_limiter = (config.security.auth_rate_limit_per_minute > 0).then(|| {
        Arc::new(RateLimiterState::new(
            config.security.auth_rate_limit_per_minute,
        ))
    });

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
        rate_limiter,
        auth_rate_limiter,
    };

    // CORS: any origin in development, explicit allowlist in production
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
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

    // Public catalog and search routes
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/categories", get(categories::list_tree))
        .route("/api/categories/:slug", get(categories::get_by_slug))
        .route("/api/articles", get(articles::list_published))
        .route("/api/articles/popular", get(articles::popular))
        .route("/api/articles/recent", get(articles::recent))
        .route("/api/articles/:slug", get(articles::get_by_slug))
        .route("/api/search", get(search::search))
        .route("/api/search/suggestions", get(search::suggestions))
        .route("/api/search/popular-queries", get(search::popular_queries));

    // Auth routes get a stricter per-IP rate limit
    let auth_routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/refresh", post(auth::refresh))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_rate_limit_middleware,
        ));

    let me_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Admin route groups, one per required permission.
    // Layer order per group: require_auth runs first, then the permission check.
    let admin_article_routes = Router::new()
        .route("/api/admin/articles", get(admin_articles::list))
        .route("/api/admin/articles", post(admin_articles::create))
        .route("/api/admin/articles/:id", put(admin_articles::update))
        .route("/api/admin/articles/:id", delete(admin_articles::remove))
        .route_layer(middleware::from_fn_with_state(
            (state.clone(), Permission::ManageArticles),
            require_permission,
        ));

    let admin_category_routes = Router::new()
        .route("/api/admin/categories", get(admin_categories::list))
        .route("/api/admin/categories", post(admin_categories::create))
        .route("/api/admin/categories/:id", put(admin_categories::update))
        .route(
            "/api/admin/categories/:id",
            delete(admin_categories::remove),
        )
        .route_layer(middleware::from_fn_with_state(
            (state.clone(), Permission::ManageCategories),
            require_permission,
        ));

    let admin_import_routes = Router::new()
        .route("/api/admin/import", post(import::import_appeals))
        .route_layer(middleware::from_fn_with_state(
            (state.clone(), Permission::ImportAppeals),
            require_permission,
        ));

    let admin_stats_routes = Router::new()
        .route("/api/admin/stats", get(stats::admin_stats))
        .route_layer(middleware::from_fn_with_state(
            (state.clone(), Permission::ViewStats),
            require_permission,
        ));

    let admin_routes = admin_article_routes
        .merge(admin_category_routes)
        .merge(admin_import_routes)
        .merge(admin_stats_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(me_routes)
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
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(cors)
        .with_state(state)
}
