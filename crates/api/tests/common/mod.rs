//! Common test utilities for integration tests.
//!
//! Integration tests run against a real PostgreSQL database named by the
//! `TEST_DATABASE_URL` environment variable. When the variable is unset the
//! tests skip instead of failing, so unit-only runs stay green.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

use domain::models::Role;
use gis_kb_api::app::create_app;
use gis_kb_api::config::{
    BootstrapConfig, Config, DatabaseConfig, JwtAuthConfig, LoggingConfig, SecurityConfig,
    ServerConfig,
};
use persistence::repositories::{
    ArticleRepository, CategoryRepository, NewArticle, NewCategory, UserRepository,
};

/// A connected test context, or None when no test database is configured.
pub struct TestContext {
    pub app: Router,
    pub pool: PgPool,
}

/// Connects to the test database and builds an app over it.
///
/// Returns None when `TEST_DATABASE_URL` is unset so tests can skip.
pub async fn setup() -> Option<TestContext> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&url)
        .await
        .expect("Failed to connect to test database");

    run_migrations(&pool).await;

    let app = create_app(test_config(&url), pool.clone());
    Some(TestContext { app, pool })
}

async fn run_migrations(pool: &PgPool) {
    let migration_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("persistence/src/migrations");

    let mut entries: Vec<_> = std::fs::read_dir(&migration_dir)
        .expect("Failed to read migrations directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "sql").unwrap_or(false))
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let sql = std::fs::read_to_string(entry.path()).expect("Failed to read migration file");
        sqlx::raw_sql(&sql)
            .execute(pool)
            .await
            .expect("Failed to run migration");
    }
}

/// Test configuration: rate limits and the content seed are disabled.
pub fn test_config(database_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
            public_url: String::new(),
        },
        database: DatabaseConfig {
            url: database_url.to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            cors_origins: vec![],
            rate_limit_per_minute: 0,
            auth_rate_limit_per_minute: 0,
        },
        jwt: JwtAuthConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_secs: 3600,
            refresh_token_expiry_secs: 86400,
            leeway_secs: 30,
        },
        bootstrap: BootstrapConfig {
            admin_email: "admin@gis-kb.ru".to_string(),
            admin_password: "admin123".to_string(),
            seed_content: false,
        },
    }
}

pub fn unique_email() -> String {
    format!("op_{}@gis-kb.ru", Uuid::new_v4().simple())
}

pub fn unique_code() -> String {
    format!("99.{}", &Uuid::new_v4().simple().to_string()[..8])
}

/// Creates a user directly in the database and logs them in over the API.
/// Returns the access token.
pub async fn login_as(ctx: &TestContext, role: Role) -> String {
    let email = unique_email();
    let password = "operator-pass-1";

    let hash = shared::password::hash_password(password).unwrap();
    UserRepository::new(ctx.pool.clone())
        .create(&email, &hash, "Тестовый оператор", role.as_str())
        .await
        .expect("Failed to create test user");

    let response = ctx
        .app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            serde_json::json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap();
    let body = parse_body(response).await;

    body["data"]["accessToken"]
        .as_str()
        .expect("Login response missing access token")
        .to_string()
}

/// Inserts a category with a unique code, returning its id and slug.
pub async fn seed_category(ctx: &TestContext, name: &str) -> (Uuid, String) {
    let code = unique_code();
    let slug = format!("{}-{}", shared::slug::slugify(name), Uuid::new_v4().simple());
    let created = CategoryRepository::new(ctx.pool.clone())
        .create(NewCategory {
            code,
            name: name.to_string(),
            slug: slug.clone(),
            description: None,
            icon: None,
            parent_id: None,
            sort_order: 0,
        })
        .await
        .expect("Failed to seed category");
    (created.id, slug)
}

/// Inserts a published article into the given category, returning its id
/// and slug.
pub async fn seed_article(
    ctx: &TestContext,
    category_id: Uuid,
    title: &str,
    keywords: &[&str],
) -> (Uuid, String) {
    insert_article(ctx, category_id, title, keywords, true).await
}

/// Inserts an unpublished draft, returning its id and slug.
pub async fn seed_draft_article(
    ctx: &TestContext,
    category_id: Uuid,
    title: &str,
) -> (Uuid, String) {
    insert_article(ctx, category_id, title, &[], false).await
}

async fn insert_article(
    ctx: &TestContext,
    category_id: Uuid,
    title: &str,
    keywords: &[&str],
    is_published: bool,
) -> (Uuid, String) {
    let author_email = unique_email();
    let hash = shared::password::hash_password("seed-author-pass").unwrap();
    let author = UserRepository::new(ctx.pool.clone())
        .create(&author_email, &hash, "Автор", Role::Editor.as_str())
        .await
        .expect("Failed to create author");

    let slug = shared::slug::unique_slug(title, chrono::Utc::now().timestamp_millis());
    let created = ArticleRepository::new(ctx.pool.clone())
        .create(NewArticle {
            category_id,
            title: title.to_string(),
            slug: slug.clone(),
            summary: format!("Краткое описание: {}", title),
            content: format!("# {}", title),
            response_template: None,
            legal_reference: None,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            is_published,
            author_id: author.id,
        })
        .await
        .expect("Failed to seed article");
    (created.id, slug)
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn json_request_with_auth(
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Multipart POST with a single `file` part carrying the given bytes.
pub fn file_upload_request(uri: &str, bytes: &[u8], token: &str) -> Request<Body> {
    let boundary = "xWorkbookBoundaryx";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"appeals.xlsx\"\r\n\
             Content-Type: application/vnd.openxmlformats-officedocument.spreadsheetml.sheet\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_request_with_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn delete_request_with_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub async fn parse_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}
