//! Integration tests for the admin endpoints and route authorization.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;

use common::*;
use domain::models::Role;

#[tokio::test]
async fn admin_routes_require_authentication() {
    let Some(ctx) = setup().await else { return };

    let response = ctx
        .app
        .clone()
        .oneshot(get_request("/api/admin/articles"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn viewer_cannot_manage_articles() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Viewer).await;

    let response = ctx
        .app
        .clone()
        .oneshot(get_request_with_auth("/api/admin/articles", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = parse_body(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn editor_can_manage_articles() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Editor).await;

    let response = ctx
        .app
        .clone()
        .oneshot(get_request_with_auth("/api/admin/articles", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_article_generates_unique_slugs() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Admin).await;
    let (category_id, _) = seed_category(&ctx, "Админ статьи").await;

    let payload = serde_json::json!({
        "categoryId": category_id,
        "title": "Инструкция по отключению воды",
        "summary": "Краткое описание",
        "content": "# Содержание",
        "isPublished": true
    });

    let first = ctx
        .app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/admin/articles",
            payload.clone(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_slug = parse_body(first).await["data"]["slug"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(first_slug.starts_with("instrukciya-po-otklyucheniyu-vody"));

    let second = ctx
        .app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/admin/articles",
            payload,
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CREATED);
    let second_slug = parse_body(second).await["data"]["slug"]
        .as_str()
        .unwrap()
        .to_string();

    // Same title twice still yields distinct slugs
    assert_ne!(first_slug, second_slug);
}

#[tokio::test]
async fn create_article_with_unknown_category_returns_400() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Admin).await;

    let response = ctx
        .app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/admin/articles",
            serde_json::json!({
                "categoryId": uuid::Uuid::new_v4(),
                "title": "Без категории",
                "summary": "x",
                "content": "x"
            }),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_article_is_partial() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Editor).await;
    let (category_id, _) = seed_category(&ctx, "Частичное обновление").await;
    let (article_id, _) = seed_article(&ctx, category_id, "Старый заголовок", &[]).await;

    let response = ctx
        .app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/admin/articles/{}", article_id),
            serde_json::json!({ "title": "Новый заголовок" }),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["data"]["title"], "Новый заголовок");
    // Untouched fields survive
    assert_eq!(body["data"]["isPublished"], true);
}

#[tokio::test]
async fn update_missing_article_returns_404() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Editor).await;

    let response = ctx
        .app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/admin/articles/{}", uuid::Uuid::new_v4()),
            serde_json::json!({ "title": "Что угодно" }),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_article_then_404() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Admin).await;
    let (category_id, _) = seed_category(&ctx, "Удаление").await;
    let (article_id, _) = seed_article(&ctx, category_id, "На удаление", &[]).await;

    let uri = format!("/api/admin/articles/{}", article_id);
    let first = ctx
        .app
        .clone()
        .oneshot(delete_request_with_auth(&uri, &token))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = ctx
        .app
        .clone()
        .oneshot(delete_request_with_auth(&uri, &token))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_category_derives_slug_from_name() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Admin).await;

    let response = ctx
        .app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/admin/categories",
            serde_json::json!({
                "code": unique_code(),
                "name": "Новая рубрика"
            }),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_body(response).await;
    assert_eq!(body["data"]["slug"], "novaya-rubrika");
}

#[tokio::test]
async fn duplicate_category_code_returns_400() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Admin).await;
    let code = unique_code();

    let payload = serde_json::json!({ "code": code, "name": "Дубликат кода" });
    let first = ctx
        .app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/admin/categories",
            payload.clone(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = ctx
        .app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/admin/categories",
            serde_json::json!({ "code": code, "name": "Другое имя" }),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn category_cannot_be_its_own_parent() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Admin).await;
    let (category_id, _) = seed_category(&ctx, "Сама себе родитель").await;

    let response = ctx
        .app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/admin/categories/{}", category_id),
            serde_json::json!({ "parentId": category_id }),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_reports_counts() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Admin).await;
    let (category_id, _) = seed_category(&ctx, "Статистика").await;
    seed_article(&ctx, category_id, "Статья для статистики", &[]).await;

    let response = ctx
        .app
        .clone()
        .oneshot(get_request_with_auth("/api/admin/stats", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert!(body["data"]["articles"].as_i64().unwrap() >= 1);
    assert!(body["data"]["categories"].as_i64().unwrap() >= 1);
    assert!(body["data"]["totalViews"].as_i64().unwrap() >= 0);
}

#[tokio::test]
async fn import_twice_creates_no_duplicates() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Admin).await;
    let workbook = include_bytes!("fixtures/appeals.xlsx");

    let first = ctx
        .app
        .clone()
        .oneshot(file_upload_request("/api/admin/import", workbook, &token))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let body = parse_body(first).await;
    assert_eq!(body["data"]["success"], 3);
    assert_eq!(body["data"]["errors"], 0);

    let appeals: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM appeals WHERE gis_id LIKE 'imp-000%'")
            .fetch_one(&ctx.pool)
            .await
            .unwrap();
    assert_eq!(appeals, 3);

    // Row without a code lands in the catch-all topic instead of failing
    let fallback_code: String = sqlx::query_scalar(
        "SELECT c.code FROM appeals a JOIN categories c ON c.id = a.category_id \
         WHERE a.gis_id = 'imp-0002'",
    )
    .fetch_one(&ctx.pool)
    .await
    .unwrap();
    assert_eq!(fallback_code, "0.0");

    let second = ctx
        .app
        .clone()
        .oneshot(file_upload_request("/api/admin/import", workbook, &token))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let body = parse_body(second).await;
    assert_eq!(body["data"]["success"], 3);

    let appeals: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM appeals WHERE gis_id LIKE 'imp-000%'")
            .fetch_one(&ctx.pool)
            .await
            .unwrap();
    assert_eq!(appeals, 3);

    let categories: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE code IN ('77.21', '0.0')")
            .fetch_one(&ctx.pool)
            .await
            .unwrap();
    assert_eq!(categories, 2);
}

#[tokio::test]
async fn import_rejects_non_xlsx_upload() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Admin).await;

    let boundary = "xPartBoundaryx";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"appeals.xlsx\"\r\n\
         Content-Type: application/octet-stream\r\n\r\nnot a workbook\r\n--{b}--\r\n",
        b = boundary
    );

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/admin/import")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn import_without_file_field_returns_400() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Admin).await;

    let boundary = "xPartBoundaryx";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{b}--\r\n",
        b = boundary
    );

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/admin/import")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn viewer_cannot_import_or_view_stats() {
    let Some(ctx) = setup().await else { return };
    let token = login_as(&ctx, Role::Viewer).await;

    let response = ctx
        .app
        .clone()
        .oneshot(get_request_with_auth("/api/admin/stats", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
