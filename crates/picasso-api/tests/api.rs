use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use picasso_api::{AppStateInner, router};
use picasso_db::Database;

fn app() -> Router {
    let db = Database::open_in_memory().expect("in-memory db");
    router(Arc::new(AppStateInner { db }))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}

async fn seed_user(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/users",
        Some(json!({
            "firstName": "Pablo",
            "lastName": "Ruiz",
            "email": "pablo@example.com",
            "password": "guernica1937",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    as_json(&body)["id"].as_i64().unwrap()
}

async fn seed_catalog(app: &Router, user_id: i64, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/v1/users/{user_id}/catalogs"),
        Some(json!({ "catalogName": name, "user_id": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    as_json(&body)["id"].as_i64().unwrap()
}

async fn seed_palette(app: &Router, user_id: i64, catalog_id: i64, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes"),
        Some(json!({
            "paletteName": name,
            "catalog_id": catalog_id,
            "colors": [{ "hex": "342537" }, { "hex": "742532", "name": "brick" }],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    as_json(&body)["id"].as_i64().unwrap()
}

#[tokio::test]
async fn root_greets() {
    let app = app();
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"We're going to test all the routes!");
}

#[tokio::test]
async fn signup_returns_first_name_and_id() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/users",
        Some(json!({
            "firstName": "Frida",
            "lastName": "Kahlo",
            "email": "frida@example.com",
            "password": "lascasaazul",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let body = as_json(&body);
    assert_eq!(body["firstName"], "Frida");
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn signup_missing_field_names_it() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/users",
        Some(json!({
            "firstName": "Frida",
            "email": "frida@example.com",
            "password": "lascasaazul",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error = as_json(&body)["error"].as_str().unwrap().to_string();
    assert!(error.contains("You are missing a lastName property."), "{error}");
}

#[tokio::test]
async fn signup_duplicate_email_conflicts() {
    let app = app();
    seed_user(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/users",
        Some(json!({
            "firstName": "Paul",
            "lastName": "Ruiz",
            "email": "pablo@example.com",
            "password": "somethingelse",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(as_json(&body)["error"], "Email has already been taken");
}

#[tokio::test]
async fn login_outcomes() {
    let app = app();
    let user_id = seed_user(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/login",
        Some(json!({ "email": "pablo@example.com", "password": "guernica1937" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = as_json(&body);
    assert_eq!(body["firstName"], "Pablo");
    assert_eq!(body["id"], user_id);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/login",
        Some(json!({ "email": "pablo@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body)["error"], "Incorrect Password");

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/login",
        Some(json!({ "email": "nobody@example.com", "password": "guernica1937" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body)["error"], "Email not found");
}

#[tokio::test]
async fn catalogs_for_user_without_any_is_404() {
    let app = app();
    let user_id = seed_user(&app).await;

    let (status, body) = send(&app, "GET", &format!("/api/v1/users/{user_id}/catalogs"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body)["error"], "Catalogs not found");
}

#[tokio::test]
async fn catalog_create_then_fetch() {
    let app = app();
    let user_id = seed_user(&app).await;
    let catalog_id = seed_catalog(&app, user_id, "Personal").await;

    let (status, body) = send(&app, "GET", &format!("/api/v1/users/{user_id}/catalogs"), None).await;
    assert_eq!(status, StatusCode::OK);
    let list = as_json(&body);
    assert_eq!(
        list,
        json!([{ "id": catalog_id, "catalogName": "Personal", "user_id": user_id }])
    );

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["catalogName"], "Personal");

    // scoped under the wrong user the catalog is invisible
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/users/{}/catalogs/{catalog_id}", user_id + 1),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body)["error"], "Catalog not found");
}

#[tokio::test]
async fn catalog_create_missing_name_is_422() {
    let app = app();
    let user_id = seed_user(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/users/{user_id}/catalogs"),
        Some(json!({ "user_id": user_id })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error = as_json(&body)["error"].as_str().unwrap().to_string();
    assert!(error.contains("You are missing a catalogName property."), "{error}");
}

#[tokio::test]
async fn catalog_rename() {
    let app = app();
    let user_id = seed_user(&app).await;
    let catalog_id = seed_catalog(&app, user_id, "Personal").await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}"),
        Some(json!({ "newName": "Work" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!({ "newName": "Work" }));

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["catalogName"], "Work");

    // missing newName
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // absent catalog
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/v1/users/{user_id}/catalogs/9999"),
        Some(json!({ "newName": "Nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body)["error"], "Catalog not found");
}

#[tokio::test]
async fn palettes_empty_catalog_is_404() {
    let app = app();
    let user_id = seed_user(&app).await;
    let catalog_id = seed_catalog(&app, user_id, "Personal").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body)["error"], "No palettes were found");
}

#[tokio::test]
async fn palette_create_then_fetch() {
    let app = app();
    let user_id = seed_user(&app).await;
    let catalog_id = seed_catalog(&app, user_id, "Personal").await;
    let palette_id = seed_palette(&app, user_id, catalog_id, "Sunny").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes/{palette_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let palette = as_json(&body);
    assert_eq!(palette["paletteName"], "Sunny");
    assert_eq!(palette["colors"][0], json!({ "hex": "342537" }));
    assert_eq!(palette["colors"][1], json!({ "hex": "742532", "name": "brick" }));

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body).as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn palette_create_missing_colors_is_422() {
    let app = app();
    let user_id = seed_user(&app).await;
    let catalog_id = seed_catalog(&app, user_id, "Personal").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes"),
        Some(json!({ "paletteName": "Sunny", "catalog_id": catalog_id })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error = as_json(&body)["error"].as_str().unwrap().to_string();
    assert!(error.contains("You are missing a colors property."), "{error}");
}

#[tokio::test]
async fn palette_patch_echoes_body() {
    let app = app();
    let user_id = seed_user(&app).await;
    let catalog_id = seed_catalog(&app, user_id, "Personal").await;
    let palette_id = seed_palette(&app, user_id, catalog_id, "Sunny").await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes/{palette_id}"),
        Some(json!({ "paletteName": "Sunnier" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!({ "paletteName": "Sunnier" }));

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes/{palette_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let palette = as_json(&body);
    assert_eq!(palette["paletteName"], "Sunnier");
    // untouched fields survive the patch
    assert_eq!(palette["colors"].as_array().unwrap().len(), 2);

    // nothing recognized to update
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes/{palette_id}"),
        Some(json!({ "bogus": true })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // absent palette
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes/9999"),
        Some(json!({ "paletteName": "Nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body)["error"], "Palette not found");
}

#[tokio::test]
async fn palette_delete_then_204_on_repeat() {
    let app = app();
    let user_id = seed_user(&app).await;
    let catalog_id = seed_catalog(&app, user_id, "Personal").await;
    let palette_id = seed_palette(&app, user_id, catalog_id, "Sunny").await;

    let uri = format!("/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes/{palette_id}");

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(
        as_json(&body),
        json!(format!("Palette {palette_id} was successfully removed"))
    );

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn catalog_delete_cascades_to_palettes() {
    let app = app();
    let user_id = seed_user(&app).await;
    let catalog_id = seed_catalog(&app, user_id, "Personal").await;
    let palette_id = seed_palette(&app, user_id, catalog_id, "Sunny").await;

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(
        as_json(&body),
        json!(format!("Catalog {catalog_id} was successfully removed"))
    );

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}/palettes/{palette_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body)["error"], "Palette not found");

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/v1/users/{user_id}/catalogs/{catalog_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn search_allow_list_and_lookup() {
    let app = app();
    let user_id = seed_user(&app).await;
    let catalog_id = seed_catalog(&app, user_id, "Personal").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/searchdatabase?database=catalogs&id={catalog_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["catalogName"], "Personal");

    // user records never carry the password column
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/searchdatabase?database=users&id={user_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let user = as_json(&body);
    assert_eq!(user["firstName"], "Pablo");
    assert!(user.get("password").is_none());

    let (status, body) = send(&app, "GET", "/api/v1/searchdatabase?database=palettes&id=42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body)["error"], "palette not found");

    let (status, _) = send(&app, "GET", "/api/v1/searchdatabase?database=sqlite_master&id=1", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
