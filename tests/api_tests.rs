//! Integration tests for the HTTP surface: envelope, auth, routing and genres.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{API_KEY, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let (status, json) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["code"], 200);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["database"], true);
}

#[tokio::test]
async fn test_empty_catalog_lists() {
    let app = spawn_app().await;

    for uri in ["/movies", "/characters", "/genres"] {
        let (status, json) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json, json!({ "data": [], "code": 200 }), "{uri}");
    }
}

#[tokio::test]
async fn test_unknown_route() {
    let app = spawn_app().await;

    let (status, json) = app.get("/directors").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "error": "Route not found", "code": 404 }));
}

#[tokio::test]
async fn test_mutations_require_api_key() {
    let app = spawn_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/genres")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "name": "Drama" }).to_string()))
        .unwrap();
    let (status, json) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json, json!({ "error": "Unauthorized", "code": 401 }));

    let request = Request::builder()
        .method("DELETE")
        .uri("/genres/1")
        .header("X-Api-Key", "wrong-key")
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, json) = app.get("/genres").await;
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = spawn_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/genres")
        .header(header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "name": "Drama" }).to_string()))
        .unwrap();
    let (status, json) = app.send(request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Genre created");
}

#[tokio::test]
async fn test_invalid_id_in_path() {
    let app = spawn_app().await;

    let expected = json!({ "error": "Field id is invalid", "code": 400 });

    for uri in ["/movies/abc", "/characters/99999999999", "/genres/1.5"] {
        let (status, json) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json, expected, "{uri}");
    }

    let (status, json) = app
        .patch_json("/characters/x", &json!({ "name": "Arthur" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, expected);

    let (status, json) = app.delete("/movies/-").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, expected);
}

#[tokio::test]
async fn test_genre_lifecycle() {
    let app = spawn_app().await;

    let (status, json) = app.post_json("/genres", &json!({ "name": "Fantasy" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["code"], 201);
    assert_eq!(json["message"], "Genre created");
    assert_eq!(json["data"]["name"], "Fantasy");
    assert_eq!(json["data"]["image"], serde_json::Value::Null);
    let id = json["data"]["id"].as_i64().unwrap();

    let (status, json) = app.get(&format!("/genres/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Fantasy");
    assert_eq!(json["data"]["movies"], json!([]));

    let (status, json) = app
        .patch_json(&format!("/genres/{id}"), &json!({ "name": "Fantasy" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "Genre not modified", "code": 200 }));

    let (status, json) = app
        .patch_json(&format!("/genres/{id}"), &json!({ "name": "High Fantasy" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Genre modified");

    let (_, json) = app.get("/genres?name=high").await;
    assert_eq!(json["data"][0]["name"], "High Fantasy");
    let (_, json) = app.get("/genres?name=horror").await;
    assert_eq!(json["data"], json!([]));

    let (status, json) = app.delete(&format!("/genres/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Genre deleted");
    assert_eq!(json["data"], id);

    let (status, json) = app.get(&format!("/genres/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "ID does not belong to existing genre");
}

#[tokio::test]
async fn test_validation_reports_every_field() {
    let app = spawn_app().await;

    let (status, json) = app
        .post_json("/characters", &json!({ "name": "X", "weight": "heavy" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], 400);
    assert_eq!(
        json["error"],
        json!([
            { "field": "name", "message": "Field name is invalid" },
            { "field": "age", "message": "Field age is invalid" },
            { "field": "weight", "message": "Field weight is invalid" },
        ])
    );
}

#[tokio::test]
async fn test_association_lists_must_hold_integers() {
    let app = spawn_app().await;

    let (status, json) = app
        .post_json(
            "/genres",
            &json!({ "name": "Drama", "movies": ["one", "two"] }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        json!([{ "field": "movies", "message": "Field movies must be an array of int" }])
    );
}

#[tokio::test]
async fn test_non_object_json_body() {
    let app = spawn_app().await;

    let (status, json) = app.post_json("/genres", &json!(["Drama"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Request body must be a JSON object");
}

#[tokio::test]
async fn test_urlencoded_body() {
    let app = spawn_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/characters")
        .header("X-Api-Key", API_KEY)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("name=Arthur&age=35&weight=72.4&story=Point+man"))
        .unwrap();
    let (status, json) = app.send(request).await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["name"], "Arthur");
    assert_eq!(json["data"]["age"], 35);
    assert_eq!(json["data"]["weight"], 72.4);
    assert_eq!(json["data"]["story"], "Point man");
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let app = spawn_app().await;

    let response = tower::ServiceExt::oneshot(
        app.router.clone(),
        Request::builder().uri("/metrics").body(Body::empty()).unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
