//! Integration tests: project and source CRUD over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::*;

async fn create(app: &axum::Router, token: &str, uri: &str, body: Value) -> Value {
    let resp = send(
        app,
        json_request("POST", uri, Some(token), &body.to_string()),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK, "POST {uri}");
    body_json(resp).await
}

#[tokio::test]
async fn project_lifecycle() {
    let (app, _) = app();
    let token = admin_token(&app).await;

    let source = create(
        &app,
        &token,
        "/sources/create",
        json!({"name": "GitHub", "url": "https://github.com/masonpohler"}),
    )
    .await;
    let source_id = source["id"].as_i64().unwrap();

    let project = create(
        &app,
        &token,
        "/projects/create",
        json!({
            "name": "Portfolio",
            "description": "This site",
            "previewURL": "https://example.com/preview.png",
            "sources": [{"id": source_id}]
        }),
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();
    assert_eq!(project["name"], "Portfolio");
    assert_eq!(project["previewURL"], "https://example.com/preview.png");
    assert!(project["lastModified"].is_string());
    assert_eq!(project["sources"][0]["name"], "GitHub");

    // Reads are public.
    let resp = send(&app, get_request(&format!("/project/{project_id}"), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["id"], project_id);

    let resp = send(&app, get_request(&format!("/source/{source_id}"), None)).await;
    let linked = body_json(resp).await;
    assert_eq!(linked["projects"][0]["id"], project_id);

    // Link a brand-new source by name.
    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/project/{project_id}/sources/add"),
            Some(&token),
            r#"{"name":"Demo","url":"https://demo.example"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["sources"].as_array().unwrap().len(), 2);

    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/project/{project_id}/sources/remove"),
            Some(&token),
            &json!({"id": source_id}).to_string(),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    let names: Vec<_> = updated["sources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Demo"]);

    let resp = send(
        &app,
        json_request(
            "DELETE",
            "/projects/delete",
            Some(&token),
            &json!({"id": project_id}).to_string(),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, get_request(&format!("/project/{project_id}"), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(resp).await["message"],
        format!("Project with id {project_id} not found")
    );

    // The source outlives the project.
    let resp = send(&app, get_request(&format!("/source/{source_id}"), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["projects"], json!([]));
}

#[tokio::test]
async fn projects_are_listed_most_recent_first() {
    let (app, _) = app();
    let token = admin_token(&app).await;

    let first = create(&app, &token, "/projects/create", json!({"name": "First"})).await;
    let second = create(&app, &token, "/projects/create", json!({"name": "Second"})).await;

    let resp = send(&app, get_request("/projects", None)).await;
    let listed = body_json(resp).await;
    let ids: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [second["id"].as_i64().unwrap(), first["id"].as_i64().unwrap()]);
}

#[tokio::test]
async fn project_without_name_is_a_bad_request() {
    let (app, _) = app();
    let token = admin_token(&app).await;
    let resp = send(
        &app,
        json_request("POST", "/projects/create", Some(&token), r#"{"name":"  "}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "validation_error");
}

#[tokio::test]
async fn linking_unknown_source_is_not_found() {
    let (app, _) = app();
    let token = admin_token(&app).await;
    let project = create(&app, &token, "/projects/create", json!({"name": "P"})).await;
    let id = project["id"].as_i64().unwrap();

    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/project/{id}/sources/add"),
            Some(&token),
            r#"{"id":999}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(resp).await["message"],
        "Source with id 999 was not found"
    );
}

#[tokio::test]
async fn deleting_sources() {
    let (app, _) = app();
    let token = admin_token(&app).await;
    let source = create(&app, &token, "/sources/create", json!({"name": "Blog"})).await;
    let id = source["id"].as_i64().unwrap();
    let uri = format!("/source/{id}/delete");

    let resp = send(&app, json_request("DELETE", &uri, None, "")).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(&app, json_request("DELETE", &uri, Some(&token), "")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, json_request("DELETE", &uri, Some(&token), "")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, get_request("/sources", None)).await;
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn deleting_missing_project_is_accepted() {
    let (app, _) = app();
    let token = admin_token(&app).await;
    let resp = send(
        &app,
        json_request("DELETE", "/projects/delete", Some(&token), r#"{"id":42}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn non_numeric_id_is_a_json_bad_request() {
    let (app, _) = app();
    let resp = send(&app, get_request("/project/abc", None)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "validation_error");
}

#[tokio::test]
async fn malformed_project_body_is_a_json_bad_request() {
    let (app, _) = app();
    let token = admin_token(&app).await;
    let resp = send(
        &app,
        json_request("POST", "/projects/create", Some(&token), r#"{"name": 5}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "validation_error");
}
