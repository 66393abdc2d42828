//! Integration tests for the notes routes.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn test_anonymous_requests_go_to_login() {
    let app = TestApp::new();

    let list = app.get("/notes", None).await;
    assert_eq!(list.status, StatusCode::SEE_OTHER);
    assert_eq!(list.location(), Some("/login?redirectTo=%2Fnotes"));

    let new = app.get("/notes/new?draft=1", None).await;
    assert_eq!(
        new.location(),
        Some("/login?redirectTo=%2Fnotes%2Fnew%3Fdraft%3D1")
    );

    let create = app
        .post_form("/notes/new", &[("title", "t"), ("body", "b")], None)
        .await;
    assert_eq!(create.status, StatusCode::SEE_OTHER);
    assert_eq!(app.notes.count(), 0);
}

#[tokio::test]
async fn test_create_show_and_list() {
    let app = TestApp::new();
    let cookie = app.join("ada@example.com").await;

    let id = app.create_note(&cookie, "Groceries", "Milk, eggs").await;

    let shown = app.get(&format!("/notes/{}", id), Some(&cookie)).await;
    assert_eq!(shown.status, StatusCode::OK);
    let body = shown.json();
    let note = &body["note"];
    assert_eq!(note["id"], id.as_str());
    assert_eq!(note["title"], "Groceries");
    assert_eq!(note["body"], "Milk, eggs");
    assert!(note.get("createdAt").is_some());
    assert!(note.get("userId").is_none());

    app.create_note(&cookie, "Chores", "Laundry").await;
    let list = app.get("/notes", Some(&cookie)).await;
    assert_eq!(list.status, StatusCode::OK);
    let body = list.json();
    let titles: Vec<&str> = body["noteListItems"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Chores", "Groceries"]);
}

#[tokio::test]
async fn test_new_note_page_for_signed_in_user() {
    let app = TestApp::new();
    let cookie = app.join("ada@example.com").await;

    let response = app.get("/notes/new", Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({}));
}

#[tokio::test]
async fn test_create_requires_title_and_body() {
    let app = TestApp::new();
    let cookie = app.join("ada@example.com").await;

    let response = app
        .post_form("/notes/new", &[("title", "")], Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.field_errors("title"), vec!["Title is required"]);
    assert_eq!(response.field_errors("body"), vec!["Body is required"]);
    assert_eq!(app.notes.count(), 0);
}

#[tokio::test]
async fn test_notes_are_private_to_their_owner() {
    let app = TestApp::new();
    let ada = app.join("ada@example.com").await;
    let bob = app.join("bob@example.com").await;

    let id = app.create_note(&ada, "Secret", "Only for Ada").await;
    let path = format!("/notes/{}", id);

    let read = app.get(&path, Some(&bob)).await;
    assert_eq!(read.status, StatusCode::NOT_FOUND);
    assert_eq!(read.json()["error"]["message"], "Note not found");

    let delete = app.post_form(&path, &[], Some(&bob)).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
    assert_eq!(app.notes.count(), 1);

    let list = app.get("/notes", Some(&bob)).await;
    assert_eq!(list.json(), json!({ "noteListItems": [] }));
}

#[tokio::test]
async fn test_owner_can_delete() {
    let app = TestApp::new();
    let cookie = app.join("ada@example.com").await;
    let id = app.create_note(&cookie, "Temporary", "Delete me").await;
    let path = format!("/notes/{}", id);

    let response = app.post_form(&path, &[], Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/notes"));
    assert_eq!(app.get(&path, Some(&cookie)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_note_id() {
    let app = TestApp::new();
    let cookie = app.join("ada@example.com").await;

    let response = app.get("/notes/not-a-uuid", Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
