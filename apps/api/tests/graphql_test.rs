//! End-to-end tests for the GraphQL endpoint
//!
//! Drives the full router (bearer extraction, schema, resolvers, error
//! projection) over in-memory storage.

mod common;

use axum::{body::Body, http::Request, http::StatusCode, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use quillpost_api::repositories::Stores;
use quillpost_shared_config::Environment;

use common::{error_code, error_message, graphql, test_app, test_app_with};

const CREATE_USER: &str = r#"
    mutation CreateUser($email: String!, $password: String!, $name: String!) {
        createUser(userInput: { email: $email, password: $password, name: $name }) {
            id
            email
            name
        }
    }
"#;

const LOGIN: &str = r#"
    query Login($email: String!, $password: String!) {
        login(email: $email, password: $password) { token userId }
    }
"#;

const CREATE_POST: &str = r#"
    mutation CreatePost($title: String!, $content: String!, $imageUrl: String) {
        createPost(postInput: { title: $title, content: $content, imageUrl: $imageUrl }) {
            id title content imageUrl creatorId createdAt updatedAt
        }
    }
"#;

const POSTS: &str = r#"
    query Posts($page: Int) {
        posts(page: $page) { totalCount items { id title createdAt } }
    }
"#;

/// Register and log in; returns `(user id, Authorization header value)`
async fn sign_up(app: &Router, email: &str) -> (String, String) {
    let created = graphql(
        app,
        CREATE_USER,
        json!({ "email": email, "password": "secret", "name": "Writer" }),
        None,
    )
    .await;
    assert!(created["errors"].is_null(), "{}", created);

    let login = graphql(
        app,
        LOGIN,
        json!({ "email": email, "password": "secret" }),
        None,
    )
    .await;
    let token = login["data"]["login"]["token"].as_str().unwrap();
    let user_id = login["data"]["login"]["userId"].as_str().unwrap();

    (user_id.to_string(), format!("Bearer {}", token))
}

async fn create_post(app: &Router, auth: &str, title: &str) -> Value {
    let response = graphql(
        app,
        CREATE_POST,
        json!({ "title": title, "content": "Body" }),
        Some(auth),
    )
    .await;
    assert!(response["errors"].is_null(), "{}", response);
    response["data"]["createPost"].clone()
}

#[tokio::test]
async fn test_create_user_returns_public_view() {
    let app = test_app();

    let response = graphql(
        &app,
        CREATE_USER,
        json!({ "email": "ada@example.com", "password": "secret", "name": "Ada" }),
        None,
    )
    .await;

    let user = &response["data"]["createUser"];
    assert!(user["id"].is_string());
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["name"], "Ada");
}

#[tokio::test]
async fn test_account_view_has_no_password_field() {
    let app = test_app();

    let response = graphql(
        &app,
        r#"mutation {
            createUser(userInput: { email: "a@b.io", password: "secret", name: "Ada" }) {
                password
            }
        }"#,
        json!({}),
        None,
    )
    .await;

    assert!(response["errors"][0]["message"]
        .as_str()
        .unwrap()
        .contains("password"));
}

#[tokio::test]
async fn test_validation_errors_carry_details() {
    let app = test_app();

    let response = graphql(
        &app,
        CREATE_USER,
        json!({ "email": "nope", "password": "abc", "name": "Al" }),
        None,
    )
    .await;

    assert_eq!(error_code(&response), Some("VALIDATION_FAILED"));
    assert_eq!(error_message(&response), Some("E-Mail is invalid."));
    assert_eq!(
        response["errors"][0]["extensions"]["details"],
        json!([
            { "field": "email", "message": "E-Mail is invalid." },
            { "field": "password", "message": "Password too short!" },
            { "field": "name", "message": "Name too short!" },
        ])
    );
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = test_app();
    sign_up(&app, "ada@example.com").await;

    let response = graphql(
        &app,
        CREATE_USER,
        json!({ "email": "ada@example.com", "password": "x", "name": "" }),
        None,
    )
    .await;

    assert_eq!(error_code(&response), Some("CONFLICT"));
}

#[tokio::test]
async fn test_login_failures_are_distinguishable() {
    let app = test_app();
    sign_up(&app, "ada@example.com").await;

    let unknown = graphql(
        &app,
        LOGIN,
        json!({ "email": "nobody@example.com", "password": "secret" }),
        None,
    )
    .await;
    let wrong = graphql(
        &app,
        LOGIN,
        json!({ "email": "ada@example.com", "password": "wrong" }),
        None,
    )
    .await;

    assert_eq!(error_code(&unknown), Some("NOT_FOUND"));
    assert_eq!(error_code(&wrong), Some("UNAUTHENTICATED"));
}

#[tokio::test]
async fn test_create_post_requires_token() {
    let app = test_app();

    let response = graphql(
        &app,
        CREATE_POST,
        json!({ "title": "Hello", "content": "World" }),
        None,
    )
    .await;

    assert_eq!(error_code(&response), Some("UNAUTHENTICATED"));
    assert_eq!(error_message(&response), Some("Not authenticated!"));
    assert!(response["data"].is_null());
}

#[tokio::test]
async fn test_invalid_tokens_are_treated_as_anonymous() {
    let app = test_app();
    sign_up(&app, "ada@example.com").await;

    for header in [
        "Bearer not-a-jwt",
        "Basic dXNlcjpwYXNz",
        "Bearer",
        "Bearer a b",
    ] {
        let response = graphql(&app, POSTS, json!({}), Some(header)).await;
        assert_eq!(error_code(&response), Some("UNAUTHENTICATED"), "{}", header);
    }
}

#[tokio::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let app = test_app();
    let (_, auth) = sign_up(&app, "ada@example.com").await;
    let lowercase = auth.replacen("Bearer", "bearer", 1);

    let response = graphql(&app, POSTS, json!({}), Some(&lowercase)).await;

    assert!(response["errors"].is_null(), "{}", response);
    assert_eq!(response["data"]["posts"]["totalCount"], 0);
}

#[tokio::test]
async fn test_create_post_projection() {
    let app = test_app();
    let (user_id, auth) = sign_up(&app, "ada@example.com").await;

    let response = graphql(
        &app,
        CREATE_POST,
        json!({ "title": "Hello", "content": "World", "imageUrl": "images/a.png" }),
        Some(&auth),
    )
    .await;

    let post = &response["data"]["createPost"];
    assert_eq!(post["title"], "Hello");
    assert_eq!(post["imageUrl"], "images/a.png");
    assert_eq!(post["creatorId"], user_id.as_str());

    let created_at = post["createdAt"].as_str().unwrap();
    assert!(created_at.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
    // millisecond precision: "...:05.678Z"
    assert_eq!(created_at.split('.').nth(1).map(str::len), Some(4));
}

#[tokio::test]
async fn test_posts_pagination_over_http() {
    let app = test_app();
    let (_, auth) = sign_up(&app, "ada@example.com").await;
    for i in 1..=5 {
        create_post(&app, &auth, &format!("Post {}", i)).await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let mut pages = Vec::new();
    for page in 1..=3 {
        let response = graphql(&app, POSTS, json!({ "page": page }), Some(&auth)).await;
        assert_eq!(response["data"]["posts"]["totalCount"], 5);
        let titles: Vec<String> = response["data"]["posts"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["title"].as_str().unwrap().to_string())
            .collect();
        pages.push(titles);
    }

    assert_eq!(
        pages,
        vec![
            vec!["Post 5", "Post 4"],
            vec!["Post 3", "Post 2"],
            vec!["Post 1"],
        ]
    );
}

#[tokio::test]
async fn test_update_post_image_url_semantics() {
    let app = test_app();
    let (_, auth) = sign_up(&app, "ada@example.com").await;
    let created = graphql(
        &app,
        CREATE_POST,
        json!({ "title": "Pic", "content": "Body", "imageUrl": "images/old.png" }),
        Some(&auth),
    )
    .await;
    let id = created["data"]["createPost"]["id"].as_str().unwrap();

    // imageUrl omitted from the input object
    let kept = graphql(
        &app,
        r#"mutation Update($id: ID!) {
            updatePost(id: $id, postInput: { title: "Pic 2", content: "Body" }) { title imageUrl }
        }"#,
        json!({ "id": id }),
        Some(&auth),
    )
    .await;
    assert_eq!(kept["data"]["updatePost"]["title"], "Pic 2");
    assert_eq!(kept["data"]["updatePost"]["imageUrl"], "images/old.png");

    let replaced = graphql(
        &app,
        r#"mutation Update($id: ID!) {
            updatePost(id: $id, postInput: { title: "Pic", content: "Body", imageUrl: "images/new.png" }) { imageUrl }
        }"#,
        json!({ "id": id }),
        Some(&auth),
    )
    .await;
    assert_eq!(replaced["data"]["updatePost"]["imageUrl"], "images/new.png");

    let cleared = graphql(
        &app,
        r#"mutation Update($id: ID!) {
            updatePost(id: $id, postInput: { title: "Pic", content: "Body", imageUrl: null }) { imageUrl }
        }"#,
        json!({ "id": id }),
        Some(&auth),
    )
    .await;
    assert!(cleared["data"]["updatePost"]["imageUrl"].is_null());
}

#[tokio::test]
async fn test_update_post_by_other_user_is_forbidden() {
    let app = test_app();
    let (_, owner) = sign_up(&app, "ada@example.com").await;
    let (_, intruder) = sign_up(&app, "grace@example.com").await;
    let post = create_post(&app, &owner, "Mine").await;
    let id = post["id"].clone();

    let response = graphql(
        &app,
        r#"mutation Update($id: ID!) {
            updatePost(id: $id, postInput: { title: "Taken", content: "Body" }) { id }
        }"#,
        json!({ "id": id }),
        Some(&intruder),
    )
    .await;

    assert_eq!(error_code(&response), Some("FORBIDDEN"));
}

#[tokio::test]
async fn test_post_by_id_round_trip() {
    let app = test_app();
    let (user_id, auth) = sign_up(&app, "ada@example.com").await;
    let created = create_post(&app, &auth, "Round trip").await;
    let id = created["id"].clone();

    let response = graphql(
        &app,
        r#"query Post($id: ID!) { post(id: $id) { title content creatorId } }"#,
        json!({ "id": id }),
        Some(&auth),
    )
    .await;

    let post = &response["data"]["post"];
    assert_eq!(post["title"], "Round trip");
    assert_eq!(post["content"], "Body");
    assert_eq!(post["creatorId"], user_id.as_str());
}

#[tokio::test]
async fn test_unknown_post_is_not_found() {
    let app = test_app();
    let (_, auth) = sign_up(&app, "ada@example.com").await;

    let response = graphql(
        &app,
        r#"query { post(id: "not-a-uuid") { id } }"#,
        json!({}),
        Some(&auth),
    )
    .await;

    assert_eq!(error_code(&response), Some("NOT_FOUND"));
}

#[tokio::test]
async fn test_playground_only_outside_production() {
    let request = || {
        Request::builder()
            .uri("/graphql/playground")
            .body(Body::empty())
            .unwrap()
    };

    let dev = test_app().oneshot(request()).await.unwrap();
    assert_eq!(dev.status(), StatusCode::OK);

    let prod = test_app_with(Stores::in_memory(), Environment::Production)
        .oneshot(request())
        .await
        .unwrap();
    assert_eq!(prod.status(), StatusCode::NOT_FOUND);
}
