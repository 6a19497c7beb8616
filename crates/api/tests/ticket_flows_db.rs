//! Database-backed integration tests for the ticket lifecycle rules.
//!
//! These run only when `TEST_DATABASE_URL` points at a PostgreSQL instance;
//! without it each test returns early. Data is never truncated, so every
//! test registers its own accounts with unique emails.

mod common;

use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use common::{
    close_ticket, create_db_test_app, create_ticket, get_request_with_auth,
    json_request_with_auth, parse_response_body, register_user,
};

#[tokio::test]
async fn test_only_the_author_can_rate_a_closed_ticket() {
    let Some(app) = create_db_test_app().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let author = register_user(&app, "Rating Author", false).await;
    let other = register_user(&app, "Rating Bystander", false).await;
    let admin = register_user(&app, "Rating Admin", true).await;

    let ticket_id = create_ticket(&app, &author.token, "low").await;
    close_ticket(&app, &admin.token, ticket_id).await;

    // A different user is refused even though the ticket is closed.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/tickets/{}/rate", ticket_id),
            serde_json::json!({ "rating": 5 }),
            &other.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The author's rating lands.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/tickets/{}/rate", ticket_id),
            serde_json::json!({ "rating": 4 }),
            &author.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["rating"], 4);
}

#[tokio::test]
async fn test_rating_an_open_ticket_is_an_invalid_state() {
    let Some(app) = create_db_test_app().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let author = register_user(&app, "Eager Rater", false).await;
    let ticket_id = create_ticket(&app, &author.token, "medium").await;

    let response = app
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/tickets/{}/rate", ticket_id),
            serde_json::json!({ "rating": 5 }),
            &author.token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "invalid_state");
}

#[tokio::test]
async fn test_commenting_on_a_closed_ticket_is_rejected() {
    let Some(app) = create_db_test_app().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let author = register_user(&app, "Comment Author", false).await;
    let admin = register_user(&app, "Comment Admin", true).await;

    let ticket_id = create_ticket(&app, &author.token, "high").await;
    close_ticket(&app, &admin.token, ticket_id).await;

    let response = app
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/tickets/{}/comments", ticket_id),
            serde_json::json!({ "content": "One more thing" }),
            &author.token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "invalid_state");
}

#[tokio::test]
async fn test_closing_a_closed_ticket_is_a_noop_success() {
    let Some(app) = create_db_test_app().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let author = register_user(&app, "Idempotence Author", false).await;
    let admin = register_user(&app, "Idempotence Admin", true).await;

    let ticket_id = create_ticket(&app, &author.token, "low").await;
    close_ticket(&app, &admin.token, ticket_id).await;

    // Closing again succeeds and the status is unchanged.
    let response = app
        .oneshot(json_request_with_auth(
            Method::PATCH,
            &format!("/api/tickets/{}", ticket_id),
            serde_json::json!({ "status": "closed" }),
            &admin.token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "closed");
    assert_eq!(body["slaStatus"], "closed");
}

#[tokio::test]
async fn test_deleting_a_user_removes_their_tickets_and_comments() {
    let Some(app) = create_db_test_app().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let author = register_user(&app, "Doomed Author", false).await;
    let admin = register_user(&app, "Cleanup Admin", true).await;

    let ticket_id = create_ticket(&app, &author.token, "medium").await;

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/tickets/{}/comments", ticket_id),
            serde_json::json!({ "content": "Before the purge" }),
            &author.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::DELETE,
            &format!("/api/users/{}", author.user_id),
            serde_json::json!({}),
            &admin.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The ticket went with its owner.
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/tickets/{}", ticket_id),
            &admin.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // And so did the account.
    let response = app
        .oneshot(get_request_with_auth("/api/users", &admin.token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    let emails: Vec<&str> = body["users"]
        .as_array()
        .expect("users array")
        .iter()
        .filter_map(|u| u["email"].as_str())
        .collect();
    assert!(!emails.contains(&author.email.as_str()));
}

#[tokio::test]
async fn test_list_embeds_profiles_and_comment_counts() {
    let Some(app) = create_db_test_app().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let author = register_user(&app, "Listing Author", false).await;
    let admin = register_user(&app, "Listing Admin", true).await;

    let ticket_id = create_ticket(&app, &author.token, "high").await;

    // Assign the admin and add one comment.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PATCH,
            &format!("/api/tickets/{}", ticket_id),
            serde_json::json!({ "assignedTo": admin.user_id.to_string() }),
            &admin.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/tickets/{}/comments", ticket_id),
            serde_json::json!({ "content": "On it" }),
            &admin.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The author's listing carries both profiles and the comment count.
    let response = app
        .oneshot(get_request_with_auth("/api/tickets", &author.token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;

    let listed = body["tickets"]
        .as_array()
        .expect("tickets array")
        .iter()
        .find(|t| t["id"] == serde_json::json!(ticket_id))
        .expect("created ticket in listing");

    assert_eq!(listed["user"]["email"], author.email.as_str());
    assert_eq!(
        listed["assignedAdmin"]["id"],
        serde_json::json!(admin.user_id)
    );
    assert_eq!(listed["commentCount"], 1);
}
