//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET, IMAGE_STORE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_conversations_require_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/conversations").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get_auth("/api/v1/conversations", "not-a-real-token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Send Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_text_message() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{}/messages", bob.id),
            &alice.token,
            &SendMessageBody::text("Hello, Bob!"),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(message.sender_id, alice.id.to_string());
    assert_eq!(message.receiver_id, bob.id.to_string());
    assert_eq!(message.text, "Hello, Bob!");
    assert!(!message.seen);
}

#[tokio::test]
async fn test_send_to_unknown_receiver() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let ghost = integration_tests::unique_id();

    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{ghost}/messages"),
            &alice.token,
            &SendMessageBody::text("anyone there?"),
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_eq!(error.error.code, "UNKNOWN_USER");
}

#[tokio::test]
async fn test_send_empty_message_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{}/messages", bob.id),
            &alice.token,
            &SendMessageBody::default(),
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(error.error.code, "EMPTY_MESSAGE");
}

#[tokio::test]
async fn test_send_to_self_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{}/messages", alice.id),
            &alice.token,
            &SendMessageBody::text("note to self"),
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(error.error.code, "SELF_MESSAGE");
}

#[tokio::test]
async fn test_overlong_text_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{}/messages", bob.id),
            &alice.token,
            &SendMessageBody::text(&"x".repeat(4097)),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_hosted_image_passes_through() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();

    let url = "https://images.example.com/cat.png";
    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{}/messages", bob.id),
            &alice.token,
            &SendMessageBody::hosted_image(url),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(message.image_url.as_deref(), Some(url));
    assert!(message.text.is_empty());
}

// ============================================================================
// Conversation Tests
// ============================================================================

#[tokio::test]
async fn test_history_flips_seen_for_reader() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();

    for text in ["first", "second"] {
        let response = server
            .post_auth(
                &format!("/api/v1/conversations/{}/messages", bob.id),
                &alice.token,
                &SendMessageBody::text(text),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    // First read returns the pre-read flags
    let response = server
        .get_auth(
            &format!("/api/v1/conversations/{}/messages", alice.id),
            &bob.token,
        )
        .await
        .unwrap();
    let first_read: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(first_read.len(), 2);
    assert_eq!(first_read[0].text, "first");
    assert!(first_read.iter().all(|m| !m.seen));

    // Second read observes the flip
    let response = server
        .get_auth(
            &format!("/api/v1/conversations/{}/messages", alice.id),
            &bob.token,
        )
        .await
        .unwrap();
    let second_read: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(second_read.iter().all(|m| m.seen));
}

#[tokio::test]
async fn test_unread_counts_in_sidebar() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();

    for text in ["one", "two", "three"] {
        server
            .post_auth(
                &format!("/api/v1/conversations/{}/messages", bob.id),
                &alice.token,
                &SendMessageBody::text(text),
            )
            .await
            .unwrap();
    }

    let response = server
        .get_auth("/api/v1/conversations", &bob.token)
        .await
        .unwrap();
    let sidebar: ConversationListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(sidebar.users.iter().any(|u| u.id == alice.id.to_string()));
    assert_eq!(sidebar.unread_counts.get(&alice.id.to_string()), Some(&3));

    // Reading the conversation clears the counter
    server
        .get_auth(
            &format!("/api/v1/conversations/{}/messages", alice.id),
            &bob.token,
        )
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/conversations", &bob.token)
        .await
        .unwrap();
    let sidebar: ConversationListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!sidebar.unread_counts.contains_key(&alice.id.to_string()));
}

// ============================================================================
// Unsend Tests
// ============================================================================

#[tokio::test]
async fn test_unsend_message() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{}/messages", bob.id),
            &alice.token,
            &SendMessageBody::text("oops"),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/messages/{}", message.id), &alice.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Gone from the receiver's history
    let response = server
        .get_auth(
            &format!("/api/v1/conversations/{}/messages", alice.id),
            &bob.token,
        )
        .await
        .unwrap();
    let history: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(history.iter().all(|m| m.id != message.id));
}

#[tokio::test]
async fn test_unsend_requires_sender() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{}/messages", bob.id),
            &alice.token,
            &SendMessageBody::text("mine"),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/messages/{}", message.id), &bob.token)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();

    assert_eq!(error.error.code, "NOT_MESSAGE_SENDER");
}

// ============================================================================
// Seen Acknowledgement Tests
// ============================================================================

#[tokio::test]
async fn test_mark_seen_receiver_only() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{}/messages", bob.id),
            &alice.token,
            &SendMessageBody::text("read me"),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // The sender cannot acknowledge their own message
    let response = server
        .put_auth(
            &format!("/api/v1/messages/{}/seen", message.id),
            &alice.token,
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "NOT_MESSAGE_RECEIVER");

    let response = server
        .put_auth(&format!("/api/v1/messages/{}/seen", message.id), &bob.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}
