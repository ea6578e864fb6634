//! HTTP contract tests for the notes API client.
//!
//! Each test stands up a mock server and checks the request shape the client
//! sends and how it categorizes the server's answer.

use jotter_client::{ApiClient, ClientConfig};
use jotter_core::{CreateNoteRequest, Error, LoginRequest, NotesApi, RegisterRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new(server.uri())).expect("Failed to create client")
}

fn create_request(title: &str, content: &str, tags: &[&str]) -> CreateNoteRequest {
    CreateNoteRequest {
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

// =============================================================================
// AUTH
// =============================================================================

#[tokio::test]
async fn test_login_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ann@example.com", "password": "pw"})))
        .and(header_exists("X-Request-Id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server)
        .login(&LoginRequest {
            email: "ann@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(token.token, "tok-1");
}

#[tokio::test]
async fn test_login_invalid_credentials_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login(&LoginRequest {
            email: "ann@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        Error::Auth(msg) => assert_eq!(msg, "Invalid credentials"),
        other => panic!("Expected Auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_register_duplicate_email_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "name": "Ann",
            "email": "ann@example.com",
            "password": "pw"
        })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "User already exists"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .register(&RegisterRequest {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap_err();

    assert!(err.is_auth());
    assert!(err.to_string().contains("User already exists"));
}

#[tokio::test]
async fn test_register_without_error_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .register(&RegisterRequest {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        Error::Auth(msg) => assert_eq!(msg, "Something went wrong"),
        other => panic!("Expected Auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_success_without_token_is_shape_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {"id": 1}})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login(&LoginRequest {
            email: "a@b.c".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DataShape(_)));
}

// =============================================================================
// LIST
// =============================================================================

#[tokio::test]
async fn test_list_sends_bearer_and_tag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .and(query_param("tag", "work"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notes": [
                {"_id": "n2", "title": "Standup", "content": "notes", "tags": ["work"]},
                {"_id": "n1", "title": "Retro", "content": "", "tags": ["work", "team"]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let notes = client_for(&server)
        .list_notes(Some("tok-1"), Some("work"))
        .await
        .unwrap();

    let ids: Vec<_> = notes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["n2", "n1"]);
    assert_eq!(notes[1].tags, vec!["work", "team"]);
}

#[tokio::test]
async fn test_list_without_tag_sends_no_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"notes": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.list_notes(Some("tok"), None).await.unwrap();

    let requests: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_list_tag_is_url_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .and(query_param("tag", "to do & more"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"notes": []})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .list_notes(Some("tok"), Some("to do & more"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_without_token_omits_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"notes": []})))
        .mount(&server)
        .await;

    client_for(&server).list_notes(None, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_list_non_array_notes_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"notes": "not-an-array"})),
        )
        .mount(&server)
        .await;

    let notes = client_for(&server).list_notes(Some("tok"), None).await.unwrap();
    assert!(notes.is_empty());
}

#[tokio::test]
async fn test_list_normalizes_partial_notes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notes": [
                {"_id": "n1", "title": "No content", "tags": null},
                {"title": "ghost without id"}
            ]
        })))
        .mount(&server)
        .await;

    let notes = client_for(&server).list_notes(Some("tok"), None).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "");
    assert!(notes[0].tags.is_empty());
}

#[tokio::test]
async fn test_list_unparseable_body_is_shape_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_notes(Some("tok"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DataShape(_)));
}

#[tokio::test]
async fn test_list_server_error_is_categorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db down"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_notes(Some("tok"), None)
        .await
        .unwrap_err();
    match err {
        Error::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "db down");
        }
        other => panic!("Expected Server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_expired_token_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "jwt expired"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_notes(Some("stale"), None)
        .await
        .unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = ApiClient::new(ClientConfig::new(uri)).unwrap();
    let err = client.list_notes(Some("tok"), None).await.unwrap_err();
    assert!(matches!(err, Error::Network(_)), "got {:?}", err);
}

// =============================================================================
// CREATE
// =============================================================================

#[tokio::test]
async fn test_create_sends_parsed_tags_and_returns_server_note() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .and(header("Authorization", "Bearer tok"))
        .and(body_json(json!({
            "title": "Groceries",
            "content": "",
            "tags": ["food", "urgent"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "success",
            "note": {
                "_id": "66f0c1",
                "title": "Groceries",
                "content": "",
                "tags": ["food", "urgent"],
                "user": "u1"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let note = client_for(&server)
        .create_note(Some("tok"), &create_request("Groceries", "", &["food", "urgent"]))
        .await
        .unwrap();

    assert_eq!(note.id, "66f0c1");
    assert_eq!(note.tags, vec!["food", "urgent"]);
}

#[tokio::test]
async fn test_create_empty_title_never_hits_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_note(Some("tok"), &create_request("   ", "body", &[]))
        .await
        .unwrap_err();

    match err {
        Error::Validation(msg) => assert_eq!(msg, "Title is required."),
        other => panic!("Expected Validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_response_without_id_is_shape_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "success",
            "note": {"title": "Groceries"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_note(Some("tok"), &create_request("Groceries", "", &[]))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Malformed response: Invalid note from server");
}

#[tokio::test]
async fn test_create_server_failure_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_note(Some("tok"), &create_request("x", "", &[]))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

// =============================================================================
// DELETE
// =============================================================================

#[tokio::test]
async fn test_delete_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/notes/n1"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete_note(Some("tok"), "n1")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_already_deleted_is_ok() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/notes/n1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Not found"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete_note(Some("tok"), "n1").await.unwrap();
    client.delete_note(Some("tok"), "n1").await.unwrap();
}

#[tokio::test]
async fn test_delete_failure_is_categorized() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/notes/n1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .delete_note(Some("tok"), "n1")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_delete_empty_id_is_rejected_locally() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .delete_note(Some("tok"), "")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// =============================================================================
// ROUND TRIP
// =============================================================================

#[tokio::test]
async fn test_created_note_matches_next_listing() {
    let server = MockServer::start().await;
    let stored = json!({
        "_id": "abc",
        "title": "Groceries",
        "content": "milk",
        "tags": ["food", "urgent"]
    });
    Mock::given(method("POST"))
        .and(path("/notes"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"status": "success", "note": stored.clone()})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"notes": [stored]})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .create_note(Some("tok"), &create_request("Groceries", "milk", &["food", "urgent"]))
        .await
        .unwrap();
    let listed = client.list_notes(Some("tok"), None).await.unwrap();

    assert_eq!(listed, vec![created]);
}
