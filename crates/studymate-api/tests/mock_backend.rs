//! Mock backend tests for the studymate-api crate.
//!
//! These tests use wiremock to simulate the backend and exercise the
//! session lifecycle, the pre-request authorization check and the domain
//! operations without network access or real credentials.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use studymate_api::{SessionProvider, SessionState};
use studymate_core::error::{AuthError, Error};
use studymate_core::quiz::AnswerSheet;
use studymate_core::{BaseUrl, Credentials, MemoryTokenStore, TokenPair, TokenStore};

/// Helper to create a base URL from a mock server.
fn mock_base_url(server: &MockServer) -> BaseUrl {
    // For tests, we need to allow HTTP localhost
    BaseUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

/// Build an unsigned JWT with the given subject and expiry.
fn make_jwt(sub: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::to_vec(&json!({"sub": sub, "username": sub, "exp": exp})).unwrap(),
    );
    format!("{header}.{payload}.signature")
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn provider_with_store(server: &MockServer) -> (SessionProvider, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    let provider = SessionProvider::new(
        mock_base_url(server),
        Arc::clone(&store) as Arc<dyn TokenStore>,
    );
    (provider, store)
}

/// Mount a login mock returning the given token pair.
async fn mount_login(server: &MockServer, access: &str, refresh: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": access,
            "refresh": refresh,
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Session Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn login_success_yields_authenticated_state() {
    let server = MockServer::start().await;
    let access = make_jwt("alice", now() + 3600);

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .and(body_json(json!({
            "username": "alice",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": access,
            "refresh": "refresh-token",
        })))
        .mount(&server)
        .await;

    let (provider, store) = provider_with_store(&server);
    provider.initialize().unwrap();
    assert_eq!(provider.state(), SessionState::Anonymous);

    let identity = provider
        .login(Credentials::new("alice", "secret123"))
        .await
        .unwrap();

    assert_eq!(identity.subject, "alice");
    assert!(provider.is_authenticated());
    assert_eq!(provider.identity().unwrap().subject, "alice");

    let pair = store.read().unwrap().unwrap();
    assert_eq!(pair.access.as_str(), access);
    assert_eq!(pair.refresh.as_str(), "refresh-token");
}

#[tokio::test]
async fn login_rejection_leaves_state_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials",
            "code": "no_active_account"
        })))
        .mount(&server)
        .await;

    let (provider, store) = provider_with_store(&server);
    provider.initialize().unwrap();

    let err = provider
        .login(Credentials::new("alice", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));
    assert_eq!(provider.state(), SessionState::Anonymous);
    assert!(store.read().unwrap().is_none());
}

#[tokio::test]
async fn register_success_performs_automatic_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register/"))
        .and(body_json(json!({
            "username": "bob",
            "email": "bob@example.com",
            "password": "pw"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "username": "bob",
            "email": "bob@example.com"
        })))
        .mount(&server)
        .await;

    mount_login(&server, &make_jwt("bob", now() + 3600), "refresh").await;

    let (provider, _store) = provider_with_store(&server);
    provider.initialize().unwrap();

    let identity = provider
        .register("bob", "bob@example.com", "pw")
        .await
        .unwrap();

    assert_eq!(identity.subject, "bob");
    assert!(provider.is_authenticated());
}

#[tokio::test]
async fn register_rejection_is_typed_and_changes_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "A user with that username already exists."
        })))
        .mount(&server)
        .await;

    let (provider, _store) = provider_with_store(&server);
    provider.initialize().unwrap();

    let err = provider
        .register("bob", "bob@example.com", "pw")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Auth(AuthError::RegistrationRejected { .. })
    ));
    assert_eq!(provider.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn logout_is_idempotent() {
    let server = MockServer::start().await;
    mount_login(&server, &make_jwt("alice", now() + 3600), "refresh").await;

    let (provider, store) = provider_with_store(&server);
    provider.initialize().unwrap();
    provider
        .login(Credentials::new("alice", "pw"))
        .await
        .unwrap();
    assert!(provider.is_authenticated());

    provider.logout();
    assert_eq!(provider.state(), SessionState::Anonymous);
    assert!(store.read().unwrap().is_none());

    provider.logout();
    assert_eq!(provider.state(), SessionState::Anonymous);
}

// ============================================================================
// Initialization Tests
// ============================================================================

#[tokio::test]
async fn initialize_restores_valid_persisted_session() {
    let server = MockServer::start().await;
    let (provider, store) = provider_with_store(&server);

    store
        .save(&TokenPair::new(make_jwt("carol", now() + 3600), "refresh"))
        .unwrap();

    provider.initialize().unwrap();
    assert_eq!(provider.identity().unwrap().subject, "carol");
}

#[tokio::test]
async fn initialize_clears_expired_token() {
    let server = MockServer::start().await;
    let (provider, store) = provider_with_store(&server);

    // Expired one second ago
    store
        .save(&TokenPair::new(make_jwt("carol", now() - 1), "refresh"))
        .unwrap();

    provider.initialize().unwrap();
    assert_eq!(provider.state(), SessionState::Anonymous);
    assert!(store.read().unwrap().is_none());
}

#[tokio::test]
async fn initialize_without_tokens_is_anonymous() {
    let server = MockServer::start().await;
    let (provider, _store) = provider_with_store(&server);

    provider.initialize().unwrap();
    assert_eq!(provider.state(), SessionState::Anonymous);
}

// ============================================================================
// Request Authorization Tests
// ============================================================================

#[tokio::test]
async fn authorized_request_carries_the_bearer_token() {
    let server = MockServer::start().await;
    let access = make_jwt("alice", now() + 3600);

    Mock::given(method("GET"))
        .and(path("/core/upload/"))
        .and(header("authorization", format!("Bearer {access}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "file": "pdfs/intro.pdf", "uploaded_at": "2024-05-01T10:00:00Z"}
        ])))
        .mount(&server)
        .await;

    let (provider, store) = provider_with_store(&server);
    store
        .save(&TokenPair::new(access.clone(), "refresh"))
        .unwrap();
    provider.initialize().unwrap();

    let documents = provider.list_documents().await.unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, 1);
}

#[tokio::test]
async fn expired_token_aborts_the_request_and_forces_logout() {
    let server = MockServer::start().await;

    // The dead session must be detected before transmission
    Mock::given(method("GET"))
        .and(path("/core/upload/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let (provider, store) = provider_with_store(&server);
    store
        .save(&TokenPair::new(make_jwt("alice", now() - 100), "refresh"))
        .unwrap();
    provider.initialize().unwrap();

    let err = provider.list_documents().await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::SessionExpired)));
    assert_eq!(provider.state(), SessionState::Anonymous);
    assert!(store.read().unwrap().is_none());
}

#[tokio::test]
async fn malformed_token_aborts_like_an_expired_one() {
    let server = MockServer::start().await;
    let (provider, store) = provider_with_store(&server);
    store
        .save(&TokenPair::new("three.word.garbage", "refresh"))
        .unwrap();
    provider.initialize().unwrap();

    let err = provider.list_documents().await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::SessionExpired)));
    assert!(store.read().unwrap().is_none());
}

#[tokio::test]
async fn logged_out_request_is_sent_without_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/upload/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Authentication credentials were not provided."
        })))
        .mount(&server)
        .await;

    let (provider, _store) = provider_with_store(&server);
    provider.initialize().unwrap();

    let err = provider.list_documents().await.unwrap_err();
    let Error::Api(api) = err else {
        panic!("expected API error, got {err:?}");
    };
    assert_eq!(api.status, 401);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

// ============================================================================
// Domain Operation Tests
// ============================================================================

async fn logged_in_provider(server: &MockServer) -> SessionProvider {
    let (provider, store) = provider_with_store(server);
    store
        .save(&TokenPair::new(make_jwt("alice", now() + 3600), "refresh"))
        .unwrap();
    provider.initialize().unwrap();
    provider
}

#[tokio::test]
async fn upload_document_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/core/upload/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "pdf_id": 9,
            "filename": "notes.pdf",
            "pages": 12,
            "text_length": 54321,
            "id": 9,
            "file": "pdfs/notes.pdf",
            "uploaded_at": "2024-05-01T10:00:00Z"
        })))
        .mount(&server)
        .await;

    let provider = logged_in_provider(&server).await;
    let output = provider
        .upload_document("notes.pdf", b"%PDF-1.4 fake".to_vec())
        .await
        .unwrap();

    assert_eq!(output.pdf_id, 9);
    assert_eq!(output.pages, 12);
}

#[tokio::test]
async fn delete_document_hits_the_id_path() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/core/documents/9/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let provider = logged_in_provider(&server).await;
    provider.delete_document(9).await.unwrap();
}

#[tokio::test]
async fn note_fetch_and_save() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/notes/"))
        .and(query_param("pdf_id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "chapter one summary",
            "updated_at": "2024-05-01T10:00:00Z"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/core/notes/"))
        .and(body_json(json!({"pdf_id": 3, "content": "revised"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "saved",
            "updated_at": "2024-05-01T11:00:00Z"
        })))
        .mount(&server)
        .await;

    let provider = logged_in_provider(&server).await;

    let note = provider.note(3).await.unwrap();
    assert_eq!(note.content, "chapter one summary");

    let saved = provider.save_note(3, "revised").await.unwrap();
    assert_eq!(saved.status, "saved");
}

#[tokio::test]
async fn chat_history_and_send() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/core/chat/"))
        .and(query_param("pdf_id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"role": "user", "content": "What is a borrow?", "created_at": null},
            {"role": "assistant", "content": "A reference...", "created_at": null}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/core/chat/"))
        .and(body_json(json!({"pdf_id": 3, "message": "And lifetimes?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Lifetimes bound references."
        })))
        .mount(&server)
        .await;

    let provider = logged_in_provider(&server).await;

    let history = provider.chat_history(3).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, "user");

    let reply = provider.send_message(3, "And lifetimes?").await.unwrap();
    assert_eq!(reply, "Lifetimes bound references.");
}

#[tokio::test]
async fn generate_quiz_parses_the_string_payload() {
    let server = MockServer::start().await;

    let quiz_json = json!({
        "questions": [
            {
                "question": "What does `?` do?",
                "options": {"A": "panics", "B": "propagates errors", "C": "loops", "D": "ignores"},
                "correct_answer": "B"
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/core/generate/quiz/"))
        .and(body_json(json!({
            "pdf_id": 3,
            "num_questions": 5,
            "topic": "error handling"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quiz": quiz_json.to_string()
        })))
        .mount(&server)
        .await;

    let provider = logged_in_provider(&server).await;
    let quiz = provider.generate_quiz(3, 5, "error handling").await.unwrap();

    assert_eq!(quiz.len(), 1);
    assert_eq!(quiz.questions[0].correct_answer, "B");
}

#[tokio::test]
async fn generate_flashcards_parses_the_string_payload() {
    let server = MockServer::start().await;

    let cards_json = json!({
        "flashcards": [
            {"front": "Ownership", "back": "Each value has one owner"},
            {"front": "Borrowing", "back": "References without ownership"}
        ]
    });

    Mock::given(method("POST"))
        .and(path("/core/generate/flashcards/"))
        .and(body_json(json!({"pdf_id": 3, "num_cards": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "flashcards": cards_json.to_string()
        })))
        .mount(&server)
        .await;

    let provider = logged_in_provider(&server).await;
    let cards = provider.generate_flashcards(3, 10).await.unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].front, "Ownership");
}

#[tokio::test]
async fn score_and_submit_sends_the_computed_score() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/core/submit/quiz/"))
        .and(body_json(json!({"score": 4, "total_questions": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Quiz submitted successfully",
            "xp_earned": 40,
            "new_xp": 140,
            "new_rank": "Apprentice"
        })))
        .mount(&server)
        .await;

    let quiz_json = json!({
        "questions": (0..5).map(|i| json!({
            "question": format!("Q{i}"),
            "options": {"A": "a", "B": "b", "C": "c", "D": "d"},
            "correct_answer": "A"
        })).collect::<Vec<_>>()
    });
    let quiz = studymate_core::Quiz::from_generated(&quiz_json.to_string()).unwrap();

    let mut answers = AnswerSheet::new();
    for i in 0..4 {
        answers.answer(i, "A");
    }
    answers.answer(4, "D");

    let provider = logged_in_provider(&server).await;
    let (score, reward) = provider.score_and_submit(&quiz, &answers).await.unwrap();

    assert_eq!(score, 4);
    assert_eq!(reward.xp_earned, 40);
    assert_eq!(reward.new_rank, "Apprentice");
}

#[tokio::test]
async fn incomplete_quiz_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/core/submit/quiz/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let quiz_json = json!({
        "questions": [
            {"question": "Q0", "options": {"A": "a"}, "correct_answer": "A"},
            {"question": "Q1", "options": {"A": "a"}, "correct_answer": "A"}
        ]
    });
    let quiz = studymate_core::Quiz::from_generated(&quiz_json.to_string()).unwrap();

    let mut answers = AnswerSheet::new();
    answers.answer(0, "A");

    let provider = logged_in_provider(&server).await;
    let err = provider.score_and_submit(&quiz, &answers).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn profile_and_leaderboard() {
    let server = MockServer::start().await;

    let profile = json!({
        "username": "alice",
        "xp": 140,
        "weekly_xp": 40,
        "level": 2,
        "rank": "Apprentice",
        "achievements": [
            {"name": "First Quiz", "description": "Completed a quiz", "icon": "trophy", "earned_at": null}
        ],
        "quiz_history": [
            {"score": 4, "total_questions": 5, "xp_earned": 40, "created_at": null}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/gamification/profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&profile))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gamification/leaderboard/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([&profile])))
        .mount(&server)
        .await;

    let provider = logged_in_provider(&server).await;

    let me = provider.profile().await.unwrap();
    assert_eq!(me.rank, "Apprentice");
    assert_eq!(me.quiz_history.len(), 1);

    let board = provider.leaderboard().await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].username, "alice");
}
