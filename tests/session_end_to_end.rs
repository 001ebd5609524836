//! End-to-end tests: session orchestrator over the real client and a mock backend.

use std::sync::{Arc, Mutex};

use reviewdash::{
    BackendCall, ClientConfig, ClientLogger, Error, FileHandle, Mode, RequestStatus,
    ReviewClient, Session, SubmitOutcome,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingLogger {
    events: Mutex<Vec<String>>,
}

impl ClientLogger for RecordingLogger {
    fn log_request(&self, call: &BackendCall) {
        self.events
            .lock()
            .unwrap()
            .push(format!("request {}", call.operation()));
    }

    fn log_response(&self, mode: Mode, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("response {mode} {text}"));
    }

    fn log_error(&self, mode: Mode, error: &Error) {
        self.events
            .lock()
            .unwrap()
            .push(format!("error {mode} {}", error.message()));
    }
}

#[tokio::test]
async fn repository_review_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/full-code-review"))
        .and(body_json(json!({"repo_url": "https://github.com/u/r"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"full_code_review": "report"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let logger = Arc::new(RecordingLogger::default());
    let client = ReviewClient::new(&ClientConfig::new(server.uri()))
        .unwrap()
        .with_logger(logger.clone());
    let mut session = Session::new(client);

    session.set_mode(Mode::RepositoryReview);
    session.set_repository_url("https://github.com/u/r");
    assert_eq!(session.submit().await, SubmitOutcome::Succeeded);

    let state = session.state();
    assert_eq!(state.result_text(), Some("report"));
    assert_eq!(state.request_status(), RequestStatus::Succeeded);
    assert!(state.error_message().is_none());

    assert_eq!(
        *logger.events.lock().unwrap(),
        vec![
            "request repo".to_string(),
            "response repo report".to_string()
        ]
    );
}

#[tokio::test]
async fn backend_detail_becomes_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"detail": "GROQ_API_KEY missing"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut session = Session::new(ReviewClient::new(&ClientConfig::new(server.uri())).unwrap());
    session.set_chat_input("hello");
    assert_eq!(session.submit().await, SubmitOutcome::Failed);

    let state = session.state();
    assert_eq!(state.error_message(), Some("GROQ_API_KEY missing"));
    assert_eq!(state.request_status(), RequestStatus::Failed);
    assert!(state.result_text().is_none());
}

#[tokio::test]
async fn blank_chat_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "unused"})))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = Session::new(ReviewClient::new(&ClientConfig::new(server.uri())).unwrap());
    session.set_chat_input("   \n");
    assert!(matches!(session.submit().await, SubmitOutcome::Ignored(_)));
    assert_eq!(session.state().request_status(), RequestStatus::Idle);
}

#[tokio::test]
async fn file_analysis_reads_files_at_dispatch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/explain-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"analysis": "two files"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = std::env::temp_dir().join(format!("reviewdash-e2e-{}", std::process::id()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let first = dir.join("a.py");
    let second = dir.join("b.py");

    let mut session = Session::new(ReviewClient::new(&ClientConfig::new(server.uri())).unwrap());
    session.set_mode(Mode::FileAnalysis);
    session.select_files(vec![
        FileHandle::from_path(&first),
        FileHandle::from_path(&second),
    ]);

    // Content written after selection is what gets uploaded.
    tokio::fs::write(&first, "print('first')").await.unwrap();
    tokio::fs::write(&second, "print('second')").await.unwrap();

    assert_eq!(session.submit().await, SubmitOutcome::Succeeded);
    assert_eq!(session.state().result_text(), Some("two files"));

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    let a = body.find("print('first')").expect("first content");
    let b = body.find("print('second')").expect("second content");
    assert!(a < b);

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn missing_file_fails_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/explain-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"analysis": "unused"})))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = Session::new(ReviewClient::new(&ClientConfig::new(server.uri())).unwrap());
    session.set_mode(Mode::FileAnalysis);
    session.add_file(FileHandle::from_bytes("a.py", "x"));
    session.add_file(FileHandle::from_path("/definitely/not/here.py"));

    assert_eq!(session.submit().await, SubmitOutcome::Failed);
    let message = session.state().error_message().unwrap();
    assert!(message.contains("here.py"));
}

#[tokio::test]
async fn unreachable_backend_fails_with_transport_message() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = ReviewClient::new(&ClientConfig::new(format!("http://127.0.0.1:{port}"))).unwrap();
    let mut session = Session::new(client);
    session.set_chat_input("anyone there?");
    assert_eq!(session.submit().await, SubmitOutcome::Failed);
    assert_eq!(session.state().request_status(), RequestStatus::Failed);
    assert!(session.state().error_message().is_some());
}
