use std::sync::Arc;

use quiz_core::model::{LoginRequest, QuizId};
use storage::Storage;
use storage::StorageError;
use storage::repository::InMemoryRepository;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves one canned response and hands back the raw request it received.
async fn one_shot(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = vec![0_u8; 8192];
        let mut request = Vec::new();
        loop {
            let read = socket.read(&mut buf).await.expect("read");
            request.extend_from_slice(&buf[..read]);
            let text = String::from_utf8_lossy(&request);
            if read == 0 || headers_complete(&text) {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).into_owned()
    });
    (format!("http://{addr}/api/"), handle)
}

fn headers_complete(text: &str) -> bool {
    let Some((head, rest)) = text.split_once("\r\n\r\n") else {
        return false;
    };
    let length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    rest.len() >= length
}

fn storage_for(url: &str) -> Storage {
    Storage::http(url, Arc::new(InMemoryRepository::new())).expect("storage")
}

#[tokio::test]
async fn quiz_fetch_sends_bearer_and_decodes_body() {
    let (url, server) = one_shot(
        "200 OK",
        r#"{"quizId":3,"quizText":"Rust","questions":[{"questionId":1,"questionText":"Q","options":[{"optionId":9,"optionText":"A"}]}]}"#,
    )
    .await;
    let storage = storage_for(&url);
    storage.bearer.set("abc.def");

    let quiz = storage.quizzes.get_quiz(QuizId::new(3)).await.unwrap();
    assert_eq!(quiz.title(), "Rust");
    assert_eq!(quiz.question_count(), 1);

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/quizzes/3 "));
    assert!(request.to_lowercase().contains("authorization: bearer abc.def"));
}

#[tokio::test]
async fn unauthorized_status_maps_to_typed_error() {
    let (url, server) = one_shot("401 Unauthorized", r#"{"message":"Bad credentials"}"#).await;
    let storage = storage_for(&url);

    let err = storage
        .auth
        .login(&LoginRequest {
            username: "ana".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Unauthorized));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/auth/login "));
    assert!(!request.to_lowercase().contains("authorization:"));
}

#[tokio::test]
async fn undecodable_body_is_serialization_error() {
    let (url, server) = one_shot("200 OK", r#"{"unexpected":true}"#).await;
    let storage = storage_for(&url);

    let err = storage.quizzes.list_quizzes().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn unreachable_backend_is_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let storage = storage_for(&format!("http://{addr}/api/"));
    let err = storage.quizzes.list_quiz_names().await.unwrap_err();
    assert!(matches!(err, StorageError::Connection(_)));
}
