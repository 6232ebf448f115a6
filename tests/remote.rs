use riskbrief::llm::{build_request, ChatTransport, OpenAiTransport, OPENAI_CHAT_URL};
use riskbrief::pipeline::{AnalysisPipeline, ConsoleNotifier, DirectorySink};
use riskbrief::store::{load_saved_credential, SqliteStore};
use riskbrief::RiskbriefError;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Serve a single canned HTTP response and hand back the raw request
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{}/v1/chat/completions", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

fn local_transport(endpoint: &str) -> OpenAiTransport {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    OpenAiTransport::with_client(endpoint, client)
}

fn envelope_with(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }],
        "usage": { "total_tokens": 42 }
    })
    .to_string()
}

#[test]
fn test_default_endpoint() {
    assert_eq!(OpenAiTransport::new().endpoint(), OPENAI_CHAT_URL);
    assert_eq!(OPENAI_CHAT_URL, "https://api.openai.com/v1/chat/completions");
}

#[tokio::test]
async fn test_transport_sends_bearer_and_json_body() {
    let (endpoint, server) = serve_once("200 OK", envelope_with("{}")).await;
    let transport = local_transport(&endpoint);

    let reply = transport
        .post_chat("sk-test", &build_request("Acme"))
        .await
        .unwrap();
    assert_eq!(reply.status, 200);

    let raw = server.await.unwrap();
    let lower = raw.to_lowercase();
    assert!(lower.starts_with("post /v1/chat/completions"));
    assert!(lower.contains("authorization: bearer sk-test"));
    assert!(lower.contains("content-type: application/json"));

    let body_start = raw.find("\r\n\r\n").unwrap() + 4;
    let body: serde_json::Value = serde_json::from_str(&raw[body_start..]).unwrap();
    assert_eq!(body["model"], "gpt-4");
    assert_eq!(body["temperature"], 0.7);
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["messages"][0]["role"], "user");
    assert!(body["messages"][0]["content"]
        .as_str()
        .unwrap()
        .contains("on the company: \"Acme\"."));
}

#[tokio::test]
async fn test_transport_returns_error_status_and_body() {
    let (endpoint, server) = serve_once("401 Unauthorized", "invalid key".to_string()).await;
    let transport = local_transport(&endpoint);

    let reply = transport
        .post_chat("sk-bad", &build_request("Acme"))
        .await
        .unwrap();
    server.await.unwrap();

    assert_eq!(reply.status, 401);
    assert_eq!(reply.body, "invalid key");
    assert!(!reply.is_success());
}

#[tokio::test]
async fn test_transport_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = local_transport(&format!("http://{}/v1/chat/completions", addr));
    let err = transport
        .post_chat("sk-test", &build_request("Acme"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RiskbriefError::RemoteService { status: None, .. }
    ));
}

#[tokio::test]
async fn test_pipeline_writes_file_and_remembers_key() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("store.db");
    let output_dir = temp_dir.path().join("out");

    let (endpoint, server) = serve_once("200 OK", envelope_with("{\"risk_score\": 3}")).await;

    let store = Arc::new(SqliteStore::new(&store_path).await.unwrap());
    let pipeline = AnalysisPipeline::new(
        store,
        Arc::new(local_transport(&endpoint)),
        Arc::new(DirectorySink::new(&output_dir)),
        Arc::new(ConsoleNotifier),
    );

    let filename = pipeline.submit("Acme", " sk-live ").await.unwrap();
    server.await.unwrap();

    assert_eq!(filename, "Acme_analysis.json");
    assert!(!pipeline.is_loading());

    let written = std::fs::read_to_string(output_dir.join("Acme_analysis.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed, json!({ "risk_score": 3 }));

    // Next startup reads the key back
    drop(pipeline);
    let reopened = SqliteStore::new(&store_path).await.unwrap();
    assert_eq!(
        load_saved_credential(&reopened).await,
        Some("sk-live".to_string())
    );
}

#[tokio::test]
async fn test_pipeline_unauthorized_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("out");

    let (endpoint, server) = serve_once("401 Unauthorized", "invalid key".to_string()).await;

    let pipeline = AnalysisPipeline::new(
        Arc::new(SqliteStore::new(&temp_dir.path().join("store.db")).await.unwrap()),
        Arc::new(local_transport(&endpoint)),
        Arc::new(DirectorySink::new(&output_dir)),
        Arc::new(ConsoleNotifier),
    );

    let err = pipeline.submit("Acme", "sk-bad").await.unwrap_err();
    server.await.unwrap();

    let message = err.to_string();
    assert!(message.contains("401"));
    assert!(message.contains("invalid key"));
    assert!(!output_dir.join("Acme_analysis.json").exists());
    assert!(!pipeline.is_loading());
}
