//! ReqwestTransport tests using wiremock.
//!
//! These tests verify the request the adapter sends to
//! POST /api/conversations/{id}/messages and that a session driven through
//! it sees the streamed reply.

use std::sync::Arc;

use chatstream::adapters::ReqwestTransport;
use chatstream::config::ClientConfig;
use chatstream::error::ChatErrorKind;
use chatstream::models::SendMessageRequest;
use chatstream::session::{ChatSession, SendOutcome};
use chatstream::traits::ChatTransport;
use futures::StreamExt;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse_body() -> String {
    concat!(
        "event: token\ndata: {\"content\":\"Hello \"}\n\n",
        "event: ping\ndata: {}\n\n",
        "event: token\ndata: {\"content\":\"world\"}\n\n",
        "event: done\ndata: {\"messageId\":\"m1\",\"tokensUsed\":10}\n\n",
    )
    .to_string()
}

fn transport_for(server: &MockServer, config: ClientConfig) -> ReqwestTransport {
    ReqwestTransport::new(config.with_base_url(server.uri())).unwrap()
}

#[tokio::test]
async fn test_start_stream_sends_expected_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/conversations/conv-1/messages"))
        .and(header("Accept", "text/event-stream"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(serde_json::json!({
            "content": "Hi",
            "allowWriteOperations": true
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse_body()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server, ClientConfig::new().with_auth_token("test-token"));
    let request = SendMessageRequest::new("Hi").with_write_operations(true);
    let response = transport.start_stream("conv-1", &request).await.unwrap();

    assert_eq!(response.status, 200);
    let chunks: Vec<_> = response.body.unwrap().collect().await;
    let body: Vec<u8> = chunks
        .into_iter()
        .flat_map(|chunk| chunk.unwrap().to_vec())
        .collect();
    assert_eq!(String::from_utf8(body).unwrap(), sse_body());
}

#[tokio::test]
async fn test_non_success_status_has_no_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/conversations/conv-1/messages"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&server)
        .await;

    let transport = transport_for(&server, ClientConfig::new());
    let response = transport
        .start_stream("conv-1", &SendMessageRequest::new("Hi"))
        .await
        .unwrap();

    assert_eq!(response.status, 503);
    assert!(response.body.is_none());
}

#[tokio::test]
async fn test_session_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/conversations/conv-1/messages"))
        .and(body_json(serde_json::json!({ "content": "Hi" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse_body()),
        )
        .mount(&server)
        .await;

    let transport = transport_for(&server, ClientConfig::new());
    let mut session = ChatSession::new(Arc::new(transport));

    let outcome = session.send_message("conv-1", "Hi").await;

    assert_eq!(outcome, SendOutcome::Completed);
    assert_eq!(session.assembled_content(), "Hello world");
    assert_eq!(session.messages()[1].server_id.as_deref(), Some("m1"));
}

#[tokio::test]
async fn test_session_over_http_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let transport = transport_for(&server, ClientConfig::new());
    let mut session = ChatSession::new(Arc::new(transport));

    let outcome = session.send_message("conv-1", "Hi").await;

    assert_eq!(outcome, SendOutcome::Failed(ChatErrorKind::Transport));
    assert_eq!(
        session.error().as_deref(),
        Some("Request failed with status 401")
    );
}
