// tests/http_clients.rs

mod common;
use crate::common::{StubServer, init_tracing, with_timeout};

use std::error::Error;
use std::time::Duration;

use serde_json::{Value, json};

use jsonsmith::errors::JsonsmithError;
use jsonsmith::exec::{ExecRequest, RizaSandbox, SandboxClient};
use jsonsmith::provider::{LlmProvider, LlmRequest, OpenAiProvider, ProviderError};

type TestResult = Result<(), Box<dyn Error>>;

const TIMEOUT: Duration = Duration::from_secs(5);

fn script_request() -> ExecRequest {
    ExecRequest {
        language: "PYTHON".to_string(),
        code: "print(1)".to_string(),
        stdin: "{\"a\": 1}".to_string(),
    }
}

#[tokio::test]
async fn completion_is_decoded_from_first_choice() -> TestResult {
    init_tracing();

    let server = StubServer::respond(
        200,
        r#"{"choices":[{"message":{"role":"assistant","content":" .a "}}]}"#,
    )
    .await?;
    let provider = OpenAiProvider::new(server.url(), None, "gpt-4o-mini", TIMEOUT)?;

    let request = LlmRequest::new("sys", "field a").with_temperature(Some(0.5));
    let response = with_timeout(provider.complete(&request)).await?;
    assert_eq!(response.content, " .a ");

    let sent = server.request().await;
    assert_eq!(sent.method, "POST");
    assert_eq!(sent.path, "/chat/completions");

    let body: Value = serde_json::from_slice(&sent.body)?;
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["messages"][0], json!({"role": "system", "content": "sys"}));
    assert_eq!(body["messages"][1], json!({"role": "user", "content": "field a"}));
    assert_eq!(body["temperature"], 0.5);
    assert_eq!(body["stream"], false);
    Ok(())
}

#[tokio::test]
async fn no_key_means_no_authorization_header() -> TestResult {
    init_tracing();

    let server = StubServer::respond(200, r#"{"choices":[{"message":{"content":"."}}]}"#).await?;
    let provider = OpenAiProvider::new(server.url(), None, "m", TIMEOUT)?;

    with_timeout(provider.complete(&LlmRequest::new("s", "p"))).await?;

    assert_eq!(server.request().await.header("authorization"), None);
    Ok(())
}

#[tokio::test]
async fn key_is_sent_as_bearer_token() -> TestResult {
    init_tracing();

    let server = StubServer::respond(200, r#"{"choices":[{"message":{"content":"."}}]}"#).await?;
    let provider = OpenAiProvider::new(server.url(), Some("sk-test".to_string()), "m", TIMEOUT)?;

    with_timeout(provider.complete(&LlmRequest::new("s", "p"))).await?;

    assert_eq!(server.request().await.header("authorization"), Some("Bearer sk-test"));
    Ok(())
}

#[tokio::test]
async fn error_status_carries_status_and_body() -> TestResult {
    init_tracing();

    let server = StubServer::respond(500, r#"{"error":"model overloaded"}"#).await?;
    let provider = OpenAiProvider::new(server.url(), None, "m", TIMEOUT)?;

    match with_timeout(provider.complete(&LlmRequest::new("s", "p"))).await {
        Err(ProviderError::ProviderError(msg)) => {
            assert!(msg.starts_with("HTTP 500"), "got: {msg}");
            assert!(msg.contains("model overloaded"), "got: {msg}");
        }
        Err(e) => panic!("Expected ProviderError, got: {:?}", e),
        Ok(r) => panic!("Expected error, got: {:?}", r),
    }
    Ok(())
}

#[tokio::test]
async fn sandbox_posts_script_with_bearer_key() -> TestResult {
    init_tracing();

    let server =
        StubServer::respond(200, r#"{"exit_code":3,"stdout":"1\n","stderr":"warn\n"}"#).await?;
    let sandbox =
        RizaSandbox::new(server.url(), Some("riza-key".to_string()), "LLM_RIZA_KEY", TIMEOUT)?;

    let response = with_timeout(sandbox.execute(&script_request())).await?;
    assert_eq!(response.exit_code, 3);
    assert_eq!(response.stdout, "1\n");
    assert_eq!(response.stderr, "warn\n");

    let sent = server.request().await;
    assert_eq!(sent.method, "POST");
    assert_eq!(sent.path, "/v1/execute");
    assert_eq!(sent.header("authorization"), Some("Bearer riza-key"));

    let body: Value = serde_json::from_slice(&sent.body)?;
    assert_eq!(
        body,
        json!({"language": "PYTHON", "code": "print(1)", "stdin": "{\"a\": 1}"})
    );
    Ok(())
}

#[tokio::test]
async fn sandbox_error_status_is_a_sandbox_error() -> TestResult {
    init_tracing();

    let server = StubServer::respond(502, "upstream unavailable").await?;
    let sandbox = RizaSandbox::new(server.url(), Some("k".to_string()), "LLM_RIZA_KEY", TIMEOUT)?;

    match with_timeout(sandbox.execute(&script_request())).await {
        Err(JsonsmithError::Sandbox(msg)) => {
            assert!(msg.starts_with("HTTP 502"), "got: {msg}");
            assert!(msg.contains("upstream unavailable"), "got: {msg}");
        }
        Err(e) => panic!("Expected Sandbox error, got: {:?}", e),
        Ok(r) => panic!("Expected error, got: {:?}", r),
    }
    Ok(())
}
