// src/exec/sandbox.rs

//! Remote sandbox executor for generated scripts.
//!
//! Unlike the filter engine nothing streams here: the whole input is
//! buffered, submitted with the script in one request, and the captured
//! stdout/stderr come back once the remote run has finished.

use std::io::ErrorKind;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use super::RunOutcome;
use crate::errors::{JsonsmithError, Result};

/// What the sandbox is asked to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecRequest {
    /// Interpreter name as the service spells it, e.g. `PYTHON`.
    pub language: String,
    pub code: String,
    pub stdin: String,
}

/// Captured result of a remote run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecResponse {
    pub exit_code: i32,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
}

/// A remote code-execution service.
#[async_trait]
pub trait SandboxClient: Send + Sync {
    async fn execute(&self, request: &ExecRequest) -> Result<ExecResponse>;
}

/// Client for the Riza code-execution API (`POST /v1/execute`).
///
/// The API key is only demanded when a script is actually submitted, so
/// output-only runs work without one.
pub struct RizaSandbox {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl RizaSandbox {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        api_key_env: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JsonsmithError::Sandbox(format!("building HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            api_key_env: api_key_env.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/execute", self.base_url)
    }
}

#[async_trait]
impl SandboxClient for RizaSandbox {
    async fn execute(&self, request: &ExecRequest) -> Result<ExecResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| JsonsmithError::MissingKey {
            name: "sandbox".to_string(),
            env: self.api_key_env.clone(),
        })?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| JsonsmithError::Sandbox(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(JsonsmithError::Sandbox(format!("HTTP {}: {}", status, body)));
        }

        response
            .json::<ExecResponse>()
            .await
            .map_err(|e| JsonsmithError::Sandbox(format!("decoding response: {e}")))
    }
}

/// Run `program` remotely against `sample` followed by the rest of `input`.
///
/// Captured stdout and stderr are forwarded verbatim when non-empty; the
/// outcome carries the remote exit status.
pub async fn run_script<I, O, E>(
    sandbox: &dyn SandboxClient,
    language: &str,
    program: &str,
    sample: &[u8],
    input: Option<&mut I>,
    stdout: &mut O,
    stderr: &mut E,
) -> Result<RunOutcome>
where
    I: AsyncRead + Unpin + ?Sized,
    O: AsyncWrite + Unpin + ?Sized,
    E: AsyncWrite + Unpin + ?Sized,
{
    let mut buffered = sample.to_vec();
    if let Some(input) = input {
        input.read_to_end(&mut buffered).await?;
    }

    // Decode after joining so a multi-byte character split by the sample
    // boundary survives.
    let request = ExecRequest {
        language: language.to_string(),
        code: program.to_string(),
        stdin: String::from_utf8_lossy(&buffered).into_owned(),
    };

    info!(language, stdin_len = request.stdin.len(), "submitting script to sandbox");
    let response = sandbox.execute(&request).await?;
    debug!(exit_code = response.exit_code, "sandbox run finished");

    if !response.stdout.is_empty() {
        let written = async {
            stdout.write_all(response.stdout.as_bytes()).await?;
            stdout.flush().await
        }
        .await;
        match written {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::BrokenPipe => return Ok(RunOutcome::BrokenPipe),
            Err(e) => return Err(e.into()),
        }
    }

    if !response.stderr.is_empty() {
        stderr.write_all(response.stderr.as_bytes()).await?;
        stderr.flush().await?;
    }

    Ok(RunOutcome::Exited(response.exit_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_api_shape() {
        let req = ExecRequest {
            language: "PYTHON".into(),
            code: "print(1)".into(),
            stdin: "{}".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"language": "PYTHON", "code": "print(1)", "stdin": "{}"}));
    }

    #[test]
    fn response_tolerates_missing_streams() {
        let resp: ExecResponse = serde_json::from_str(r#"{"exit_code": 2}"#).unwrap();
        assert_eq!(resp.exit_code, 2);
        assert!(resp.stdout.is_empty() && resp.stderr.is_empty());
    }

    #[test]
    fn endpoint_joins_base_url() {
        let sandbox =
            RizaSandbox::new("https://api.riza.io/", Some("k".into()), "KEY", Duration::from_secs(1))
                .unwrap();
        assert_eq!(sandbox.endpoint(), "https://api.riza.io/v1/execute");
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let sandbox =
            RizaSandbox::new("http://127.0.0.1:9", None, "LLM_RIZA_KEY", Duration::from_secs(1))
                .unwrap();
        let request = ExecRequest {
            language: "PYTHON".into(),
            code: String::new(),
            stdin: String::new(),
        };
        match sandbox.execute(&request).await {
            Err(JsonsmithError::MissingKey { env, .. }) => assert_eq!(env, "LLM_RIZA_KEY"),
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }
}
