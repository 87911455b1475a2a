use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jsonsmith::provider::{LlmProvider, LlmRequest, LlmResponse, ProviderError};

/// A fake model that:
/// - records every request it receives
/// - answers each one with a fixed completion (or a fixed failure).
#[derive(Clone)]
pub struct FakeProvider {
    reply: Result<String, String>,
    requests: Arc<Mutex<Vec<LlmRequest>>>,
}

impl FakeProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<LlmRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "demo"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(LlmResponse::text(text.clone())),
            Err(message) => Err(ProviderError::ProviderError(message.clone())),
        }
    }
}
