use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jsonsmith::errors::Result;
use jsonsmith::exec::{ExecRequest, ExecResponse, SandboxClient};

/// A fake remote sandbox that records submissions and returns a canned
/// result instead of running anything.
#[derive(Clone)]
pub struct FakeSandbox {
    response: ExecResponse,
    submitted: Arc<Mutex<Vec<ExecRequest>>>,
}

impl FakeSandbox {
    pub fn new(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            response: ExecResponse {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn submitted(&self) -> Vec<ExecRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl SandboxClient for FakeSandbox {
    async fn execute(&self, request: &ExecRequest) -> Result<ExecResponse> {
        self.submitted.lock().unwrap().push(request.clone());
        Ok(self.response.clone())
    }
}
