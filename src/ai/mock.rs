use super::{CompletionRequest, CompletionService};
use crate::models::Provider;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted [`CompletionService`] for tests and offline harnesses.
///
/// Responses are handed out in order and cycle once exhausted. Every request
/// is recorded so callers can assert on the instructions that were sent.
pub struct MockCompletionClient {
    responses: Arc<Mutex<Vec<String>>>,
    error: Arc<Mutex<Option<String>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(response.into());
        self
    }

    /// Makes every call fail with an upstream 500 error.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        *self.error.lock().unwrap() = Some(message.into());
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionService for MockCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request.clone());

        if let Some(message) = self.error.lock().unwrap().clone() {
            return Err(Error::Provider {
                provider: Provider::Gemini,
                status: 500,
                message,
            });
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Echo the instruction so callers see which call produced what
            Ok(format!("Echo: {}.", request.instruction))
        } else {
            let index = (requests.len() - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
