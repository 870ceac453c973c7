//! Recording completion client for tests

use async_openai::error::OpenAIError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{ChatMessage, ClientFactory, CompletionClient};
use crate::error::{ChatError, Result};

/// One request seen by a [`RecordingFactory`] client
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub api_key: String,
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug)]
struct State {
    connections: Vec<String>,
    requests: Vec<RecordedRequest>,
    outcome: std::result::Result<String, String>,
}

/// Factory whose clients record every request and return a scripted outcome
#[derive(Debug, Clone)]
pub(crate) struct RecordingFactory {
    state: Arc<Mutex<State>>,
}

impl RecordingFactory {
    fn with_outcome(outcome: std::result::Result<String, String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                connections: Vec::new(),
                requests: Vec::new(),
                outcome,
            })),
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::with_outcome(Ok(text.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_outcome(Err(message.to_string()))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// API keys passed to `connect`, in order
    pub fn connections(&self) -> Vec<String> {
        self.state.lock().unwrap().connections.clone()
    }
}

impl ClientFactory for RecordingFactory {
    fn connect(&self, api_key: &str) -> Box<dyn CompletionClient> {
        self.state
            .lock()
            .unwrap()
            .connections
            .push(api_key.to_string());
        Box::new(RecordingClient {
            api_key: api_key.to_string(),
            state: Arc::clone(&self.state),
        })
    }
}

struct RecordingClient {
    api_key: String,
    state: Arc<Mutex<State>>,
}

#[async_trait]
impl CompletionClient for RecordingClient {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            api_key: self.api_key.clone(),
            model: model.to_string(),
            messages: messages.to_vec(),
        });
        match &state.outcome {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(ChatError::Api(OpenAIError::InvalidArgument(
                message.clone(),
            ))),
        }
    }
}
