// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ChatDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use llm_client::CompletionRequest;
use resource_engine::{ResourceCatalog, ResourceRetriever};
use std::sync::{Arc, Mutex};

use super::{BaseAI, ChatDeps};

// =============================================================================
// Mock AI
// =============================================================================

/// Queued outcome of a mock completion
#[derive(Debug, Clone)]
enum MockOutcome {
    Reply(String),
    Failure(String),
}

#[derive(Clone, Default)]
pub struct MockAI {
    responses: Arc<Mutex<Vec<MockOutcome>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockOutcome::Reply(response.into()));
        self
    }

    /// Add a failure to the queue (returned as an error)
    pub fn with_failure(self, reason: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockOutcome::Failure(reason.into()));
        self
    }

    /// Get all requests that were sent to the AI
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the last request sent to the AI
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Get the system prompt of the last request
    pub fn last_system_prompt(&self) -> Option<String> {
        self.last_request().and_then(|r| r.system)
    }

    /// Check if a system prompt or message containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|request| {
            request.system.as_deref().is_some_and(|s| s.contains(text))
                || request.messages.iter().any(|m| m.content.contains(text))
        })
    }

    /// Get the number of times the AI was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        // Record the call
        self.calls.lock().unwrap().push(request.clone());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return default mock response
            return Ok("Mock AI response".to_string());
        }
        match responses.remove(0) {
            MockOutcome::Reply(text) => Ok(text),
            MockOutcome::Failure(reason) => Err(anyhow::anyhow!(reason)),
        }
    }
}

// =============================================================================
// Test Dependencies
// =============================================================================

pub struct TestDependencies {
    pub ai: Option<MockAI>,
    pub catalog: Arc<ResourceCatalog>,
}

impl TestDependencies {
    /// Seeded catalog, no AI configured
    pub fn new() -> Self {
        Self {
            ai: None,
            catalog: Arc::new(ResourceCatalog::seeded().expect("Embedded catalog must load")),
        }
    }

    /// Set a mock AI
    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Some(ai);
        self
    }

    /// Set a catalog
    pub fn catalog(mut self, catalog: ResourceCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Build ChatDeps using the mocks
    pub fn into_deps(self) -> ChatDeps {
        let deps = ChatDeps::new(Arc::new(ResourceRetriever::new(self.catalog)));
        match self.ai {
            Some(ai) => deps.with_ai(Arc::new(ai)),
            None => deps,
        }
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
