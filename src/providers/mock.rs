/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with translated text
 * - `MockProvider::failing()` - Always fails with a connection error
 * - `MockProvider::rate_limited()` - Always fails with a rate-limit error
 * - `MockProvider::empty()` - Succeeds but returns empty text
 * - `MockProvider::failing_first(n)` - Fails the first n requests, then succeeds
 */

// Allow dead code - the mock is test-suite API surface
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, echoing the prompt with a marker prefix
    Working,
    /// Always fails with a connection error
    Failing,
    /// Always fails with a rate-limit error
    RateLimited,
    /// Succeeds with an empty response
    Empty,
    /// Fails the first `failures` requests, then behaves like Working
    FailingFirst {
        /// Number of initial requests that fail
        failures: usize,
    },
}

/// Mock provider for testing translation behavior without a network
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Total requests issued against this provider
    request_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock provider that always fails with a connection error
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock provider that always reports rate limiting
    pub fn rate_limited() -> Self {
        Self::new(MockBehavior::RateLimited)
    }

    /// Create a mock provider that succeeds with empty text
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock provider that fails the first `failures` requests
    pub fn failing_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailingFirst { failures })
    }

    /// Number of requests issued so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the request counter, for asserting after a move
    pub fn request_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.request_count)
    }

    /// Deterministic "translation" so tests can assert on output.
    ///
    /// Echoes only the dialogue portion of the instruction (the part after
    /// the `Original:` marker), the way a real endpoint answers with the
    /// translated text alone.
    fn translate(prompt: &str) -> String {
        let text = prompt
            .rsplit_once("Original:\n")
            .map_or(prompt, |(_, text)| text);
        format!("translated:{}", text.trim())
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let seen = self.request_count.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Working => Ok(Self::translate(prompt)),
            MockBehavior::Failing => {
                Err(ProviderError::ConnectionError("mock connection refused".to_string()))
            }
            MockBehavior::RateLimited => {
                Err(ProviderError::RateLimitExceeded("mock rate limit".to_string()))
            }
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::FailingFirst { failures } => {
                if seen < failures {
                    Err(ProviderError::ConnectionError(format!(
                        "mock failure {} of {}",
                        seen + 1,
                        failures
                    )))
                } else {
                    Ok(Self::translate(prompt))
                }
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Failing => {
                Err(ProviderError::ConnectionError("mock connection refused".to_string()))
            }
            MockBehavior::RateLimited => {
                Err(ProviderError::RateLimitExceeded("mock rate limit".to_string()))
            }
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
