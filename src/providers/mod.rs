/*!
 * Provider implementations for the remote translation endpoint.
 *
 * This module contains the client for the Gemini generateContent REST API
 * and a mock provider used by the test suite.
 */

use async_trait::async_trait;
use log::{info, warn};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for translation endpoints.
///
/// The endpoint is treated as an opaque text-in, text-out function: one
/// call issues exactly one attempt with no retry of its own. The retry and
/// fallback policy lives in the translation service so every provider gets
/// the same behavior.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Issue a single completion attempt for an already-built prompt.
    ///
    /// # Arguments
    /// * `prompt` - The full natural-language instruction including the text to translate
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The raw generated text; may be empty
    ///   when the endpoint answered successfully but produced no candidates
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider with a minimal request
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is usable, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Identifier for log lines (model name for real providers)
    fn name(&self) -> &str;
}

/// Probe an ordered list of candidate providers and return the first one
/// that answers.
///
/// Each failed probe is surfaced as a diagnostic-only warning; only
/// exhausting the whole list is an error. Candidates after the winner are
/// never contacted.
pub async fn probe_first<P: Provider>(candidates: Vec<P>) -> Result<P, ProviderError> {
    let total = candidates.len();
    for candidate in candidates {
        match candidate.test_connection().await {
            Ok(()) => {
                info!("Connected - using {}", candidate.name());
                return Ok(candidate);
            }
            Err(e) => {
                warn!("Candidate {} unavailable: {}", candidate.name(), e);
            }
        }
    }
    Err(ProviderError::NoUsableModel(total))
}

pub mod gemini;
pub mod mock;
