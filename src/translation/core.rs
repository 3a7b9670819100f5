/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which walks a document
 * block by block, strictly in order, and translates each payload through a
 * provider with a bounded retry budget. Failures are local: a block that
 * exhausts its retries keeps its original text, and the pipeline never
 * aborts mid-document.
 */

use std::time::Duration;

use log::{debug, warn};

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::subtitle_processor::{Block, Document, SubtitleBlock};
use super::prompts::TranslationPromptBuilder;

/// Main translation service for subtitle documents
pub struct TranslationService<P: Provider> {
    /// Provider implementation
    provider: P,

    /// Prompt builder carrying the work title and target language
    prompts: TranslationPromptBuilder,

    /// Configuration for retry budget, backoff and pacing
    pub config: TranslationConfig,
}

impl<P: Provider> TranslationService<P> {
    /// Create a new translation service
    pub fn new(provider: P, prompts: TranslationPromptBuilder, config: TranslationConfig) -> Self {
        Self {
            provider,
            prompts,
            config,
        }
    }

    /// The provider backing this service
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Translate one block of dialogue, never failing.
    ///
    /// Each attempt is one provider call; a rate-limiting response backs off
    /// longer than other failures. An empty result and an exhausted retry
    /// budget both fall back to the original text - an empty string is never
    /// substituted for real content.
    pub async fn translate_block(&self, text: &str) -> String {
        let prompt = self.prompts.build(text);

        for attempt in 1..=self.config.retry_count {
            match self.provider.complete(&prompt).await {
                Ok(translated) => {
                    let translated = translated.trim();
                    if translated.is_empty() {
                        warn!(
                            "Provider {} returned empty text, keeping original",
                            self.provider.name()
                        );
                        return text.to_string();
                    }
                    return translated.to_string();
                }
                Err(ProviderError::RateLimitExceeded(message)) => {
                    warn!(
                        "Rate limited on attempt {}/{}: {}",
                        attempt, self.config.retry_count, message
                    );
                    if attempt < self.config.retry_count {
                        tokio::time::sleep(Duration::from_millis(self.config.rate_limit_backoff_ms))
                            .await;
                    }
                }
                Err(e) => {
                    warn!(
                        "Translation attempt {}/{} failed: {}",
                        attempt, self.config.retry_count, e
                    );
                    if attempt < self.config.retry_count {
                        tokio::time::sleep(Duration::from_millis(self.config.error_backoff_ms))
                            .await;
                    }
                }
            }
        }

        debug!("Retry budget exhausted, keeping original text");
        text.to_string()
    }

    /// Translate a whole document, strictly sequentially.
    ///
    /// Block i+1 is not sent until block i's result is recorded, and the
    /// output order is the input order. Blocks with an empty payload and
    /// malformed pass-through blocks are never sent to the endpoint. The
    /// callback fires once per block with (completed, total).
    pub async fn translate_document<F>(&self, document: &Document, mut on_block: F) -> Document
    where
        F: FnMut(usize, usize),
    {
        let total = document.len();
        let mut blocks = Vec::with_capacity(total);

        for (index, block) in document.blocks.iter().enumerate() {
            let translated = match block {
                Block::Cue(cue) if !cue.payload.is_empty() => {
                    let payload = self.translate_block(&cue.payload).await;
                    Block::Cue(SubtitleBlock {
                        sequence_label: cue.sequence_label.clone(),
                        time_range: cue.time_range.clone(),
                        payload,
                    })
                }
                other => other.clone(),
            };
            blocks.push(translated);
            on_block(index + 1, total);

            if self.config.pacing_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.pacing_delay_ms)).await;
            }
        }

        Document { blocks }
    }
}
