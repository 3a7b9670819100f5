/*!
 * Translation service for subtitle translation using a remote LLM endpoint.
 *
 * This module contains the sequential per-block translation pipeline:
 *
 * - `core`: Core translation service with bounded retry and fallback
 * - `prompts`: Prompt template for the translation instruction
 */

// Re-export main types for easier usage
pub use self::core::TranslationService;
pub use self::prompts::TranslationPromptBuilder;

// Submodules
pub mod core;
pub mod prompts;
