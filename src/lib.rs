/*!
 * # srtsmith
 *
 * A Rust toolkit for repairing, checking and AI-translating SRT subtitle files.
 *
 * ## Features
 *
 * - Split SRT files into timed blocks and reassemble them with normalized timecodes
 * - Translate block payloads through the Gemini generateContent API, strictly
 *   sequentially, with bounded retries and untranslated-text fallback
 * - Detect timecode drift between an original and a translated file
 * - Repair damaged files by strict pattern extraction
 * - Convert files to the strict web-player format (CRLF, BOM, gap-free numbering)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: The shared SRT block model - splitting, decomposition,
 *   timecode normalization and serialization
 * - `alignment`: Positional timecode comparison between two documents
 * - `translation`: Sequential per-block translation:
 *   - `translation::core`: Core translation service with retry and fallback
 *   - `translation::prompts`: Prompt template for the translation instruction
 * - `file_utils`: File reading, writing and output naming
 * - `app_controller`: Main application controller
 * - `providers`: Clients for the translation endpoint:
 *   - `providers::gemini`: Gemini generateContent REST client
 *   - `providers::mock`: Mock provider for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod alignment;
pub mod translation;
pub mod app_controller;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use subtitle_processor::{Block, Document, LineEnding, SubtitleBlock};
pub use alignment::{compare_time_ranges, AlignmentOutcome};
pub use translation::TranslationService;
pub use errors::{AppError, ProviderError, SubtitleError};
