use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::alignment::{compare_time_ranges, AlignmentOutcome};
use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::providers::gemini::Gemini;
use crate::subtitle_processor::{
    repair_strict, strip_markdown_fences, Document, LineEnding,
};
use crate::translation::{TranslationPromptBuilder, TranslationService};

// @module: Application controller wiring the tools together

/// Main application controller for the subtitle tools
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate a subtitle file block by block and write the result.
    ///
    /// Probes the candidate model list first; the first model that answers
    /// is used for the whole run. Returns the path written.
    pub async fn run_translate(
        &self,
        input: &Path,
        output: Option<PathBuf>,
        api_key: &str,
    ) -> Result<PathBuf> {
        if api_key.is_empty() {
            anyhow::bail!("An API key is required for translation");
        }

        let content = FileManager::read_text_lossy(input)?;
        let document = Document::parse(&content);
        info!(
            "Loaded {} with {} block(s)",
            input.display(),
            document.len()
        );

        let translation = &self.config.translation;
        let provider = Gemini::probe_candidates(
            &translation.endpoint,
            api_key,
            &translation.candidate_models,
            Duration::from_secs(translation.request_timeout_secs),
            Duration::from_secs(translation.probe_timeout_secs),
        )
        .await
        .context("Could not reach the translation endpoint")?;

        let prompts = TranslationPromptBuilder::new(
            self.config.work_title.clone(),
            self.config.target_language.clone(),
        );
        let service = TranslationService::new(provider, prompts, translation.clone());

        let progress_bar = ProgressBar::new(document.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} blocks")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let translated = service
            .translate_document(&document, |completed, total| {
                progress_bar.set_position(completed as u64);
                if completed % 5 == 0 {
                    info!("Processing... {}/{} completed", completed, total);
                }
            })
            .await;
        progress_bar.finish_and_clear();

        let output_path = output.unwrap_or_else(|| {
            FileManager::suffixed_output_path(
                input,
                &format!("_{}_WebReady", self.config.target_language),
            )
        });
        let serialized = translated.serialize(self.config.output.line_ending);
        FileManager::write_text(&output_path, &serialized, self.config.output.with_bom)?;

        info!("Translation complete: {}", output_path.display());
        Ok(output_path)
    }

    /// Compare two subtitle files' timecode sequences and report the first
    /// divergence. Reporting only - nothing is ever corrected automatically.
    pub fn run_check(&self, original: &Path, translated: &Path) -> Result<AlignmentOutcome> {
        let original_doc = Document::parse(&FileManager::read_text_lossy(original)?);
        let translated_doc = Document::parse(&FileManager::read_text_lossy(translated)?);

        info!(
            "Original: {} timecode(s), translated: {} timecode(s)",
            original_doc.time_ranges().len(),
            translated_doc.time_ranges().len()
        );

        let outcome = compare_time_ranges(&original_doc, &translated_doc);
        match &outcome {
            AlignmentOutcome::Aligned { .. } => info!("{outcome}"),
            AlignmentOutcome::Divergence { position, .. } => {
                warn!("{outcome}");
                warn!(
                    "Entry {} or the one before it was likely merged during translation",
                    position
                );
            }
            AlignmentOutcome::LengthMismatch { .. } => warn!("{outcome}"),
        }
        println!("{outcome}");
        Ok(outcome)
    }

    /// Repair a damaged subtitle file by strict pattern extraction.
    ///
    /// Keeps original sequence labels and reports which entries had their
    /// timecode line rewritten. Output is plain UTF-8 with LF endings.
    pub fn run_repair(&self, input: &Path, output: Option<PathBuf>) -> Result<PathBuf> {
        let content = FileManager::read_text_lossy(input)?;
        let outcome = repair_strict(&content, LineEnding::Lf);

        info!("Extracted and reformatted {} block(s)", outcome.extracted);
        if outcome.arrow_fixes.is_empty() {
            info!("No structural errors found, format normalized anyway");
        } else {
            for sequence in &outcome.arrow_fixes {
                info!("Entry {}: timecode arrow repaired", sequence);
            }
        }

        let output_path =
            output.unwrap_or_else(|| FileManager::suffixed_output_path(input, "_Fixed"));
        FileManager::write_text(&output_path, &outcome.content, false)?;

        info!("Repair complete: {}", output_path.display());
        Ok(output_path)
    }

    /// Convert a subtitle file to the strict web-player format.
    ///
    /// Strips markdown fences, drops empty entries, renumbers from 1 and
    /// writes CRLF with a byte-order mark (per the output config).
    pub fn run_finalize(&self, input: &Path, output: Option<PathBuf>) -> Result<PathBuf> {
        let content = FileManager::read_text_lossy(input)?;
        let document = Document::parse(&strip_markdown_fences(&content));

        let serialized = document.serialize_renumbered(self.config.output.line_ending);
        let output_path = output
            .unwrap_or_else(|| FileManager::suffixed_output_path(input, "_WebReady"));
        FileManager::write_text(&output_path, &serialized, self.config.output.with_bom)?;

        info!("Converted to web-compatible format: {}", output_path.display());
        Ok(output_path)
    }
}
