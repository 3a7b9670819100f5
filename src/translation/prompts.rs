/*!
 * Prompt template for the translation instruction.
 *
 * The endpoint receives one natural-language instruction per block, with the
 * work title and target language embedded as context.
 */

/// Builder for per-block translation prompts
#[derive(Debug, Clone)]
pub struct TranslationPromptBuilder {
    /// Title of the work, for translation context
    work_title: String,
    /// Target language, free text
    target_language: String,
}

impl TranslationPromptBuilder {
    /// Create a builder for the given work and language
    pub fn new(work_title: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            work_title: work_title.into(),
            target_language: target_language.into(),
        }
    }

    /// The target language this builder was created with
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Build the full instruction for one block of dialogue
    pub fn build(&self, text: &str) -> String {
        format!(
            "You are a professional film subtitle translator.\n\
             Translate the dialogue into natural, emotional {language}.\n\
             Movie: {title}\n\
             \n\
             Rules:\n\
             1. Output ONLY the translated text. No notes.\n\
             2. Do NOT output timecodes.\n\
             3. Keep it concise for subtitles.\n\
             \n\
             Original:\n\
             {text}",
            language = self.target_language,
            title = self.work_title,
            text = text
        )
    }
}
