use anyhow::{Context, Result};
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

// @module: File reading, writing and output naming

/// UTF-8 byte-order mark, required by some browser-based players
const UTF8_BOM: &str = "\u{feff}";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Read a subtitle file as text, tolerating invalid byte sequences.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, and a leading
    /// byte-order mark is stripped so the parser never sees it.
    pub fn read_text_lossy<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Ok(match content.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_string(),
            None => content,
        })
    }

    /// Write text to a file, optionally prefixed with a UTF-8 byte-order mark
    pub fn write_text<P: AsRef<Path>>(path: P, content: &str, with_bom: bool) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        if with_bom {
            file.write_all(UTF8_BOM.as_bytes())?;
        }
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    // @generates: Output path by appending a suffix to the input's base name
    // @params: input_file, suffix (e.g. "_Japanese_WebReady", "_Fixed")
    pub fn suffixed_output_path<P: AsRef<Path>>(input_file: P, suffix: &str) -> PathBuf {
        let input_file = input_file.as_ref();

        // Strip the extension, append the suffix, re-append the extension
        let stem = input_file.file_stem().unwrap_or_default();
        let extension = input_file
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_else(|| "srt".to_string());

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push_str(suffix);
        output_filename.push('.');
        output_filename.push_str(&extension);

        match input_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(output_filename),
            _ => PathBuf::from(output_filename),
        }
    }
}
