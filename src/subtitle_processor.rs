use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use log::warn;
use serde::{Serialize, Deserialize};

// @module: SRT block model - splitting, decomposition, timecode
// normalization and reassembly shared by every tool in the crate

// @const: Blank-line separator, tolerating stray spaces on the blank line
static BLANK_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").unwrap()
});

// @const: Arrow marker variants (->, ==>, - >, ...)
static ARROW_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*[-=]+\s*>\s*").unwrap()
});

// @const: Markdown code fences sometimes wrapped around LLM output
static MARKDOWN_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:srt)?").unwrap()
});

// @const: Strict block header (sequence number followed by a full timecode pair)
static STRICT_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(\d+)[^\S\n]*\n(\d{2}:\d{2}:\d{2}[,.]\d{3}\s*[-=]+\s*>\s*\d{2}:\d{2}:\d{2}[,.]\d{3})[^\S\n]*\n?").unwrap()
});

/// Line-ending convention for serialized output.
///
/// Some web-based players only accept CRLF, most native players take either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Unix convention, single `\n`
    Lf,
    /// Windows convention, `\r\n`
    Crlf,
}

impl LineEnding {
    /// The literal terminator for this convention
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => write!(f, "lf"),
            Self::Crlf => write!(f, "crlf"),
        }
    }
}

/// Normalize every line-ending variant (CRLF, bare CR) to LF.
///
/// This runs first, unconditionally, so nothing downstream ever branches
/// on line-ending style.
pub fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Remove markdown code fences (``` and ```srt) that LLMs like to wrap
/// around subtitle output.
pub fn strip_markdown_fences(content: &str) -> String {
    MARKDOWN_FENCE_REGEX.replace_all(content, "").into_owned()
}

/// Split raw subtitle text into block strings.
///
/// Splits on runs of blank lines, where a "blank" line may carry stray
/// trailing spaces. The trailing block is captured even without a final
/// blank line, and blocks that are empty after trimming are discarded.
pub fn split_blocks(content: &str) -> Vec<String> {
    let normalized = normalize_line_endings(content);
    BLANK_LINE_REGEX
        .split(normalized.trim())
        .filter(|block| !block.trim().is_empty())
        .map(|block| block.to_string())
        .collect()
}

/// Rewrite a raw time-range line to canonical form.
///
/// Any arrow variant collapses to exactly ` --> `, and every period becomes
/// a comma (the SRT milliseconds separator). The replacement is blind to
/// position, which is safe for well-formed `HH:MM:SS,mmm` timestamps.
/// Applying it twice yields the same result as applying it once.
pub fn normalize_time_range(line: &str) -> String {
    ARROW_REGEX.replace_all(line, " --> ").replace('.', ",")
}

/// Predicate for the designated time-range line: any line containing an
/// arrow marker in one of its accepted variants.
pub fn is_time_range_line(line: &str) -> bool {
    ARROW_REGEX.is_match(line)
}

// @struct: One decomposed subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleBlock {
    // @field: First line of the block, verbatim (not parsed as an integer;
    // renumbering is a serialization policy, not a parsing concern)
    pub sequence_label: String,

    // @field: Raw time-range line, trimmed but NOT normalized - the
    // alignment checker needs the original text
    pub time_range: String,

    // @field: Payload lines after the time-range line, newline-joined and
    // trimmed; empty is a valid state
    pub payload: String,
}

impl SubtitleBlock {
    /// Create a block from its parts
    pub fn new(
        sequence_label: impl Into<String>,
        time_range: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        SubtitleBlock {
            sequence_label: sequence_label.into(),
            time_range: time_range.into(),
            payload: payload.into(),
        }
    }

    /// The time-range line in canonical form
    pub fn normalized_time_range(&self) -> String {
        normalize_time_range(&self.time_range)
    }
}

/// One block of a parsed document: either a decomposed entry or raw text
/// carried through untouched because no time-range line was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Well-formed entry with label, time range and payload
    Cue(SubtitleBlock),
    /// Malformed block, preserved verbatim (line endings already normalized)
    Passthrough(String),
}

impl Block {
    /// Decompose one raw block string.
    ///
    /// A block is well-formed iff it has at least two lines and some line
    /// after the first contains an arrow marker. Everything else degrades
    /// to pass-through rather than an error.
    pub fn parse(raw: &str) -> Block {
        let lines: Vec<&str> = raw.lines().collect();
        if lines.len() < 2 {
            return Block::Passthrough(raw.to_string());
        }

        // The time-range line is the FIRST arrow-bearing line, wherever it
        // sits; it is not assumed to be the second line. An arrow on the
        // very first line leaves no room for a sequence label.
        let arrow_index = lines.iter().position(|line| is_time_range_line(line));
        match arrow_index {
            Some(index) if index >= 1 => {
                let discarded: Vec<&&str> = lines[1..index]
                    .iter()
                    .filter(|line| !line.trim().is_empty())
                    .collect();
                if !discarded.is_empty() {
                    warn!(
                        "Discarding {} unexpected line(s) between sequence label {:?} and its time range",
                        discarded.len(),
                        lines[0].trim()
                    );
                }

                Block::Cue(SubtitleBlock {
                    sequence_label: lines[0].trim().to_string(),
                    time_range: lines[index].trim().to_string(),
                    payload: lines[index + 1..].join("\n").trim().to_string(),
                })
            }
            _ => Block::Passthrough(raw.to_string()),
        }
    }

    /// The raw time-range line, if this block has one
    pub fn time_range(&self) -> Option<&str> {
        match self {
            Block::Cue(cue) => Some(&cue.time_range),
            Block::Passthrough(_) => None,
        }
    }

    /// Serialize this block under the given line-ending convention.
    ///
    /// Well-formed blocks emit label, normalized time range and payload on
    /// their own lines followed by a blank separator line. Malformed blocks
    /// keep their content byte-identical apart from line-ending conversion.
    fn serialize(&self, line_ending: LineEnding) -> String {
        let le = line_ending.as_str();
        match self {
            Block::Cue(cue) => format!(
                "{}{le}{}{le}{}{le}{le}",
                cue.sequence_label,
                cue.normalized_time_range(),
                cue.payload.replace('\n', le),
            ),
            Block::Passthrough(raw) => format!("{}{le}{le}", raw.replace('\n', le)),
        }
    }
}

/// Ordered sequence of blocks parsed from one subtitle file.
///
/// Order is load-bearing: alignment comparison between two documents is
/// purely positional. A document is built once and never mutated; every
/// transformation produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Blocks in appearance order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Parse raw subtitle text into a document
    pub fn parse(content: &str) -> Self {
        let blocks = split_blocks(content)
            .iter()
            .map(|raw| Block::parse(raw))
            .collect();
        Document { blocks }
    }

    /// Number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document has no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Raw (un-normalized) time-range lines in order, skipping blocks that
    /// have none
    pub fn time_ranges(&self) -> Vec<&str> {
        self.blocks.iter().filter_map(|block| block.time_range()).collect()
    }

    /// Serialize the whole document, preserving every block including
    /// empty-payload entries and malformed pass-throughs.
    pub fn serialize(&self, line_ending: LineEnding) -> String {
        self.blocks
            .iter()
            .map(|block| block.serialize(line_ending))
            .collect()
    }

    /// Serialize with fresh 1-based gap-free sequence numbers.
    ///
    /// Original labels are discarded. Entries with an empty payload and
    /// malformed blocks are dropped rather than renumbered - an empty
    /// subtitle entry is not useful output in this mode.
    pub fn serialize_renumbered(&self, line_ending: LineEnding) -> String {
        let le = line_ending.as_str();
        let mut output = String::new();
        let mut counter = 1usize;
        for block in &self.blocks {
            if let Block::Cue(cue) = block {
                if cue.payload.is_empty() {
                    continue;
                }
                output.push_str(&format!(
                    "{counter}{le}{}{le}{}{le}{le}",
                    cue.normalized_time_range(),
                    cue.payload.replace('\n', le),
                ));
                counter += 1;
            }
        }
        output
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize(LineEnding::Lf))
    }
}

/// Result of a strict-pattern repair pass
#[derive(Debug)]
pub struct RepairOutcome {
    /// Reassembled document text
    pub content: String,
    /// How many blocks the strict pattern matched
    pub extracted: usize,
    /// Sequence labels whose timecode line had to be rewritten
    pub arrow_fixes: Vec<String>,
}

/// Repair a damaged file by strict pattern extraction.
///
/// Markdown fences are stripped, then every `number / timecode-pair / text`
/// run is located; anything between matched runs is dropped. Matched blocks
/// keep their original sequence labels and are re-emitted with normalized
/// timecodes and trimmed payloads. Blocks whose timecode line changed are
/// reported by label.
pub fn repair_strict(content: &str, line_ending: LineEnding) -> RepairOutcome {
    let cleaned = normalize_line_endings(&strip_markdown_fences(content));
    let le = line_ending.as_str();

    // Header positions first, payloads are the stretches in between
    let headers: Vec<(usize, usize, String, String)> = STRICT_HEADER_REGEX
        .captures_iter(&cleaned)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            (
                whole.start(),
                whole.end(),
                caps[1].to_string(),
                caps[2].to_string(),
            )
        })
        .collect();

    let mut output = String::new();
    let mut arrow_fixes = Vec::new();
    for (position, (_, end, sequence, timecode)) in headers.iter().enumerate() {
        let payload_end = headers
            .get(position + 1)
            .map_or(cleaned.len(), |next| next.0);
        let payload = cleaned[*end..payload_end].trim();

        let normalized = normalize_time_range(timecode);
        if normalized != *timecode {
            arrow_fixes.push(sequence.clone());
        }

        output.push_str(&format!(
            "{sequence}{le}{normalized}{le}{}{le}{le}",
            payload.replace('\n', le),
        ));
    }

    RepairOutcome {
        content: output,
        extracted: headers.len(),
        arrow_fixes,
    }
}
