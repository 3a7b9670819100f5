use std::fmt;

use crate::subtitle_processor::Document;

// @module: Positional timecode comparison between two documents

/// Outcome of comparing two documents' time-range sequences.
///
/// The comparison is a single linear scan with early exit on the first
/// mismatch - no diff algorithm, no re-synchronization. Correction is
/// deliberately left to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignmentOutcome {
    /// Every position agreed and both documents have the same count
    Aligned {
        /// Number of time ranges compared
        compared: usize,
    },

    /// First position where the raw time ranges disagree
    Divergence {
        /// 1-based position of the mismatch
        position: usize,
        /// Raw time-range line from the original document
        original: String,
        /// Raw time-range line from the translated document
        translated: String,
    },

    /// Common prefix agrees but the documents have different counts
    LengthMismatch {
        /// Count up to which both sequences agreed
        agreed: usize,
        /// Total time ranges in the original document
        original_total: usize,
        /// Total time ranges in the translated document
        translated_total: usize,
    },
}

impl AlignmentOutcome {
    /// Whether the two documents lined up perfectly
    pub fn is_aligned(&self) -> bool {
        matches!(self, Self::Aligned { .. })
    }
}

impl fmt::Display for AlignmentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aligned { compared } => {
                write!(f, "All {compared} timecodes match - no drift detected")
            }
            Self::Divergence { position, original, translated } => {
                write!(
                    f,
                    "Timecode drift at entry {position}: original {original:?} vs translated {translated:?}"
                )
            }
            Self::LengthMismatch { agreed, original_total, translated_total } => {
                write!(
                    f,
                    "Timecodes agree up to entry {agreed}, but counts differ: {original_total} original vs {translated_total} translated"
                )
            }
        }
    }
}

/// Strip every space character before comparing; arrow-variant differences
/// still count as a mismatch, which is exactly the corruption this tool
/// exists to catch.
fn comparable(time_range: &str) -> String {
    time_range.chars().filter(|c| *c != ' ').collect()
}

/// Find the first position where two documents' time ranges diverge.
///
/// Both sequences are the raw (un-normalized) time-range lines in block
/// order, skipping blocks that have none. Comparison runs position by
/// position up to the shorter length.
pub fn compare_time_ranges(original: &Document, translated: &Document) -> AlignmentOutcome {
    let original_ranges = original.time_ranges();
    let translated_ranges = translated.time_ranges();

    let limit = original_ranges.len().min(translated_ranges.len());
    for index in 0..limit {
        let lhs = original_ranges[index];
        let rhs = translated_ranges[index];
        if comparable(lhs) != comparable(rhs) {
            return AlignmentOutcome::Divergence {
                position: index + 1,
                original: lhs.to_string(),
                translated: rhs.to_string(),
            };
        }
    }

    if original_ranges.len() != translated_ranges.len() {
        AlignmentOutcome::LengthMismatch {
            agreed: limit,
            original_total: original_ranges.len(),
            translated_total: translated_ranges.len(),
        }
    } else {
        AlignmentOutcome::Aligned { compared: limit }
    }
}
