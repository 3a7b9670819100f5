/*!
 * Tests for the SRT block model - splitting, decomposition, timecode
 * normalization and reassembly
 */

use srtsmith::subtitle_processor::{
    normalize_line_endings, normalize_time_range, repair_strict, split_blocks,
    strip_markdown_fences, Block, Document, LineEnding, SubtitleBlock,
};

/// Test line-ending normalization across conventions
#[test]
fn test_normalize_line_endings_withMixedEndings_shouldMatchLfInput() {
    let lf_input = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n";
    let crlf_input = lf_input.replace('\n', "\r\n");
    let cr_input = lf_input.replace('\n', "\r");
    let mixed_input = "1\r\n00:00:01,000 --> 00:00:02,000\rHello\n\n2\r\n00:00:03,000 --> 00:00:04,000\nWorld\r";

    assert_eq!(normalize_line_endings(&crlf_input), lf_input);
    assert_eq!(normalize_line_endings(&cr_input), lf_input);
    assert_eq!(normalize_line_endings(mixed_input), lf_input);
    assert_eq!(normalize_line_endings(lf_input), lf_input);
}

/// Test that parsing is line-ending agnostic
#[test]
fn test_document_parse_withCrlfInput_shouldEqualLfParse() {
    let lf_input = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n";
    let crlf_input = lf_input.replace('\n', "\r\n");

    assert_eq!(Document::parse(lf_input), Document::parse(&crlf_input));
}

/// Test splitting on blank lines that carry stray trailing spaces
#[test]
fn test_split_blocks_withWhitespaceOnSeparatorLine_shouldSplitIntoTwoBlocks() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nHi\n \n2\n00:00:03,000 --> 00:00:04,000\nYo";
    let blocks = split_blocks(input);

    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with('1'));
    assert!(blocks[1].starts_with('2'));
}

/// Test that the trailing block is captured without a final blank line
#[test]
fn test_split_blocks_withNoTrailingBlankLine_shouldCaptureLastBlock() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nHi\n\n2\n00:00:03,000 --> 00:00:04,000\nLast";
    let blocks = split_blocks(input);

    assert_eq!(blocks.len(), 2);
    assert!(blocks[1].ends_with("Last"));
}

/// Test that runs of blank lines do not produce empty blocks
#[test]
fn test_split_blocks_withMultipleBlankLines_shouldDiscardEmptyBlocks() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nHi\n\n\n\n2\n00:00:03,000 --> 00:00:04,000\nYo\n\n\n";
    let blocks = split_blocks(input);

    assert_eq!(blocks.len(), 2);
}

/// Test arrow variant normalization
#[test]
fn test_normalize_time_range_withArrowVariants_shouldProduceCanonicalArrow() {
    let expected = "00:00:01,000 --> 00:00:02,000";

    assert_eq!(normalize_time_range("00:00:01,000->00:00:02,000"), expected);
    assert_eq!(normalize_time_range("00:00:01,000 ==> 00:00:02,000"), expected);
    assert_eq!(normalize_time_range("00:00:01,000 - > 00:00:02,000"), expected);
    assert_eq!(normalize_time_range("00:00:01,000   -->   00:00:02,000"), expected);
}

/// Test decimal-separator normalization across the whole line
#[test]
fn test_normalize_time_range_withPeriodSeparators_shouldUseCommas() {
    assert_eq!(
        normalize_time_range("00:00:01.000 --> 00:00:02.000"),
        "00:00:01,000 --> 00:00:02,000"
    );
}

/// Test that the normalizer is idempotent
#[test]
fn test_normalize_time_range_appliedTwice_shouldEqualOnce() {
    let inputs = [
        "00:00:01.000-->00:00:02.000",
        "00:00:01,000 ==> 00:00:02,000",
        "00:00:01,000 --> 00:00:02,000",
        "already canonical --> text",
    ];
    for input in inputs {
        let once = normalize_time_range(input);
        assert_eq!(normalize_time_range(&once), once, "not idempotent for {input:?}");
    }
}

/// Test decomposition of a well-formed block
#[test]
fn test_block_parse_withWellFormedBlock_shouldDecompose() {
    let block = Block::parse("12\n00:00:01,000 --> 00:00:02,000\nHello\nWorld");

    match block {
        Block::Cue(cue) => {
            assert_eq!(cue.sequence_label, "12");
            assert_eq!(cue.time_range, "00:00:01,000 --> 00:00:02,000");
            assert_eq!(cue.payload, "Hello\nWorld");
        }
        Block::Passthrough(_) => panic!("expected a decomposed block"),
    }
}

/// Test that the time-range line is found even when it is not line two
#[test]
fn test_block_parse_withExtraneousLineBeforeArrow_shouldFindTimeRange() {
    let block = Block::parse("3\nstray note\n00:00:05,000 --> 00:00:06,000\nText");

    match block {
        Block::Cue(cue) => {
            assert_eq!(cue.sequence_label, "3");
            assert_eq!(cue.time_range, "00:00:05,000 --> 00:00:06,000");
            assert_eq!(cue.payload, "Text");
        }
        Block::Passthrough(_) => panic!("expected a decomposed block"),
    }
}

/// Test that a timing-only block keeps an empty payload
#[test]
fn test_block_parse_withNoPayload_shouldKeepEmptyPayload() {
    let block = Block::parse("7\n00:00:05,000 --> 00:00:06,000");

    match block {
        Block::Cue(cue) => assert_eq!(cue.payload, ""),
        Block::Passthrough(_) => panic!("expected a decomposed block"),
    }
}

/// Test that a block with no arrow line is malformed
#[test]
fn test_block_parse_withNoArrowLine_shouldPassThrough() {
    let raw = "This block has\nno timecode at all";
    assert_eq!(Block::parse(raw), Block::Passthrough(raw.to_string()));
}

/// Test that a single-line block is malformed
#[test]
fn test_block_parse_withSingleLine_shouldPassThrough() {
    assert_eq!(
        Block::parse("lonely line"),
        Block::Passthrough("lonely line".to_string())
    );
}

/// Test that an arrow on the first line leaves no room for a label
#[test]
fn test_block_parse_withArrowOnFirstLine_shouldPassThrough() {
    let raw = "00:00:01,000 --> 00:00:02,000\nNo label";
    assert_eq!(Block::parse(raw), Block::Passthrough(raw.to_string()));
}

/// Test malformed pass-through serialization: content byte-identical apart
/// from line-ending conversion
#[test]
fn test_document_serialize_withMalformedBlock_shouldPassThroughContent() {
    let input = "just some text\nwith no timing\n\n1\n00:00:01,000 --> 00:00:02,000\nReal entry\n";
    let document = Document::parse(input);

    assert_eq!(document.len(), 2);
    let lf = document.serialize(LineEnding::Lf);
    assert!(lf.starts_with("just some text\nwith no timing\n\n"));

    let crlf = document.serialize(LineEnding::Crlf);
    assert!(crlf.starts_with("just some text\r\nwith no timing\r\n\r\n"));
}

/// Test round trip: decompose then reassemble reproduces label, normalized
/// time range and payload
#[test]
fn test_document_roundTrip_withWellFormedInput_shouldReproduceBlocks() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nTwo\nlines\n";
    let document = Document::parse(input);
    let output = document.serialize(LineEnding::Lf);

    assert_eq!(output, input.to_string() + "\n");
    let reparsed = Document::parse(&output);
    assert_eq!(reparsed, document);
}

/// Test end-to-end normalization of a mixed-convention document
#[test]
fn test_document_serialize_withMixedTimecodeStyles_shouldNormalizeOnlyWhereNeeded() {
    let input = "1\n00:00:01.000-->00:00:02.000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n\n";
    let document = Document::parse(input);

    let ranges = document.time_ranges();
    assert_eq!(ranges[0], "00:00:01.000-->00:00:02.000");
    assert_eq!(ranges[1], "00:00:03,000 --> 00:00:04,000");

    let output = document.serialize(LineEnding::Lf);
    assert_eq!(
        output,
        "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n\n"
    );
}

/// Test CRLF serialization of a multi-line payload
#[test]
fn test_document_serialize_withCrlfPolicy_shouldUseCrlfThroughout() {
    let document = Document {
        blocks: vec![Block::Cue(SubtitleBlock::new(
            "1",
            "00:00:01,000 --> 00:00:02,000",
            "Hello\nWorld",
        ))],
    };

    assert_eq!(
        document.serialize(LineEnding::Crlf),
        "1\r\n00:00:01,000 --> 00:00:02,000\r\nHello\r\nWorld\r\n\r\n"
    );
}

/// Test default-mode serialization keeps empty-payload entries
#[test]
fn test_document_serialize_withEmptyPayload_shouldKeepEntry() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\n\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n";
    let document = Document::parse(input);

    assert_eq!(document.len(), 2);
    assert_eq!(
        document.serialize(LineEnding::Lf),
        "1\n00:00:01,000 --> 00:00:02,000\n\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n\n"
    );
}

/// Test renumbering mode: gap-free numbering, empty entries dropped
#[test]
fn test_serialize_renumbered_withGapsAndEmptyEntries_shouldRenumberAndDrop() {
    let input = "5\n00:00:01,000 --> 00:00:02,000\nHello\n\n9\n00:00:03,000 --> 00:00:04,000\n\n\n12\n00:00:05,000 --> 00:00:06,000\nWorld\n\nnot a real block\n";
    let document = Document::parse(input);

    assert_eq!(
        document.serialize_renumbered(LineEnding::Lf),
        "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:05,000 --> 00:00:06,000\nWorld\n\n"
    );
}

/// Test markdown fence stripping
#[test]
fn test_strip_markdown_fences_withFencedContent_shouldRemoveFences() {
    let input = "```srt\n1\n00:00:01,000 --> 00:00:02,000\nHello\n```";
    let stripped = strip_markdown_fences(input);

    assert!(!stripped.contains("```"));
    assert!(stripped.contains("Hello"));
}

/// Test strict repair: extraction count, arrow fix reporting, normalization
#[test]
fn test_repair_strict_withDamagedInput_shouldExtractAndReport() {
    let input = "```srt\n1\n00:00:01.000 ==> 00:00:02.000\nHello there\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n```\n";
    let outcome = repair_strict(input, LineEnding::Lf);

    assert_eq!(outcome.extracted, 2);
    assert_eq!(outcome.arrow_fixes, vec!["1".to_string()]);
    assert!(outcome.content.contains("00:00:01,000 --> 00:00:02,000"));
    assert!(!outcome.content.contains("```"));
    assert!(outcome.content.starts_with("1\n00:00:01,000 --> 00:00:02,000\nHello there\n\n"));
}

/// Test strict repair keeps original sequence labels
#[test]
fn test_repair_strict_withGappedNumbering_shouldKeepOriginalLabels() {
    let input = "7\n00:00:01,000 --> 00:00:02,000\nSeven\n\n9\n00:00:03,000 --> 00:00:04,000\nNine\n";
    let outcome = repair_strict(input, LineEnding::Lf);

    assert_eq!(outcome.extracted, 2);
    assert!(outcome.arrow_fixes.is_empty());
    assert!(outcome.content.starts_with("7\n"));
    assert!(outcome.content.contains("\n9\n"));
}

/// Test strict repair skips text that is not part of a numbered block
#[test]
fn test_repair_strict_withLeadingGarbage_shouldDropIt() {
    let input = "Here are your translated subtitles:\n\n1\n00:00:01,000 --> 00:00:02,000\nHello\n";
    let outcome = repair_strict(input, LineEnding::Lf);

    assert_eq!(outcome.extracted, 1);
    assert!(outcome.content.starts_with("1\n"));
    assert!(!outcome.content.contains("translated subtitles"));
}
