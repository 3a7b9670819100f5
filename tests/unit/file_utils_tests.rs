/*!
 * Tests for file reading, writing and output naming
 */

use std::fs;
use std::path::PathBuf;
use srtsmith::file_utils::FileManager;
use crate::common;

/// Test output naming with a suffix before the extension
#[test]
fn test_suffixed_output_path_withSrtFile_shouldInsertSuffix() {
    let output = FileManager::suffixed_output_path("movie.srt", "_Japanese_WebReady");
    assert_eq!(output, PathBuf::from("movie_Japanese_WebReady.srt"));
}

/// Test output naming keeps the parent directory
#[test]
fn test_suffixed_output_path_withParentDir_shouldStayInSameDir() {
    let output = FileManager::suffixed_output_path("/subs/season1/ep01.srt", "_Fixed");
    assert_eq!(output, PathBuf::from("/subs/season1/ep01_Fixed.srt"));
}

/// Test output naming for a file without an extension
#[test]
fn test_suffixed_output_path_withNoExtension_shouldAppendSrt() {
    let output = FileManager::suffixed_output_path("movie", "_WebReady");
    assert_eq!(output, PathBuf::from("movie_WebReady.srt"));
}

/// Test lossy reading of invalid byte sequences
#[test]
fn test_read_text_lossy_withInvalidUtf8_shouldReplaceNotReject() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("bad.srt");
    fs::write(&path, b"1\n00:00:01,000 --> 00:00:02,000\nCaf\xff\n").unwrap();

    let content = FileManager::read_text_lossy(&path).unwrap();
    assert!(content.contains("Caf\u{fffd}"));
}

/// Test that a leading byte-order mark is stripped on read
#[test]
fn test_read_text_lossy_withBomPrefix_shouldStripIt() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "bom.srt", "\u{feff}1\ntext").unwrap();

    let content = FileManager::read_text_lossy(&path).unwrap();
    assert_eq!(content, "1\ntext");
}

/// Test writing with and without a byte-order mark
#[test]
fn test_write_text_withBomPolicy_shouldControlBomBytes() {
    let temp_dir = common::create_temp_dir().unwrap();

    let with_bom = temp_dir.path().join("with_bom.srt");
    FileManager::write_text(&with_bom, "hello", true).unwrap();
    let bytes = fs::read(&with_bom).unwrap();
    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    assert_eq!(&bytes[3..], b"hello");

    let without_bom = temp_dir.path().join("without_bom.srt");
    FileManager::write_text(&without_bom, "hello", false).unwrap();
    assert_eq!(fs::read(&without_bom).unwrap(), b"hello");
}

/// Test BOM round trip: written mark is invisible to the reader
#[test]
fn test_write_then_read_withBom_shouldRoundTripContent() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("roundtrip.srt");

    FileManager::write_text(&path, "1\r\ncontent\r\n", true).unwrap();
    assert_eq!(FileManager::read_text_lossy(&path).unwrap(), "1\r\ncontent\r\n");
}

/// Test file existence helper
#[test]
fn test_file_exists_withFileAndDir_shouldDistinguish() {
    let temp_dir = common::create_temp_dir().unwrap();
    let file = common::create_test_file(temp_dir.path(), "a.srt", "x").unwrap();

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.srt")));
}
