/*!
 * End-to-end tests for the document translation pipeline, using the mock
 * provider in place of the network
 */

use srtsmith::providers::mock::MockProvider;
use srtsmith::subtitle_processor::{Document, LineEnding};
use srtsmith::translation::{TranslationPromptBuilder, TranslationService};
use crate::common;

fn service_with(provider: MockProvider) -> TranslationService<MockProvider> {
    TranslationService::new(
        provider,
        TranslationPromptBuilder::new("Test Movie", "French"),
        common::fast_translation_config(),
    )
}

/// Test that with an identity fallback (endpoint unreachable) the pipeline
/// output is the normalized input, byte for byte
#[tokio::test]
async fn test_pipeline_withUnreachableEndpoint_shouldReproduceNormalizedInput() {
    let input = "1\n00:00:01.000-->00:00:02.000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n\n";
    let document = Document::parse(input);
    let service = service_with(MockProvider::failing());

    let translated = service.translate_document(&document, |_, _| {}).await;
    let output = translated.serialize(LineEnding::Lf);

    assert_eq!(
        output,
        "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n\n"
    );
}

/// Test the same document under CRLF policy
#[tokio::test]
async fn test_pipeline_withUnreachableEndpoint_shouldHonorCrlfPolicy() {
    let input = "1\n00:00:01.000-->00:00:02.000\nHello\n";
    let document = Document::parse(input);
    let service = service_with(MockProvider::failing());

    let translated = service.translate_document(&document, |_, _| {}).await;

    assert_eq!(
        translated.serialize(LineEnding::Crlf),
        "1\r\n00:00:01,000 --> 00:00:02,000\r\nHello\r\n\r\n"
    );
}

/// Test that a working endpoint rewrites payloads but never timecodes
#[tokio::test]
async fn test_pipeline_withWorkingEndpoint_shouldTranslatePayloadsOnly() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n";
    let document = Document::parse(input);
    let service = service_with(MockProvider::working());

    let translated = service.translate_document(&document, |_, _| {}).await;
    let output = translated.serialize(LineEnding::Lf);

    assert!(output.contains("00:00:01,000 --> 00:00:02,000"));
    assert!(output.contains("00:00:03,000 --> 00:00:04,000"));
    assert!(output.contains("translated:"));
    assert!(!output.contains("\nHello\n"));
}

/// Test that timecode sequences survive translation, end to end
#[tokio::test]
async fn test_pipeline_translationThenCheck_shouldStayAligned() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n";
    let document = Document::parse(input);
    let service = service_with(MockProvider::working());

    let translated = service.translate_document(&document, |_, _| {}).await;
    let reparsed = Document::parse(&translated.serialize(LineEnding::Crlf));

    let outcome = srtsmith::alignment::compare_time_ranges(&document, &reparsed);
    assert!(outcome.is_aligned());
}
