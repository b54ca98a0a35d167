use std::path::PathBuf;
use std::sync::Arc;

use pdf_web_viewer::application::ports::{FormatterError, HtmlFormatter, LlmClient, LlmClientError};
use pdf_web_viewer::domain::{ConversionArtifact, OutputMode};
use pdf_web_viewer::infrastructure::llm::{
    GeminiClient, GenerateContentRequest, GenerateContentResponse, LlmReformatter, MockLlmClient,
    SYSTEM_INSTRUCTION, build_prompt,
};
use pdf_web_viewer::presentation::config::LlmSettings;

fn settings_with_key(api_key: Option<&str>) -> LlmSettings {
    LlmSettings {
        api_key: api_key.map(str::to_string),
        ..LlmSettings::default()
    }
}

#[test]
fn given_no_api_key_when_creating_client_then_returns_credential_missing() {
    let result = GeminiClient::new(&settings_with_key(None));

    assert!(matches!(result, Err(LlmClientError::CredentialMissing)));
}

#[test]
fn given_blank_api_key_when_creating_client_then_returns_credential_missing() {
    let result = GeminiClient::new(&settings_with_key(Some("   ")));

    assert!(matches!(result, Err(LlmClientError::CredentialMissing)));
}

#[test]
fn given_api_key_when_creating_client_then_uses_configured_model() {
    let client = GeminiClient::new(&settings_with_key(Some("test-key"))).unwrap();

    assert_eq!(client.model(), "gemini-2.5-flash");
}

#[tokio::test]
async fn given_unreachable_endpoint_when_generating_then_returns_request_failed() {
    let settings = LlmSettings {
        api_key: Some("test-key".to_string()),
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 5,
        ..LlmSettings::default()
    };
    let client = GeminiClient::new(&settings).unwrap();

    let result = client.generate(SYSTEM_INSTRUCTION, "hello").await;

    assert!(matches!(result, Err(LlmClientError::ApiRequestFailed(_))));
}

#[test]
fn given_request_when_serializing_then_uses_gemini_field_names() {
    let request = GenerateContentRequest::new("be terse", "format this");

    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "systemInstruction": { "parts": [{ "text": "be terse" }] },
            "contents": [{ "role": "user", "parts": [{ "text": "format this" }] }]
        })
    );
}

#[test]
fn given_candidate_with_parts_when_reading_text_then_concatenates_parts() {
    let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": "<h1>T</h1>" }, { "text": "<p>b</p>" }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "totalTokenCount": 12 }
    }))
    .unwrap();

    assert_eq!(response.into_text().unwrap(), "<h1>T</h1><p>b</p>");
}

#[test]
fn given_blocked_prompt_when_reading_text_then_reports_block_reason() {
    let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
        "promptFeedback": { "blockReason": "SAFETY" }
    }))
    .unwrap();

    match response.into_text() {
        Err(LlmClientError::InvalidResponse(message)) => {
            assert_eq!(message, "prompt blocked: SAFETY");
        }
        other => panic!("expected InvalidResponse, got {other:?}"),
    }
}

#[test]
fn given_empty_candidates_when_reading_text_then_returns_invalid_response() {
    let response: GenerateContentResponse =
        serde_json::from_value(serde_json::json!({ "candidates": [] })).unwrap();

    assert!(matches!(
        response.into_text(),
        Err(LlmClientError::InvalidResponse(_))
    ));
}

#[test]
fn given_raw_text_when_building_prompt_then_wraps_it_in_delimiters() {
    let prompt = build_prompt("line one\nline two");

    assert_eq!(
        prompt,
        "Format the following text:\n\n---\nline one\nline two\n---"
    );
}

#[test]
fn given_system_instruction_when_reading_then_forbids_styling_and_wrappers() {
    assert!(SYSTEM_INSTRUCTION.contains("<h1>"));
    assert!(SYSTEM_INSTRUCTION.contains("<h2>"));
    assert!(SYSTEM_INSTRUCTION.contains("<h3>"));
    assert!(SYSTEM_INSTRUCTION.contains("<p>"));
    assert!(SYSTEM_INSTRUCTION.contains("style or class"));
}

#[tokio::test]
async fn given_text_artifact_when_reformatting_then_returns_llm_output_verbatim() {
    let llm = Arc::new(MockLlmClient::new("  <p>as is</p>\n"));
    let reformatter = LlmReformatter::new(llm.clone());

    let html = reformatter
        .format(ConversionArtifact::Text("as is".to_string()))
        .await
        .unwrap();

    assert_eq!(html.as_str(), "  <p>as is</p>\n");
    assert_eq!(llm.prompts(), vec![build_prompt("as is")]);
}

#[tokio::test]
async fn given_html_artifact_when_reformatting_then_returns_formatting_error() {
    let reformatter = LlmReformatter::new(Arc::new(MockLlmClient::new("<p>x</p>")));

    let result = reformatter
        .format(ConversionArtifact::HtmlFile(PathBuf::from("/tmp/doc.html")))
        .await;

    assert!(matches!(result, Err(FormatterError::FormattingFailed(_))));
}

#[test]
fn given_reformatter_when_queried_then_requires_text_output() {
    let reformatter = LlmReformatter::new(Arc::new(MockLlmClient::new("")));

    assert_eq!(reformatter.name(), "reformat");
    assert_eq!(reformatter.required_mode(), OutputMode::Text);
}

#[test]
fn given_missing_credential_error_when_converting_then_maps_to_formatter_credential_missing() {
    assert!(matches!(
        FormatterError::from(LlmClientError::CredentialMissing),
        FormatterError::CredentialMissing
    ));
    assert!(matches!(
        FormatterError::from(LlmClientError::InvalidResponse("x".to_string())),
        FormatterError::FormattingFailed(_)
    ));
}
