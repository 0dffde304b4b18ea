//! Gemini REST client.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use futures::{future, stream, Stream, StreamExt, TryStreamExt};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::prompts::{CHAT_SYSTEM_INSTRUCTION, JOURNAL_SYSTEM_INSTRUCTION};
use super::sse::SseDecoder;
use super::{Analyzer, ChatBackend, FragmentStream};
use crate::config::CompanionConfig;
use crate::error::SerenityError;
use crate::features::chat::ChatMessage;
use crate::features::journal::Analysis;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` family of endpoints.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    request_timeout: Duration,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client from the companion settings.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &CompanionConfig) -> Result<Self, SerenityError> {
        let api_key = config.resolve_api_key()?;
        let request_timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder().connect_timeout(request_timeout).build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout,
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{}:{method}", self.base_url, self.model)
    }

    fn post(&self, method: &str) -> RequestBuilder {
        self.client
            .post(self.endpoint(method))
            .header(API_KEY_HEADER, &self.api_key)
    }
}

#[async_trait]
impl ChatBackend for GeminiClient {
    async fn stream_reply(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<FragmentStream, SerenityError> {
        let body = chat_request(history, message);
        tracing::debug!(model = %self.model, turns = body.contents.len(), "starting chat stream");

        let response = self
            .post("streamGenerateContent")
            .query(&[("alt", "sse")])
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        Ok(fragments(response.bytes_stream()))
    }
}

#[async_trait]
impl Analyzer for GeminiClient {
    async fn analyze(&self, content: &str) -> Result<Analysis, SerenityError> {
        let body = analysis_request(content);
        tracing::debug!(model = %self.model, "requesting journal analysis");

        let response = self
            .post("generateContent")
            .timeout(self.request_timeout)
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let parsed: GenerateContentResponse = response.json().await?;
        let text = extract_text(parsed)?;
        serde_json::from_str(&text).map_err(|err| {
            SerenityError::Companion(format!("analysis was not in the expected shape: {err}"))
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> Content<'a> {
    fn new(role: Option<&'a str>, text: &'a str) -> Self {
        Self {
            role,
            parts: vec![Part { text }],
        }
    }
}

fn chat_request<'a>(history: &'a [ChatMessage], message: &'a str) -> GenerateContentRequest<'a> {
    let mut contents: Vec<Content<'a>> = history
        .iter()
        .filter(|msg| !msg.text.is_empty())
        .map(|msg| Content::new(Some(msg.role.as_api_str()), &msg.text))
        .collect();
    contents.push(Content::new(Some("user"), message));

    GenerateContentRequest {
        contents,
        system_instruction: Content::new(None, CHAT_SYSTEM_INSTRUCTION),
        generation_config: None,
    }
}

fn analysis_request(content: &str) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content::new(Some("user"), content)],
        system_instruction: Content::new(None, JOURNAL_SYSTEM_INSTRUCTION),
        generation_config: Some(json!({
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "sentiment": {
                        "type": "STRING",
                        "enum": ["positive", "neutral", "negative"]
                    },
                    "reflection": { "type": "STRING" }
                },
                "required": ["sentiment", "reflection"]
            }
        })),
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

impl ErrorBody {
    fn describe(self, fallback: &str) -> String {
        let message = self.message.unwrap_or_else(|| fallback.to_string());
        match self.status {
            Some(status) if !status.is_empty() => format!("{status}: {message}"),
            _ => message,
        }
    }
}

/// Concatenated text of the first candidate. Empty when the chunk carries no text.
fn candidate_text(response: GenerateContentResponse) -> Result<String, SerenityError> {
    if let Some(error) = response.error {
        return Err(SerenityError::Companion(error.describe("stream reported an error")));
    }

    Ok(response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}

fn extract_text(response: GenerateContentResponse) -> Result<String, SerenityError> {
    let text = candidate_text(response)?;
    if text.trim().is_empty() {
        return Err(SerenityError::Companion(
            "Gemini API returned no text in the response candidates".into(),
        ));
    }
    Ok(text)
}

fn parse_fragment(payload: &str) -> Result<String, SerenityError> {
    let response: GenerateContentResponse = serde_json::from_str(payload)?;
    candidate_text(response)
}

/// Turn an SSE response body into text deltas, ending after the first error.
fn fragments<S, B>(body: S) -> FragmentStream
where
    S: Stream<Item = Result<B, reqwest::Error>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let state = (Box::pin(body), SseDecoder::new(), VecDeque::<String>::new(), false);

    let deltas = stream::unfold(
        state,
        |(mut body, mut decoder, mut pending, mut ended)| async move {
            loop {
                if let Some(payload) = pending.pop_front() {
                    let item = parse_fragment(&payload);
                    if item.is_err() {
                        pending.clear();
                        ended = true;
                    }
                    return Some((item, (body, decoder, pending, ended)));
                }
                if ended {
                    return None;
                }
                match body.next().await {
                    Some(Ok(chunk)) => pending.extend(decoder.push(chunk.as_ref())),
                    Some(Err(err)) => {
                        ended = true;
                        return Some((Err(err.into()), (body, decoder, pending, ended)));
                    }
                    None => {
                        ended = true;
                        pending.extend(decoder.finish());
                    }
                }
            }
        },
    );

    Box::pin(deltas.try_filter(|text| future::ready(!text.is_empty())))
}

async fn ensure_success(response: Response) -> Result<Response, SerenityError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
    Err(map_http_error(status, &body))
}

fn map_http_error(status: StatusCode, body: &str) -> SerenityError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| wrapper.error.describe(body))
        .unwrap_or_else(|_| body.to_string());

    SerenityError::Companion(format!("{} {message}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::chat::Role;
    use crate::features::journal::Sentiment;

    fn sse(payloads: &[&str]) -> Vec<Result<Vec<u8>, reqwest::Error>> {
        payloads
            .iter()
            .map(|p| Ok(format!("data: {p}\r\n\r\n").into_bytes()))
            .collect()
    }

    fn chunk(text: &str) -> String {
        json!({"candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]})
            .to_string()
    }

    #[test]
    fn test_chat_request_layout() {
        let history = vec![ChatMessage::greeting("Hello."), ChatMessage::user("Hi")];
        let body = serde_json::to_value(chat_request(&history, "I feel tense")).unwrap();

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "model");
        assert_eq!(contents[0]["parts"][0]["text"], "Hello.");
        assert_eq!(contents[1]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "I feel tense");
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("You are Serenity"));
        assert!(body["systemInstruction"].get("role").is_none());
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_chat_request_skips_empty_messages() {
        let mut empty = ChatMessage::placeholder();
        empty.is_streaming = false;
        let history = vec![ChatMessage::greeting("Hello."), empty];
        let request = chat_request(&history, "hi");
        assert_eq!(request.contents.len(), 2);
        assert_eq!(history[1].role, Role::Companion);
    }

    #[test]
    fn test_analysis_request_has_schema() {
        let body = serde_json::to_value(analysis_request("today was fine")).unwrap();
        let config = &body["generationConfig"];

        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(
            config["responseSchema"]["properties"]["sentiment"]["enum"],
            json!(["positive", "neutral", "negative"])
        );
        assert_eq!(
            config["responseSchema"]["required"],
            json!(["sentiment", "reflection"])
        );
    }

    #[test]
    fn test_parse_fragment() {
        assert_eq!(parse_fragment(&chunk("Hel")).unwrap(), "Hel");
        assert_eq!(parse_fragment(r#"{"candidates":[]}"#).unwrap(), "");
        assert!(parse_fragment("not json").is_err());

        let err = parse_fragment(r#"{"error":{"message":"quota","status":"RESOURCE_EXHAUSTED"}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("RESOURCE_EXHAUSTED: quota"));
    }

    #[test]
    fn test_extract_analysis_text() {
        let response: GenerateContentResponse = serde_json::from_str(&chunk(
            r#"{"sentiment":"positive","reflection":"Nice."}"#,
        ))
        .unwrap();
        let text = extract_text(response).unwrap();
        let analysis: Analysis = serde_json::from_str(&text).unwrap();

        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.reflection, "Nice.");
    }

    #[test]
    fn test_extract_text_rejects_empty() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(response).is_err());
    }

    #[test]
    fn test_map_http_error() {
        let body = r#"{"error":{"code":429,"message":"Slow down","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(
            err.to_string(),
            "Companion service error: 429 RESOURCE_EXHAUSTED: Slow down"
        );

        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(err.to_string().ends_with("502 upstream down"));
    }

    #[tokio::test]
    async fn test_fragments_yield_deltas_in_order() {
        let body = stream::iter(sse(&[
            chunk("Hel").as_str(),
            chunk("lo").as_str(),
            chunk("").as_str(),
            chunk(" there").as_str(),
        ]));
        let deltas: Vec<String> = fragments(body).try_collect().await.unwrap();
        assert_eq!(deltas, vec!["Hel", "lo", " there"]);
    }

    #[tokio::test]
    async fn test_fragments_across_chunk_boundaries() {
        let raw = format!("data: {}\n\ndata: {}", chunk("a"), chunk("b"));
        let (head, tail) = raw.as_bytes().split_at(10);
        let body = stream::iter(vec![
            Ok::<_, reqwest::Error>(head.to_vec()),
            Ok(tail.to_vec()),
        ]);

        let deltas: Vec<String> = fragments(body).try_collect().await.unwrap();
        assert_eq!(deltas, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_fragments_stop_after_error() {
        let body = stream::iter(sse(&[
            chunk("ok").as_str(),
            "garbage",
            chunk("never").as_str(),
        ]));
        let items: Vec<Result<String, SerenityError>> = fragments(body).collect().await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap(), "ok");
        assert!(items[1].is_err());
    }

    #[test]
    fn test_endpoint() {
        let config = CompanionConfig {
            api_key: Some("secret-key-123".to_string()),
            base_url: "https://example.test/models/".to_string(),
            ..CompanionConfig::default()
        };
        let client = GeminiClient::from_config(&config).unwrap();

        assert_eq!(
            client.endpoint("generateContent"),
            format!("https://example.test/models/{}:generateContent", client.model)
        );
        assert!(!format!("{client:?}").contains("secret-key-123"));
    }
}
