//! GeminiModel -- concrete [`GenerativeModel`] implementation for Google Gemini.
//!
//! Sends one non-streaming `generateContent` call per relay request. The API
//! key is wrapped in [`secrecy::SecretString`] and only exposed when building
//! the request header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use relaychat_core::llm::provider::GenerativeModel;
use relaychat_observe::genai_attrs::{
    GEN_AI_RESPONSE_FINISH_REASONS, GEN_AI_RESPONSE_MODEL, GEN_AI_USAGE_INPUT_TOKENS,
    GEN_AI_USAGE_OUTPUT_TOKENS, OP_CHAT, PROVIDER_GEMINI,
};
use relaychat_types::chat::Turn;
use relaychat_types::llm::{Generation, LlmError, Usage};

use super::types::{GeminiContent, GeminiPart, GenerateContentRequest, GenerateContentResponse};

/// Google Gemini generative model.
///
/// Deliberately not `Debug`: the struct holds the API key.
pub struct GeminiModel {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiModel {
    /// Create a new Gemini model client.
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(
        api_key: SecretString,
        model: String,
        base_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn send(&self, contents: &[Turn], span: &tracing::Span) -> Result<Generation, LlmError> {
        let body = to_gemini_request(contents);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let gemini_resp: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let generation = extract_generation(gemini_resp, &self.model)?;

        span.record(GEN_AI_RESPONSE_MODEL, generation.model.as_str());
        if let Some(reason) = &generation.finish_reason {
            span.record(GEN_AI_RESPONSE_FINISH_REASONS, reason.as_str());
        }
        if let Some(usage) = &generation.usage {
            span.record(GEN_AI_USAGE_INPUT_TOKENS, usage.input_tokens);
            span.record(GEN_AI_USAGE_OUTPUT_TOKENS, usage.output_tokens);
        }

        Ok(generation)
    }
}

/// Map relay turns onto Gemini contents, one content per turn.
pub(crate) fn to_gemini_request(contents: &[Turn]) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: contents.iter().map(to_gemini_content).collect(),
    }
}

fn to_gemini_content(turn: &Turn) -> GeminiContent {
    let mut parts = Vec::with_capacity(2);
    // An attachment-only turn sends no empty text part.
    if !turn.text.is_empty() || turn.attachment.is_none() {
        parts.push(GeminiPart::text(&turn.text));
    }
    if let Some(attachment) = &turn.attachment {
        parts.push(GeminiPart::inline(&attachment.mime_type, &attachment.data));
    }

    GeminiContent {
        role: Some(turn.role.to_string()),
        parts,
    }
}

/// Pull the first candidate's first part text out of a response.
pub(crate) fn extract_generation(
    resp: GenerateContentResponse,
    requested_model: &str,
) -> Result<Generation, LlmError> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(match resp.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => LlmError::Blocked(reason),
            None => LlmError::EmptyResponse,
        });
    };

    let text = candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or(LlmError::MissingText)?;

    Ok(Generation {
        text,
        model: resp
            .model_version
            .unwrap_or_else(|| requested_model.to_string()),
        finish_reason: candidate.finish_reason,
        usage: resp.usage_metadata.map(|u| Usage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
        }),
    })
}

impl GenerativeModel for GeminiModel {
    fn name(&self) -> &str {
        PROVIDER_GEMINI
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, contents: &[Turn]) -> Result<Generation, LlmError> {
        // Field names must stay in sync with `genai_attrs`.
        let span = tracing::info_span!(
            "gen_ai.generate",
            otel.name = %format!("{OP_CHAT} {}", self.model),
            "gen_ai.operation.name" = OP_CHAT,
            "gen_ai.provider.name" = PROVIDER_GEMINI,
            "gen_ai.request.model" = %self.model,
            "gen_ai.response.model" = tracing::field::Empty,
            "gen_ai.response.finish_reasons" = tracing::field::Empty,
            "gen_ai.usage.input_tokens" = tracing::field::Empty,
            "gen_ai.usage.output_tokens" = tracing::field::Empty,
        );

        self.send(contents, &span).instrument(span.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use relaychat_types::chat::Attachment;
    use serde_json::{Value, json};

    use super::*;

    /// What the mock upstream saw for one call.
    #[derive(Debug, Clone)]
    struct Seen {
        path: String,
        api_key: Option<String>,
        body: Value,
    }

    #[derive(Clone)]
    struct Upstream {
        seen: Arc<Mutex<Vec<Seen>>>,
        status: StatusCode,
        body: String,
    }

    async fn handle(
        State(upstream): State<Upstream>,
        Path(rest): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, String) {
        upstream.seen.lock().unwrap().push(Seen {
            path: rest,
            api_key: headers
                .get("x-goog-api-key")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });
        (upstream.status, upstream.body.clone())
    }

    /// Serve a canned response on a random local port.
    async fn spawn_upstream(status: StatusCode, body: impl Into<String>) -> (String, Upstream) {
        let upstream = Upstream {
            seen: Arc::new(Mutex::new(Vec::new())),
            status,
            body: body.into(),
        };
        let app = Router::new()
            .route("/v1beta/models/{*rest}", post(handle))
            .with_state(upstream.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), upstream)
    }

    fn model_at(base_url: String) -> GeminiModel {
        GeminiModel::new(
            SecretString::from("test-key-not-real"),
            "gemini-2.5-flash".to_string(),
            base_url,
            Some(Duration::from_secs(5)),
        )
        .unwrap()
    }

    fn reply_body(text: &str) -> String {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 7, "candidatesTokenCount": 3}
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_returns_first_candidate_text() {
        let (base, upstream) = spawn_upstream(StatusCode::OK, reply_body("Hi there")).await;
        let model = model_at(base);

        let generation = model.generate(&[Turn::user("Hello")]).await.unwrap();

        assert_eq!(generation.text, "Hi there");
        assert_eq!(generation.model, "gemini-2.5-flash");
        assert_eq!(generation.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(
            generation.usage,
            Some(Usage {
                input_tokens: 7,
                output_tokens: 3
            })
        );

        let seen = upstream.seen.lock().unwrap();
        assert_eq!(seen[0].path, "gemini-2.5-flash:generateContent");
        assert_eq!(seen[0].api_key.as_deref(), Some("test-key-not-real"));
    }

    #[tokio::test]
    async fn test_generate_sends_every_turn() {
        let (base, upstream) = spawn_upstream(StatusCode::OK, reply_body("ok")).await;
        let model = model_at(base);
        let contents = vec![
            Turn::user("Hello"),
            Turn::model("Hi there"),
            Turn::user("How are you?"),
        ];

        model.generate(&contents).await.unwrap();

        let seen = upstream.seen.lock().unwrap();
        let sent = seen[0].body["contents"].as_array().unwrap();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0], json!({"role": "user", "parts": [{"text": "Hello"}]}));
        assert_eq!(sent[1]["role"], "model");
        assert_eq!(sent[2]["parts"][0]["text"], "How are you?");
    }

    #[tokio::test]
    async fn test_generate_no_candidates_is_error() {
        let (base, _upstream) = spawn_upstream(StatusCode::OK, "{\"candidates\": []}").await;
        let err = model_at(base).generate(&[Turn::user("Hello")]).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_generate_blocked_prompt_is_error() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}}).to_string();
        let (base, _upstream) = spawn_upstream(StatusCode::OK, body).await;
        let err = model_at(base).generate(&[Turn::user("Hello")]).await.unwrap_err();
        assert!(matches!(err, LlmError::Blocked(reason) if reason == "SAFETY"));
    }

    #[tokio::test]
    async fn test_generate_non_success_status_is_error() {
        let (base, _upstream) =
            spawn_upstream(StatusCode::BAD_REQUEST, "{\"error\": {\"message\": \"bad key\"}}").await;
        let err = model_at(base).generate(&[Turn::user("Hello")]).await.unwrap_err();
        match err {
            LlmError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("bad key"));
            }
            other => panic!("expected Status error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn test_generate_malformed_body_is_error() {
        let (base, _upstream) = spawn_upstream(StatusCode::OK, "not json").await;
        let err = model_at(base).generate(&[Turn::user("Hello")]).await.unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_generate_unreachable_upstream_is_transport_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = model_at(format!("http://{addr}"))
            .generate(&[Turn::user("Hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Transport(_)));
    }

    #[test]
    fn test_attachment_maps_to_inline_data() {
        let attachment = Attachment::from_bytes(b"jpeg", "image/jpeg");
        let turn = Turn::user("what is this").with_attachment(Some(attachment.clone()));

        let request = to_gemini_request(&[turn]);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["contents"][0]["parts"],
            json!([
                {"text": "what is this"},
                {"inlineData": {"mimeType": "image/jpeg", "data": attachment.data}}
            ])
        );
    }

    #[test]
    fn test_attachment_only_turn_omits_empty_text() {
        let turn = Turn::user("").with_attachment(Some(Attachment::from_bytes(b"x", "image/png")));
        let request = to_gemini_request(&[turn]);
        assert_eq!(request.contents[0].parts.len(), 1);
        assert!(request.contents[0].parts[0].inline_data.is_some());
    }

    #[test]
    fn test_extract_missing_text_part() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"role": "model", "parts": []}}]
        }))
        .unwrap();
        assert!(matches!(
            extract_generation(resp, "gemini-2.5-flash"),
            Err(LlmError::MissingText)
        ));
    }

    #[test]
    fn test_extract_prefers_reported_model_version() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "hi"}]}}],
            "modelVersion": "gemini-2.5-flash-001"
        }))
        .unwrap();
        let generation = extract_generation(resp, "gemini-2.5-flash").unwrap();
        assert_eq!(generation.model, "gemini-2.5-flash-001");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let model = model_at("http://localhost:1234/".to_string());
        assert_eq!(
            model.url(),
            "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
