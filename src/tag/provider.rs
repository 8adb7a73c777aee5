// src/tag/provider.rs
//! Tagging service providers: the real OpenAI chat-completions client plus
//! a deterministic mock for tests and offline runs.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::TaggerConfig;
use crate::error::Error;

/// Low-level provider seam: one prompt in, one raw structured reply out.
/// Separated from the tagger so tests can swap in a mock without touching
/// the parse/validate path.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, Error>;
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

/// OpenAI provider (Chat Completions API). Requires `OPENAI_API_KEY`.
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    pub fn from_config(config: &TaggerConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("crossborder-content-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key: config.resolve_api_key(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, Error> {
        if self.api_key.is_empty() {
            return Err(Error::Authentication(
                "OPENAI_API_KEY is not set (env var or config/tagger.json)".into(),
            ));
        }

        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct RespFormat {
            #[serde(rename = "type")]
            kind: &'static str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
            max_tokens: u32,
            response_format: RespFormat,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: String,
        }

        let req = Req {
            model: &self.model,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
            // Low temperature for consistent tagging; json_object forces a
            // machine-parseable reply.
            temperature: 0.3,
            max_tokens: 1000,
            response_format: RespFormat { kind: "json_object" },
        };

        let resp = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Transport(format!("tagging request timed out: {e}"))
                } else {
                    Error::Transport(format!("tagging request failed: {e}"))
                }
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimit);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Authentication(format!(
                "tagging service rejected the credential ({status})"
            )));
        }
        if !status.is_success() {
            return Err(Error::Transport(format!(
                "tagging service returned {status}"
            )));
        }

        let body: Resp = resp
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(format!("invalid completion envelope: {e}")))?;
        let content = body
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .unwrap_or("");
        if content.is_empty() {
            return Err(Error::MalformedResponse("empty completion".into()));
        }
        Ok(content.to_string())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Scripted reply for a [`MockProvider`].
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this body verbatim.
    Body(String),
    /// Simulate HTTP 429.
    RateLimited,
    /// Simulate a network failure.
    Down(String),
    /// Simulate a rejected credential.
    Unauthorized,
}

/// Deterministic provider for tests and offline runs.
pub struct MockProvider {
    reply: MockReply,
}

impl MockProvider {
    pub fn new(reply: MockReply) -> Self {
        Self { reply }
    }

    pub fn with_body(body: &str) -> Self {
        Self::new(MockReply::Body(body.to_string()))
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, Error> {
        match &self.reply {
            MockReply::Body(b) => Ok(b.clone()),
            MockReply::RateLimited => Err(Error::RateLimit),
            MockReply::Down(why) => Err(Error::Transport(why.clone())),
            MockReply::Unauthorized => {
                Err(Error::Authentication("mock credential rejected".into()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
