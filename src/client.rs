use crate::config::{Config, DEFAULT_HOST};
use crate::conversation::{Conversation, HistoryMode};
use crate::models::{ChatResponse, Error, Model, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::debug;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Anything that can answer a user message.
#[async_trait]
pub trait Chat {
    async fn chat(&mut self, message: &str) -> Result<String>;
}

/// Client for the chat-completion endpoint.
///
/// Each client owns its conversation, so separate clients never see each
/// other's constraints or history.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    host: String,
    config: Config,
    conversation: Conversation,
    history: HistoryMode,
}

impl Client {
    /// Creates a client with the default transport.
    ///
    /// An empty `model` selects [`GPT35_TURBO`](crate::models::GPT35_TURBO).
    /// Each constraint is sent ahead of every user message as a user turn the
    /// assistant has already acknowledged, e.g. "You're a travel assistant
    /// that only knows about travel".
    pub fn new<M, I, S>(api_key: &str, model: M, constraints: I) -> Result<Self>
    where
        M: Into<Model>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = Config::new(api_key)?;
        let http = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Ok(Self::from_config(http, config, model, constraints))
    }

    /// Creates a client on a caller-built transport (timeouts, proxies, pooling).
    pub fn with_http_client<M, I, S>(
        http: reqwest::Client,
        api_key: &str,
        model: M,
        constraints: I,
    ) -> Result<Self>
    where
        M: Into<Model>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = Config::new(api_key)?;
        Ok(Self::from_config(http, config, model, constraints))
    }

    pub fn from_config<M, I, S>(
        http: reqwest::Client,
        config: Config,
        model: M,
        constraints: I,
    ) -> Self
    where
        M: Into<Model>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut conversation = Conversation::new();
        conversation.set_model(model);
        conversation.add_constraints(constraints);

        Self {
            http,
            host: DEFAULT_HOST.to_string(),
            config,
            conversation,
            history: HistoryMode::default(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_history(mut self, history: HistoryMode) -> Self {
        self.history = history;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn history(&self) -> HistoryMode {
        self.history
    }

    pub fn model(&self) -> &Model {
        self.conversation.model()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Forgets every exchange, keeping the constraints.
    pub fn reset_history(&mut self) {
        self.conversation.reset();
    }

    async fn complete(&self, message: &str) -> Result<String> {
        let url = format!("{}{}", self.host, COMPLETIONS_PATH);
        let request = self.conversation.request_with(message);
        let body = serde_json::to_vec(&request)?;
        debug!(
            %url,
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.api_key())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), len = bytes.len(), "chat completion answered");

        // A bare `null` body carries nothing, like `{}`.
        let parsed = serde_json::from_slice::<Option<ChatResponse>>(&bytes)?.unwrap_or_default();

        if status != StatusCode::OK {
            let error = parsed.error.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: error.message,
                kind: error.kind,
            });
        }

        parsed
            .first_answer()
            .map(str::to_string)
            .ok_or(Error::NoAnswer)
    }
}

#[async_trait]
impl Chat for Client {
    async fn chat(&mut self, message: &str) -> Result<String> {
        let reply = self.complete(message).await?;
        if self.history == HistoryMode::Retain {
            self.conversation.record_exchange(message, reply.as_str());
        }
        Ok(reply)
    }
}
