use rustyline::error::ReadlineError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const GPT35_TURBO: &str = "gpt-3.5-turbo";
pub const GPT35_TURBO_0301: &str = "gpt-3.5-turbo-0301";

/// Name of the backend model a request targets.
///
/// Any string is accepted; an empty one stands for "keep the current model".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self(GPT35_TURBO.to_string())
    }
}

impl From<&str> for Model {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Model {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads a JSON `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn choices<'de, D>(deserializer: D) -> std::result::Result<Vec<Choice>, D::Error>
where
    D: Deserializer<'de>,
{
    let choices: Option<Vec<Option<Choice>>> = Option::deserialize(deserializer)?;
    Ok(choices
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Any role this client never sends itself, or none at all.
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: Model,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt_tokens: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completion_tokens: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_tokens: i32,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Choice {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: ChatMessage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub finish_reason: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub index: i32,
}

/// Error object the service sends alongside a non-200 status.
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiErrorBody {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
}

/// Every field tolerates being absent or `null`.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ChatResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub object: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usage: Usage,
    #[serde(default, deserialize_with = "choices")]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

impl ChatResponse {
    /// Content of the first choice, if the service produced one.
    pub fn first_answer(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("credential can't be empty")]
    InvalidCredential,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        kind: String,
    },
    #[error("no answer from service")]
    NoAnswer,
    #[error("Environment error: {0}")]
    Environment(#[from] std::env::VarError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Terminal error: {0}")]
    Terminal(#[from] clearscreen::Error),
    #[error("Readline error: {0}")]
    Readline(String),
}

impl Error {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_timeout())
    }
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Error::Readline(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
