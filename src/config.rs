use crate::models::{Error, Result};
use std::env;
use std::fmt;

pub const DEFAULT_HOST: &str = "https://api.openai.com";
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Credentials for the chat-completion service. Never holds an empty key.
#[derive(Clone)]
pub struct Config {
    api_key: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::InvalidCredential);
        }
        Ok(Self { api_key })
    }

    /// Reads the key from `OPENAI_API_KEY`, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::new(env::var(API_KEY_VAR)?)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config").field("api_key", &"<redacted>").finish()
    }
}
