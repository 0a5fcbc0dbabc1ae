pub mod client;
pub mod config;
pub mod conversation;
pub mod models;
pub mod ui;

pub use client::{Chat, Client};
pub use config::{Config, DEFAULT_HOST};
pub use conversation::{Conversation, HistoryMode};
pub use models::{
    ChatMessage, ChatRequest, ChatResponse, Choice, Error, Model, Result, Role, Usage, GPT35_TURBO,
    GPT35_TURBO_0301,
};
