// src/message.rs
use serde::{Deserialize, Serialize};

/// Who produced a turn. The wire format only knows these two values;
/// anything else is rejected during request validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One message in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self { role: Role::Model, content: content.into() }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Turn>,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}
