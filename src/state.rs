// src/state.rs
use std::sync::Arc;

use crate::services::gemini::TextGenerator;

pub type SharedState = Arc<AppState>;

/// Shared across requests. Holds no per-conversation state; clients resend
/// their full history on every call.
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}
