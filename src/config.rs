// src/config.rs
use anyhow::Context;

/// Runtime configuration, read once at startup from the environment
/// (a `.env` file is honored via dotenvy before this runs).
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Fixed system instruction sent with every upstream call, e.g.
    /// "Answer as a knowledgeable assistant". Optional.
    pub system_prompt: Option<String>,
}

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT must be a number")?,
            Err(_) => DEFAULT_PORT,
        };

        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY must be set")?;

        let model = std::env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let system_prompt = std::env::var("SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(Self { port, api_key, model, base_url, system_prompt })
    }
}
