use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::document::LoadPolicy;

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";
const DEFAULT_FROM_EMAIL: &str = "Portfolio <onboarding@resend.dev>";

/// Which backend answers resume-chat questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatBackendKind {
    Gemini,
    Rules,
}

impl FromStr for ChatBackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ChatBackendKind::Gemini),
            "rules" => Ok(ChatBackendKind::Rules),
            other => bail!("CHAT_BACKEND must be 'gemini' or 'rules', got '{other}'"),
        }
    }
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Email relay settings. Absent when `RESEND_API_KEY` is not set.
#[derive(Clone)]
pub struct MailConfig {
    pub api_key: String,
    pub base_url: String,
    pub to: String,
    pub from: String,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub resume_path: PathBuf,
    pub load_policy: LoadPolicy,
    pub chat_backend: ChatBackendKind,
    pub gemini: Option<GeminiConfig>,
    pub mail: Option<MailConfig>,
    pub upstream_timeout: Duration,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing can be tested
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let chat_backend: ChatBackendKind = get("CHAT_BACKEND")
            .as_deref()
            .unwrap_or("gemini")
            .parse()?;

        let gemini = match chat_backend {
            ChatBackendKind::Gemini => Some(GeminiConfig {
                api_key: require("GEMINI_API_KEY")?,
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: get("GEMINI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            }),
            ChatBackendKind::Rules => None,
        };

        let mail = match get("RESEND_API_KEY") {
            Some(api_key) => Some(MailConfig {
                api_key,
                base_url: get("RESEND_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_RESEND_BASE_URL.to_string()),
                to: require("CONTACT_TO_EMAIL")?,
                from: get("CONTACT_FROM_EMAIL").unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
            }),
            None => None,
        };

        let upstream_timeout_secs = get("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?;
        if upstream_timeout_secs == 0 {
            bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            resume_path: get("RESUME_PATH")
                .unwrap_or_else(|| "assets/resume.pdf".to_string())
                .into(),
            load_policy: get("DOCUMENT_LOAD_POLICY")
                .as_deref()
                .unwrap_or("fail-fast")
                .parse()?,
            chat_backend,
            gemini,
            mail,
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
        })
    }
}

// Keys stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("resume_path", &self.resume_path)
            .field("load_policy", &self.load_policy)
            .field("chat_backend", &self.chat_backend)
            .field("gemini_model", &self.gemini.as_ref().map(|g| &g.model))
            .field("mail_enabled", &self.mail.is_some())
            .field("upstream_timeout", &self.upstream_timeout)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .finish()
    }
}
