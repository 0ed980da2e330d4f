//! Mailer — the single point of entry for email delivery (Resend HTTP API).
//!
//! One POST per submission, bounded by the client timeout, never retried.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::MailConfig;
use crate::contact::validation::ContactSubmission;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize, PartialEq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResendError {
    message: String,
}

#[derive(Clone)]
pub struct Mailer {
    client: Client,
    api_key: String,
    base_url: String,
    to: String,
    from: String,
}

impl Mailer {
    pub fn new(config: &MailConfig, timeout: Duration) -> Result<Self, MailError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            to: config.to.clone(),
            from: config.from.clone(),
        })
    }

    /// Builds the notification email for a submission received at `received_at`.
    pub fn compose(&self, submission: &ContactSubmission, received_at: DateTime<Utc>) -> OutgoingEmail {
        let subject = submission
            .subject
            .clone()
            .unwrap_or_else(|| format!("Portfolio contact from {}", submission.name));

        let text = format!(
            "Name: {}\nEmail: {}\nReceived: {}\n\n{}\n",
            submission.name,
            submission.email,
            received_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            submission.message
        );

        OutgoingEmail {
            from: self.from.clone(),
            to: vec![self.to.clone()],
            reply_to: submission.email.clone(),
            subject,
            text,
        }
    }

    /// Sends `email` and returns the provider's message id, if it reported one.
    pub async fn send(&self, email: &OutgoingEmail) -> Result<Option<String>, MailError> {
        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ResendError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(MailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // A 2xx with an unexpected body still means the email was accepted.
        let id = response
            .json::<SendResponse>()
            .await
            .ok()
            .and_then(|r| r.id);
        info!("Contact email accepted by provider (id: {:?})", id);
        Ok(id)
    }
}
