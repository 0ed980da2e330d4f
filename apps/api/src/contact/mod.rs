// Contact form relay: validate a submission and hand it to the email provider.

pub mod handlers;
pub mod mailer;
pub mod validation;

use thiserror::Error;

use crate::contact::mailer::MailError;
use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0}")]
    Validation(String),

    #[error("delivery failed: {0}")]
    Delivery(#[from] MailError),

    #[error("contact form is not configured")]
    Disabled,
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::Validation(msg) => AppError::Validation(msg),
            ContactError::Delivery(e) => AppError::Mail(e.to_string()),
            ContactError::Disabled => AppError::ServiceUnavailable(
                "The contact form is not available right now.".to_string(),
            ),
        }
    }
}
