use serde::Deserialize;

use crate::contact::ContactError;

pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_EMAIL_CHARS: usize = 254;
pub const MAX_MESSAGE_CHARS: usize = 5000;
pub const MAX_SUBJECT_CHARS: usize = 200;

#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub subject: Option<String>,
}

/// A submission that passed validation, with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub subject: Option<String>,
}

pub fn validate_submission(request: &ContactRequest) -> Result<ContactSubmission, ContactError> {
    let name = required("name", &request.name, MAX_NAME_CHARS)?;
    let email = required("email", &request.email, MAX_EMAIL_CHARS)?;
    let message = required("message", &request.message, MAX_MESSAGE_CHARS)?;

    if !is_plausible_email(email) {
        return Err(ContactError::Validation(
            "email must be a valid address".to_string(),
        ));
    }
    // Header injection guard: single-line fields only.
    if name.contains(['\r', '\n']) {
        return Err(ContactError::Validation(
            "name must be a single line".to_string(),
        ));
    }

    let subject = match request.subject.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => {
            if s.chars().count() > MAX_SUBJECT_CHARS || s.contains(['\r', '\n']) {
                return Err(ContactError::Validation(format!(
                    "subject must be a single line of at most {MAX_SUBJECT_CHARS} characters"
                )));
            }
            Some(s.to_string())
        }
        _ => None,
    };

    Ok(ContactSubmission {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
        subject,
    })
}

fn required<'a>(field: &str, value: &'a str, max_chars: usize) -> Result<&'a str, ContactError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContactError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_chars {
        return Err(ContactError::Validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(trimmed)
}

/// `local@domain.tld` with no whitespace. Deliverability is the provider's problem.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}
