use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response. `message` carries Linode's `errors[].reason` values.
    #[error("Linode API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode Linode API response: {0}")]
    Decode(String),

    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// A 4xx answer: the upstream understood the request and refused it.
    pub fn is_auth_failure(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<ErrorReason>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorReason {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub reason: String,
}

/// Build the user-facing message for a failed response body.
pub(crate) fn status_message(status: reqwest::StatusCode, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let reasons: Vec<String> = parsed
        .errors
        .iter()
        .filter(|e| !e.reason.trim().is_empty())
        .map(|e| match e.field.as_deref() {
            Some(field) if !field.is_empty() => format!("{field}: {}", e.reason),
            _ => e.reason.clone(),
        })
        .collect();
    if !reasons.is_empty() {
        return reasons.join("; ");
    }
    status
        .canonical_reason()
        .unwrap_or("unexpected status")
        .to_string()
}
