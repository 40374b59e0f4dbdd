use std::collections::BTreeMap;

use serde::Deserialize;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Cannot connect to server. Please check your connection and try again.";

/// Error payload the backend sends with non-2xx answers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub details: Option<BTreeMap<String, serde_json::Value>>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    /// Field-level details as `field: m1, m2; other: m3`.
    fn details_text(&self) -> Option<String> {
        let details = self.details.as_ref()?;
        let parts: Vec<String> = details
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, flatten_messages(messages)))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

fn flatten_messages(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(flatten_messages)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("backend unreachable: {0}")]
    Network(String),

    #[error("backend rejected the credentials")]
    Unauthorized,

    #[error("backend answered {status}")]
    Backend { status: u16, body: ErrorBody },

    #[error("unexpected backend response: {0}")]
    Decode(String),

    /// The request could not be assembled before it was sent.
    #[error("invalid request: {0}")]
    Request(String),
}

impl ApiError {
    /// Text to show the user, unwrapped in priority order: field details,
    /// the error string, the backend message, then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Backend { body, .. } => body
                .details_text()
                .or_else(|| body.error.clone().filter(|e| !e.is_empty()))
                .or_else(|| body.message.clone().filter(|m| !m.is_empty()))
                .unwrap_or_else(|| fallback.to_string()),
            ApiError::Unauthorized | ApiError::Decode(_) | ApiError::Request(_) => {
                fallback.to_string()
            }
        }
    }
}
