use thiserror::Error;

/// Top-level error for everything the front end does outside the DOM.
/// All variants carry a human-readable message for display/logging.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Transport errors ─────────────────────────────────────────────────────
    #[error("Network error calling {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Erreur API: {status} ({url})")]
    HttpStatus { url: String, status: u16 },

    // ── Payload errors ───────────────────────────────────────────────────────
    #[error("Format de réponse invalide ({context}): {message}")]
    MalformedPayload { context: String, message: String },

    /// The collaborator answered, but with a status other than `"success"`.
    #[error("{message}")]
    Rejected { message: String },

    // ── Storage errors ───────────────────────────────────────────────────────
    #[error("Storage key '{key}' unavailable: {message}")]
    Storage { key: String, message: String },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── System errors ────────────────────────────────────────────────────────
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn transport(url: impl Into<String>, message: impl ToString) -> Self {
        AppError::Transport { url: url.into(), message: message.to_string() }
    }

    pub fn malformed(context: impl Into<String>, message: impl ToString) -> Self {
        AppError::MalformedPayload { context: context.into(), message: message.to_string() }
    }

    pub fn storage(key: impl Into<String>, message: impl ToString) -> Self {
        AppError::Storage { key: key.into(), message: message.to_string() }
    }

    /// Network failure or non-2xx status.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Transport { .. } | AppError::HttpStatus { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, AppError::Rejected { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, AppError::MalformedPayload { .. } | AppError::Serialization(_))
    }

    /// Text suitable for a status line: rejections are shown verbatim.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Rejected { message } => message.clone(),
            other => other.to_string(),
        }
    }
}
