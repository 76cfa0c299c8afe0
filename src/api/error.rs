//! # API Errors
//!
//! Every failed backend call ends up here. The raw failure is logged and
//! turned into an `ApiError` whose `Display` is the one message a view
//! shows to the user.

use thiserror::Error;

/// Shown when the backend gave no usable message
pub const FALLBACK_MESSAGE: &str = "Something bad happened; please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset, ...)
    #[error("{message}")]
    Transport { message: String },

    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A 2xx body did not match the expected schema
    #[error("{message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn transport(err: reqwest::Error) -> Self {
        tracing::error!("API transport error: {err}");
        Self::Transport {
            message: FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        tracing::error!("API error status {status}, body: {body}");
        let message = backend_message(body).unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        Self::Status { status, message }
    }

    pub fn decode(err: serde_json::Error, body: &str) -> Self {
        tracing::error!("API response did not match schema: {err}; body: {body}");
        Self::Decode {
            message: FALLBACK_MESSAGE.to_string(),
        }
    }

    /// User-facing message
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message } | Self::Status { message, .. } | Self::Decode { message } => {
                message
            }
        }
    }

    /// HTTP status, when the backend answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"message": ...}`, validation responses of the form
/// `{"errors": [{"msg": ...}]}`, bare JSON strings and short plain-text bodies.
fn backend_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => {
            if let Some(message) = map.get("message").and_then(|m| m.as_str()) {
                return non_empty(message);
            }
            let errors = map.get("errors")?.as_array()?;
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        Ok(serde_json::Value::String(message)) => non_empty(&message),
        Ok(_) => None,
        // HTML error pages from proxies are not worth showing
        Err(_) if trimmed.starts_with('<') => None,
        Err(_) => non_empty(trimmed),
    }
}

fn non_empty(message: &str) -> Option<String> {
    let message = message.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_should_prefer_backend_message() {
        let err = ApiError::status(404, r#"{"message":"Movie not found"}"#);
        assert_eq!(err.to_string(), "Movie not found");
        assert_eq!(err.status_code(), Some(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn status_error_should_join_validation_messages() {
        let body = r#"{"errors":[{"msg":"Username is required"},{"msg":"Email does not appear to be valid"}]}"#;
        let err = ApiError::status(422, body);
        assert_eq!(
            err.message(),
            "Username is required; Email does not appear to be valid"
        );
    }

    #[test]
    fn status_error_should_use_plain_text_body() {
        let err = ApiError::status(400, "ripley already exists");
        assert_eq!(err.message(), "ripley already exists");
    }

    #[test]
    fn status_error_should_fall_back_on_empty_body() {
        let err = ApiError::status(500, "");
        assert_eq!(err.message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn status_error_should_fall_back_on_html_body() {
        let err = ApiError::status(503, "<html><body>Application Error</body></html>");
        assert_eq!(err.message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn status_error_should_fall_back_on_object_without_message() {
        let err = ApiError::status(401, r#"{"info":"nope"}"#);
        assert_eq!(err.message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn decode_error_should_use_fallback_message() {
        let json_err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = ApiError::decode(json_err, "\"x\"");
        assert_eq!(err.message(), FALLBACK_MESSAGE);
        assert_eq!(err.status_code(), None);
    }
}
