//! Trello API-specific error types.

/// Failure of a single request against the Trello API.
///
/// Carries a human-readable message and, when the server answered at all, the
/// HTTP status code. Transport and decoding failures have no status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
    pub status: Option<u16>,
}

impl FetchError {
    /// Returns an error for a non-2xx response.
    ///
    pub fn status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("Request failed with status {}", status)
        } else {
            format!("Request failed with status {}: {}", status, body)
        };
        FetchError {
            message,
            status: Some(status),
        }
    }

    /// Returns an error without a status code.
    ///
    pub fn other(message: impl Into<String>) -> Self {
        FetchError {
            message: message.into(),
            status: None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError {
            message: format!("HTTP request failed: {}", e),
            status: e.status().map(|s| s.as_u16()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::other(format!("Failed to decode API response: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_status() {
        let error = FetchError::status(401, "invalid token\n");
        assert_eq!(error.status, Some(401));
        assert!(error.to_string().contains("401"));
        assert!(error.to_string().ends_with("invalid token"));

        let error = FetchError::status(500, "");
        assert_eq!(error.to_string(), "Request failed with status 500");
    }

    #[test]
    fn test_fetch_error_from_serde() {
        let serde_error = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let error: FetchError = serde_error.into();
        assert_eq!(error.status, None);
        assert!(error.to_string().contains("decode"));
    }
}
