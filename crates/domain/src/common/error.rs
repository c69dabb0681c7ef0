use thiserror::Error;

/// Generic text shown when a request never produced a usable response.
/// Transport failures carry no server message, so the UI falls back to this.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "network error, the request could not be completed";

/// Fallback when the server reported a failure without a message body.
pub const UNSPECIFIED_FAILURE_MESSAGE: &str = "the server reported a failure";

/// The two error kinds a backend round-trip can produce.
///
/// `Transport` covers everything below the envelope: connection refused,
/// timeout, non-2xx status, non-JSON body. `Logical` means the server
/// answered with `success: false` and its message is echoed verbatim.
/// Both are terminal for the attempted operation; nothing retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("{0}")]
    Logical(String),
}

impl GatewayError {
    /// The text to surface through the notification sink: generic for
    /// transport failures, the server's own words for logical ones.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Transport(_) => TRANSPORT_FAILURE_MESSAGE,
            Self::Logical(message) => message,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_user_message_is_generic() {
        let err = GatewayError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), TRANSPORT_FAILURE_MESSAGE);
        assert!(err.is_transport());
    }

    #[test]
    fn logical_user_message_echoes_server_text() {
        let err = GatewayError::Logical("rule name already exists".to_string());
        assert_eq!(err.user_message(), "rule name already exists");
        assert!(!err.is_transport());
    }

    #[test]
    fn display_keeps_logical_text_verbatim() {
        let err = GatewayError::Logical("x".to_string());
        assert_eq!(format!("{err}"), "x");
    }
}
