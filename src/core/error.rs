//! Client-side failure taxonomy.
//!
//! `Transport` means no usable response was obtained (connect failure,
//! timeout, garbled body); `Protocol` is a well-formed error response from
//! the server and carries one of the fixed codes. The two are kept distinct
//! so callers can tell "the remote rejected the call" from "the remote was
//! unreachable".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("rpc error {code}: {message}")]
    Protocol { code: i32, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("session is not initialized")]
    NotInitialized,
    #[error("session is closed")]
    Closed,
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn protocol_code(&self) -> Option<i32> {
        match self {
            ClientError::Protocol { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Transport(format!("timed out: {e}"))
        } else if e.is_connect() {
            ClientError::Transport(format!("connect failed: {e}"))
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_displays_protocol_errors_with_code() {
        let e = ClientError::Protocol {
            code: -32601,
            message: "Method not found: nope".into(),
        };
        assert_eq!(e.to_string(), "rpc error -32601: Method not found: nope");
        assert_eq!(e.protocol_code(), Some(-32601));
        assert!(!e.is_transport());
    }

    #[test]
    fn transport_errors_carry_no_code() {
        let e = ClientError::Transport("connection refused".into());
        assert!(e.is_transport());
        assert_eq!(e.protocol_code(), None);
    }

    #[test]
    fn state_errors_name_the_state() {
        assert_eq!(
            ClientError::NotInitialized.to_string(),
            "session is not initialized"
        );
        assert_eq!(ClientError::Closed.to_string(), "session is closed");
    }
}
