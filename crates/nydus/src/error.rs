//! Unified error type for the nydus crate.

use nydus_protocol::{ParserError, ProtocolError};

/// Top-level error wrapping everything the facade and CLI can hit.
///
/// The `#[from]` attributes let `?` convert protocol errors, decode
/// failures and I/O errors without explicit mapping.
#[derive(Debug, thiserror::Error)]
pub enum NydusError {
    /// Encode-side misuse or a payload conversion failure.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A frame failed to decode.
    #[error(transparent)]
    Parse(#[from] ParserError),

    /// A JSON argument or output line could not be processed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading frames or writing results failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use nydus_protocol::{MessageKind, PARSER_ERROR};

    #[test]
    fn test_from_protocol_error() {
        let err: NydusError = ProtocolError::ReservedKind(MessageKind::ParserError).into();
        assert!(matches!(err, NydusError::Protocol(_)));
        assert!(err.to_string().contains("PARSER_ERROR"));
    }

    #[test]
    fn test_from_parser_error() {
        let err: NydusError = PARSER_ERROR.into();
        assert!(matches!(err, NydusError::Parse(_)));
        assert_eq!(err.to_string(), "failed to parse nydus message");
    }

    #[test]
    fn test_from_io_error() {
        let err: NydusError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(err, NydusError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: NydusError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
