//! Error types for the protocol layer.
//!
//! Decoding has exactly one observable failure, [`ParserError`]. The reason
//! a frame was rejected is a [`Violation`], which stays inside the crate and
//! is only reported through `tracing`.
//!
//! Encoding can only fail through caller misuse, reported as
//! [`ProtocolError`].

use std::fmt;

use crate::MessageKind;

/// The result of decoding a frame that is not a valid message.
///
/// It carries no detail: every malformed frame produces the same value,
/// [`PARSER_ERROR`]. Callers should drop the frame (or the connection) and
/// move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, thiserror::Error)]
#[error("failed to parse nydus message")]
pub struct ParserError;

/// The shared decode failure sentinel.
pub const PARSER_ERROR: ParserError = ParserError;

impl ParserError {
    /// Always [`MessageKind::ParserError`].
    pub const fn kind(self) -> MessageKind {
        MessageKind::ParserError
    }
}

/// Errors from encoding messages or converting payloads.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// `encode` was asked to emit a kind that never goes on the wire.
    #[error("message kind {0} cannot be encoded")]
    ReservedKind(MessageKind),

    /// A typed payload could not be turned into a JSON value
    /// (e.g. a map with non-string keys).
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// A payload did not match the type the caller asked for.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// A [`CodecConfig`](crate::CodecConfig) failed validation.
    #[error("invalid codec config: {0}")]
    InvalidConfig(String),
}

// ---------------------------------------------------------------------------
// Violation (crate-private)
// ---------------------------------------------------------------------------

/// Which optional header field a violation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Id,
    Path,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => f.write_str("id"),
            Self::Path => f.write_str("path"),
        }
    }
}

/// Why a frame was rejected.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Violation {
    #[error("frame too short")]
    TooShort,

    #[error("unrecognized message type")]
    UnknownKind,

    #[error("no body found")]
    MissingBody,

    #[error("{0} too long")]
    TooLong(Field),

    #[error("empty {0} specified")]
    Empty(Field),

    #[error("{0} not terminated")]
    Unterminated(Field),

    #[error("malformed path escape")]
    MalformedPath,

    #[error("invalid JSON: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("invalid {0} message, {1} is required")]
    Missing(MessageKind, Field),

    #[error("invalid {0} message, {1} is not allowed")]
    Forbidden(MessageKind, Field),

    #[error("invalid WELCOME message, unsupported protocol version")]
    UnsupportedVersion,
}
