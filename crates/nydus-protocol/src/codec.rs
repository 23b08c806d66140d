//! Frame encoding and decoding.
//!
//! The [`Codec`] trait is the seam the rest of a nydus stack talks to: a
//! transport hands it complete frames and gets [`Message`]s back. Anything
//! speaking a different frame format can implement it too.
//!
//! [`FrameCodec`] is the compact text format. The free functions
//! [`encode`] and [`decode`] use it with the default limits.

use serde_json::Value;

use crate::error::Violation;
use crate::path::encode_path;
use crate::payload::parse_body;
use crate::tokenizer::tokenize;
use crate::validate::{validate, Candidate};
use crate::{
    CodecConfig, Message, MessageKind, ParserError, ProtocolError, BODY_SIGIL, ID_SIGIL,
    PARSER_ERROR, PATH_SIGIL,
};

/// Converts messages to frames and back.
///
/// Implementations are stateless with respect to the frames they process,
/// so one codec can be shared by every connection (`Send + Sync`).
pub trait Codec: Send + Sync + 'static {
    /// Encodes a message as a single frame.
    fn encode(&self, message: &Message) -> String;

    /// Decodes a single frame.
    ///
    /// # Errors
    /// Every kind of malformed input yields the same [`ParserError`].
    fn decode(&self, frame: &str) -> Result<Message, ParserError>;
}

// ---------------------------------------------------------------------------
// FrameCodec
// ---------------------------------------------------------------------------

/// The compact `<kind>[$id][~path]|[body]` format.
///
/// ## Example
///
/// ```rust
/// use nydus_protocol::{Codec, FrameCodec, Message};
/// use serde_json::json;
///
/// let codec = FrameCodec::new();
///
/// let msg = Message::invoke("7", "/hi there").with_data(json!({ "hello": true }));
/// let frame = codec.encode(&msg);
/// assert_eq!(frame, r#"1$7~/hi%20there|{"hello":true}"#);
///
/// assert_eq!(codec.decode(&frame), Ok(msg));
/// assert!(codec.decode("5|\"hi\"").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCodec {
    config: CodecConfig,
}

impl FrameCodec {
    /// A codec enforcing the protocol's wire limits.
    pub const fn new() -> Self {
        Self {
            config: CodecConfig::DEFAULT,
        }
    }

    /// A codec with tightened limits.
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidConfig` if `config` fails
    /// [`CodecConfig::validate`].
    pub fn with_config(config: CodecConfig) -> Result<Self, ProtocolError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The limits this codec decodes with.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn decode_frame(&self, frame: &str) -> Result<Message, Violation> {
        let tokens = tokenize(frame, &self.config)?;
        let data = parse_body(tokens.body)?;
        validate(Candidate {
            kind: tokens.kind,
            id: tokens.id,
            path: tokens.path,
            data,
        })
    }
}

impl Codec for FrameCodec {
    fn encode(&self, message: &Message) -> String {
        message.encode()
    }

    fn decode(&self, frame: &str) -> Result<Message, ParserError> {
        self.decode_frame(frame).map_err(|violation| {
            tracing::debug!(reason = %violation, "invalid nydus message");
            PARSER_ERROR
        })
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Formats a frame from loose parts.
///
/// This performs no field validation: an `Invoke` without a path or a
/// `Publish` with an id is encoded as given, and only the receiving
/// decoder will reject it. Use [`Message::encode`] to build frames that are
/// valid by construction.
///
/// # Errors
/// Returns `ProtocolError::ReservedKind` for `MessageKind::ParserError`,
/// which has no wire form.
pub fn encode(
    kind: MessageKind,
    data: Option<&Value>,
    id: Option<&str>,
    path: Option<&str>,
) -> Result<String, ProtocolError> {
    if kind == MessageKind::ParserError {
        return Err(ProtocolError::ReservedKind(kind));
    }
    Ok(write_frame(kind, data, id, path))
}

/// Decodes a frame with the default limits.
///
/// Total over all inputs: it never panics and returns [`PARSER_ERROR`] for
/// anything that is not a valid message.
pub fn decode(frame: &str) -> Result<Message, ParserError> {
    FrameCodec::new().decode(frame)
}

pub(crate) fn write_frame(
    kind: MessageKind,
    data: Option<&Value>,
    id: Option<&str>,
    path: Option<&str>,
) -> String {
    let mut frame = kind.code().to_string();
    if let Some(id) = id {
        frame.push(ID_SIGIL);
        frame.push_str(id);
    }
    if let Some(path) = path {
        frame.push(PATH_SIGIL);
        frame.extend(encode_path(path));
    }
    frame.push(BODY_SIGIL);
    if let Some(data) = data {
        frame.push_str(&data.to_string());
    }

    tracing::trace!(%kind, len = frame.len(), "encoded nydus message");
    frame
}
