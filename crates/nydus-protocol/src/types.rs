//! Message types for the nydus wire format.
//!
//! A frame carries a kind plus up to three optional fields: an `id` that
//! pairs a request with its response, a `path` naming a procedure or topic,
//! and a JSON `data` payload. Which fields are legal depends on the kind:
//!
//! | Kind    | id        | path      | data                      |
//! |---------|-----------|-----------|---------------------------|
//! | Welcome | forbidden | forbidden | the protocol version      |
//! | Invoke  | required  | required  | optional                  |
//! | Result  | required  | forbidden | optional                  |
//! | Error   | required  | forbidden | optional                  |
//! | Publish | forbidden | required  | optional                  |
//!
//! [`Message`] has one variant per kind holding only that kind's legal
//! fields, so a decoded message can never carry a forbidden field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::codec::write_frame;
use crate::{ProtocolError, PROTOCOL_VERSION};

// ---------------------------------------------------------------------------
// MessageKind
// ---------------------------------------------------------------------------

/// The discriminant of a frame. The numeric codes are part of the wire
/// format and must never change.
///
/// `ParserError` is not a wire kind. It tags a failed decode and is never
/// accepted by the decoder or emitted by the encoder.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum MessageKind {
    Welcome = 0,
    Invoke = 1,
    Result = 2,
    Error = 3,
    Publish = 4,
    ParserError = 11,
}

impl MessageKind {
    /// The highest code a frame may carry.
    pub const LAST: MessageKind = MessageKind::Publish;

    /// Every kind that can appear on the wire, in code order.
    pub const WIRE: [MessageKind; 5] = [
        MessageKind::Welcome,
        MessageKind::Invoke,
        MessageKind::Result,
        MessageKind::Error,
        MessageKind::Publish,
    ];

    /// Returns the numeric wire code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Looks up a wire kind by code.
    ///
    /// Only codes `0..=4` resolve. `11` (`ParserError`) is deliberately
    /// rejected: a frame can never claim to be a parse failure.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Welcome),
            1 => Some(Self::Invoke),
            2 => Some(Self::Result),
            3 => Some(Self::Error),
            4 => Some(Self::Publish),
            _ => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Welcome => "WELCOME",
            Self::Invoke => "INVOKE",
            Self::Result => "RESULT",
            Self::Error => "ERROR",
            Self::Publish => "PUBLISH",
            Self::ParserError => "PARSER_ERROR",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A well-formed protocol message.
///
/// `data: None` means the frame had no body at all. That is different from
/// `Some(Value::Null)`, which is a body of `null`.
///
/// The `Serialize` impl is for logs and tooling. It produces an internally
/// tagged object such as `{"type":"Invoke","id":"7","path":"/hi"}` and is
/// unrelated to the frame encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Server → client greeting announcing the protocol version.
    Welcome { version: u32 },

    /// Call the procedure at `path`. The peer answers with a `Result` or
    /// `Error` carrying the same `id`.
    Invoke {
        id: String,
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },

    /// Successful reply to the `Invoke` with the same `id`.
    Result {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },

    /// Failed reply to the `Invoke` with the same `id`.
    Error {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },

    /// Fire-and-forget event on the topic at `path`.
    Publish {
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
}

impl Message {
    /// A `Welcome` announcing this crate's [`PROTOCOL_VERSION`].
    pub fn welcome() -> Self {
        Self::Welcome {
            version: PROTOCOL_VERSION,
        }
    }

    /// A call to the procedure at `path`, without a payload.
    ///
    /// The `id` is chosen by the caller and echoed back in the matching
    /// `Result` or `Error`. It must be non-empty and at most
    /// [`MAX_ID_LEN`](crate::MAX_ID_LEN) characters to be accepted by a peer.
    ///
    /// ```rust
    /// use nydus_protocol::Message;
    ///
    /// let msg = Message::invoke("7", "/rooms/join").with_data("lobby");
    /// assert_eq!(msg.encode(), r#"1$7~/rooms/join|"lobby""#);
    /// ```
    pub fn invoke(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Invoke {
            id: id.into(),
            path: path.into(),
            data: None,
        }
    }

    /// A successful reply to the `Invoke` with the same `id`.
    pub fn result(id: impl Into<String>) -> Self {
        Self::Result {
            id: id.into(),
            data: None,
        }
    }

    /// A failed reply to the `Invoke` with the same `id`. The payload, if
    /// any, describes the failure.
    pub fn error(id: impl Into<String>) -> Self {
        Self::Error {
            id: id.into(),
            data: None,
        }
    }

    /// An event on the topic at `path`. Publishes get no reply.
    pub fn publish(path: impl Into<String>) -> Self {
        Self::Publish {
            path: path.into(),
            data: None,
        }
    }

    /// Attaches a payload. Has no effect on `Welcome`, whose body is always
    /// its version.
    pub fn with_data(mut self, value: impl Into<Value>) -> Self {
        match &mut self {
            Self::Welcome { .. } => {}
            Self::Invoke { data, .. }
            | Self::Result { data, .. }
            | Self::Error { data, .. }
            | Self::Publish { data, .. } => *data = Some(value.into()),
        }
        self
    }

    /// The wire kind of this message. Never `MessageKind::ParserError`.
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Welcome { .. } => MessageKind::Welcome,
            Self::Invoke { .. } => MessageKind::Invoke,
            Self::Result { .. } => MessageKind::Result,
            Self::Error { .. } => MessageKind::Error,
            Self::Publish { .. } => MessageKind::Publish,
        }
    }

    /// The request/response correlation id, for `Invoke`, `Result` and
    /// `Error`.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Invoke { id, .. } | Self::Result { id, .. } | Self::Error { id, .. } => {
                Some(id)
            }
            Self::Welcome { .. } | Self::Publish { .. } => None,
        }
    }

    /// The procedure or topic path, for `Invoke` and `Publish`.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Invoke { path, .. } | Self::Publish { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The JSON payload, if the frame had a body. Always `None` for
    /// `Welcome`; use the `version` field instead.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Welcome { .. } => None,
            Self::Invoke { data, .. }
            | Self::Result { data, .. }
            | Self::Error { data, .. }
            | Self::Publish { data, .. } => data.as_ref(),
        }
    }

    /// Deserializes the payload into `T`.
    ///
    /// Returns `Ok(None)` when there is no payload.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the payload doesn't have the
    /// shape `T` expects.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<Option<T>, ProtocolError> {
        self.data()
            .map(|value| T::deserialize(value).map_err(ProtocolError::Decode))
            .transpose()
    }

    /// Encodes this message as a frame.
    ///
    /// Unlike the free [`encode`](crate::encode) function this cannot fail:
    /// the variant fixes a legal kind and field set.
    pub fn encode(&self) -> String {
        match self {
            Self::Welcome { version } => write_frame(
                MessageKind::Welcome,
                Some(&Value::from(*version)),
                None,
                None,
            ),
            _ => write_frame(self.kind(), self.data(), self.id(), self.path()),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.id(), self.path()) {
            (Some(id), Some(path)) => write!(f, "{} {id} {path}", self.kind()),
            (Some(id), None) => write!(f, "{} {id}", self.kind()),
            (None, Some(path)) => write!(f, "{} {path}", self.kind()),
            (None, None) => write!(f, "{}", self.kind()),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
