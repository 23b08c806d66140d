//! # nydus
//!
//! Codec for the nydus publish/invoke protocol, plus the plumbing a binary
//! needs around it.
//!
//! The wire format itself lives in [`nydus_protocol`], re-exported here as
//! [`protocol`]. This crate adds a unified [`NydusError`], `tracing`
//! subscriber setup, and the `nydus` command-line frame inspector.
//!
//! ## Quick Start
//!
//! ```rust
//! use nydus::prelude::*;
//!
//! let frame = Message::invoke("7", "/rooms/join").encode();
//! assert_eq!(frame, "1$7~/rooms/join|");
//!
//! let msg = decode(&frame)?;
//! assert_eq!(msg.kind(), MessageKind::Invoke);
//!
//! // Malformed frames all decode to the same sentinel.
//! assert_eq!(decode("9|"), Err(PARSER_ERROR));
//! # Ok::<(), NydusError>(())
//! ```

pub mod cli;
mod error;
pub mod logging;

pub use error::NydusError;
pub use nydus_protocol as protocol;

/// Everything most callers need, in one import.
pub mod prelude {
    pub use crate::NydusError;
    pub use nydus_protocol::{
        decode, encode, to_payload, Codec, CodecConfig, FrameCodec, Message, MessageKind,
        ParserError, ProtocolError, PARSER_ERROR, PROTOCOL_VERSION,
    };
}
