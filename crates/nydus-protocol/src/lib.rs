//! Wire codec for the nydus publish/invoke protocol.
//!
//! This crate turns typed [`Message`]s into compact text frames and back:
//!
//! - **Types** ([`Message`], [`MessageKind`]): the shapes that travel on
//!   the wire, one enum variant per message kind.
//! - **Codec** ([`encode`], [`decode`], the [`Codec`] trait and
//!   [`FrameCodec`]): the frame grammar itself.
//! - **Errors** ([`ParserError`], [`ProtocolError`]): the single decode
//!   failure sentinel, and the encode-side misuse errors.
//!
//! # Frame grammar
//!
//! ```text
//! frame := kind ('$' id)? ('~' path)? '|' body?
//!
//! 0|3                                 Welcome, protocol version 3
//! 1$7~/hi%20there|{"hello":true}      Invoke id=7 path="/hi there"
//! 4~/publish|{"hi":"world"}           Publish path="/publish"
//! ```
//!
//! Encoding is permissive: it formats whatever it is given. Decoding is
//! strict and total: any frame that breaks the grammar or the per-kind
//! field rules decodes to [`PARSER_ERROR`]. The reason is reported through
//! `tracing` at debug level and never returned to the caller.
//!
//! The crate does not split a byte stream into frames. Callers hand it one
//! complete frame at a time.

mod codec;
mod config;
mod error;
mod path;
mod payload;
mod tokenizer;
mod types;
mod validate;

pub use codec::{decode, encode, Codec, FrameCodec};
pub use config::CodecConfig;
pub use error::{ParserError, ProtocolError, PARSER_ERROR};
pub use payload::to_payload;
pub use types::{Message, MessageKind};

/// Protocol version announced by `Welcome` frames. A peer speaking any other
/// version is rejected during decoding.
pub const PROTOCOL_VERSION: u32 = 3;

/// Maximum length of a message id, in characters.
pub const MAX_ID_LEN: usize = 32;

/// Maximum length of a decoded path, in characters.
pub const MAX_PATH_LEN: usize = 1024;

pub(crate) const ID_SIGIL: char = '$';
pub(crate) const PATH_SIGIL: char = '~';
pub(crate) const BODY_SIGIL: char = '|';
