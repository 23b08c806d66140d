//! Splits a raw frame into its header fields and body.
//!
//! The scan is a single forward pass over a three-state machine:
//!
//! ```text
//!            '$'            '~'             '|'
//! kind ──┬──────▶ Id ──┬──────▶ Path ──┬──────▶ Body
//!        │  '~'        │  '|'          │
//!        ├─────────────┼───────────────┘
//!        │  '|'        │
//!        └─────────────┴──────────────────────▶ Body
//! ```
//!
//! Length caps are checked as characters are consumed, so an oversized id
//! or path is rejected without scanning the rest of the frame. Nothing here
//! knows which fields a kind may carry; that is the validator's job.

use std::borrow::Cow;

use crate::error::{Field, Violation};
use crate::path::decode_path;
use crate::{CodecConfig, MessageKind, BODY_SIGIL, ID_SIGIL, PATH_SIGIL};

/// Raw characters one decoded path character can occupy: up to four UTF-8
/// bytes, each escaped as `%XX`. The raw segment is bounded by this multiple
/// of the limit, and the exact cap is checked after decoding.
const PATH_ESCAPE_FACTOR: usize = 12;

/// The pieces of a frame before any per-kind rules are applied.
#[derive(Debug, PartialEq)]
pub(crate) struct Tokens<'a> {
    pub(crate) kind: MessageKind,
    pub(crate) id: Option<&'a str>,
    pub(crate) path: Option<Cow<'a, str>>,
    /// Everything after the body sigil. May be empty.
    pub(crate) body: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Id,
    Path,
    Body,
}

impl Segment {
    /// The header field this segment holds. `None` for the body.
    fn field(self) -> Option<Field> {
        match self {
            Self::Id => Some(Field::Id),
            Self::Path => Some(Field::Path),
            Self::Body => None,
        }
    }

    fn opened_by(sigil: char) -> Option<Self> {
        match sigil {
            ID_SIGIL => Some(Self::Id),
            PATH_SIGIL => Some(Self::Path),
            BODY_SIGIL => Some(Self::Body),
            _ => None,
        }
    }

    /// The segment a character closes this one into, if it is a terminator.
    fn closed_by(self, c: char) -> Option<Self> {
        match (self, c) {
            (Self::Id, PATH_SIGIL) => Some(Self::Path),
            (Self::Id | Self::Path, BODY_SIGIL) => Some(Self::Body),
            _ => None,
        }
    }
}

pub(crate) fn tokenize<'a>(frame: &'a str, config: &CodecConfig) -> Result<Tokens<'a>, Violation> {
    let bytes = frame.as_bytes();
    if bytes.len() < 2 {
        return Err(Violation::TooShort);
    }

    let kind = char::from(bytes[0])
        .to_digit(10)
        .and_then(|code| u8::try_from(code).ok())
        .and_then(MessageKind::from_code)
        .ok_or(Violation::UnknownKind)?;

    let mut segment = Segment::opened_by(char::from(bytes[1])).ok_or(Violation::MissingBody)?;

    // Both leading bytes are ASCII, so byte 2 is a char boundary.
    let rest = &frame[2..];
    let mut chars = rest.char_indices();
    let mut start = 0;
    let mut id = None;
    let mut path = None;

    while let Some(field) = segment.field() {
        let limit = match field {
            Field::Id => config.max_id_len,
            Field::Path => config.max_path_len * PATH_ESCAPE_FACTOR,
        };

        let mut len = 0;
        let (end, next) = loop {
            let Some((pos, c)) = chars.next() else {
                return Err(Violation::Unterminated(field));
            };
            if let Some(next) = segment.closed_by(c) {
                break (pos, next);
            }
            len += 1;
            if len > limit {
                return Err(Violation::TooLong(field));
            }
        };

        let text = &rest[start..end];
        if text.is_empty() {
            return Err(Violation::Empty(field));
        }
        match field {
            Field::Id => id = Some(text),
            Field::Path => {
                let decoded = decode_path(text)?;
                if decoded.chars().count() > config.max_path_len {
                    return Err(Violation::TooLong(Field::Path));
                }
                path = Some(decoded);
            }
        }

        // Sigils are one byte wide.
        start = end + 1;
        segment = next;
    }

    Ok(Tokens {
        kind,
        id,
        path,
        body: &rest[start..],
    })
}
