//! Per-kind field rules.
//!
//! The tokenizer accepts any combination of id and path. This module
//! decides whether that combination is legal for the frame's kind and, if
//! so, builds the matching [`Message`] variant. A forbidden field fails
//! even when a required one is also missing.

use std::borrow::Cow;

use serde_json::Value;

use crate::error::{Field, Violation};
use crate::{Message, MessageKind, PROTOCOL_VERSION};

/// Tokenized fields with the body already parsed.
#[derive(Debug)]
pub(crate) struct Candidate<'a> {
    pub(crate) kind: MessageKind,
    pub(crate) id: Option<&'a str>,
    pub(crate) path: Option<Cow<'a, str>>,
    pub(crate) data: Option<Value>,
}

pub(crate) fn validate(candidate: Candidate<'_>) -> Result<Message, Violation> {
    let Candidate {
        kind,
        id,
        path,
        data,
    } = candidate;

    match kind {
        MessageKind::Welcome => {
            forbid(kind, Field::Id, &id)?;
            forbid(kind, Field::Path, &path)?;
            if !is_current_version(data.as_ref()) {
                return Err(Violation::UnsupportedVersion);
            }
            Ok(Message::welcome())
        }
        MessageKind::Invoke => Ok(Message::Invoke {
            id: require(kind, Field::Id, id)?.to_owned(),
            path: require(kind, Field::Path, path)?.into_owned(),
            data,
        }),
        MessageKind::Result => {
            forbid(kind, Field::Path, &path)?;
            Ok(Message::Result {
                id: require(kind, Field::Id, id)?.to_owned(),
                data,
            })
        }
        MessageKind::Error => {
            forbid(kind, Field::Path, &path)?;
            Ok(Message::Error {
                id: require(kind, Field::Id, id)?.to_owned(),
                data,
            })
        }
        MessageKind::Publish => {
            forbid(kind, Field::Id, &id)?;
            Ok(Message::Publish {
                path: require(kind, Field::Path, path)?.into_owned(),
                data,
            })
        }
        // Never produced by the tokenizer.
        MessageKind::ParserError => Err(Violation::UnknownKind),
    }
}

fn require<T>(kind: MessageKind, field: Field, value: Option<T>) -> Result<T, Violation> {
    value.ok_or(Violation::Missing(kind, field))
}

fn forbid<T>(kind: MessageKind, field: Field, value: &Option<T>) -> Result<(), Violation> {
    match value {
        Some(_) => Err(Violation::Forbidden(kind, field)),
        None => Ok(()),
    }
}

/// A welcome body must be a JSON number equal to our version. `3.0` passes,
/// `"3"` does not.
fn is_current_version(data: Option<&Value>) -> bool {
    data.and_then(Value::as_f64) == Some(f64::from(PROTOCOL_VERSION))
}
