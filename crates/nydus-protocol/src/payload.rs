//! The JSON body of a frame.

use serde::Serialize;
use serde_json::Value;

use crate::error::Violation;
use crate::ProtocolError;

/// Parses the text after the body sigil.
///
/// An empty body means "no data" and yields `None`. This is distinct from
/// a body of `null`, which yields `Some(Value::Null)`.
pub(crate) fn parse_body(body: &str) -> Result<Option<Value>, Violation> {
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(Violation::InvalidPayload)
}

/// Converts a typed value into a payload for [`Message::with_data`] or
/// [`encode`](crate::encode).
///
/// # Errors
/// Returns `ProtocolError::Encode` if `value` has no JSON representation,
/// such as a map keyed by something other than strings.
///
/// [`Message::with_data`]: crate::Message::with_data
pub fn to_payload<T: Serialize + ?Sized>(value: &T) -> Result<Value, ProtocolError> {
    serde_json::to_value(value).map_err(ProtocolError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_empty_body_is_absent() {
        assert_eq!(parse_body("").unwrap(), None);
    }

    #[test]
    fn test_null_body_is_present() {
        assert_eq!(parse_body("null").unwrap(), Some(Value::Null));
    }

    #[test]
    fn test_structured_body() {
        assert_eq!(
            parse_body(r#"{"status":404,"message":"Not found"}"#).unwrap(),
            Some(json!({ "status": 404, "message": "Not found" }))
        );
        assert_eq!(parse_body(" 3 ").unwrap(), Some(json!(3)));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(matches!(
            parse_body("fail me now!"),
            Err(Violation::InvalidPayload(_))
        ));
        assert!(matches!(
            parse_body("{\"a\":1} trailing"),
            Err(Violation::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_to_payload_struct() {
        #[derive(Serialize)]
        struct Hello {
            hello: bool,
        }
        assert_eq!(to_payload(&Hello { hello: true }).unwrap(), json!({ "hello": true }));
    }

    #[test]
    fn test_to_payload_non_string_keys_fail() {
        let mut map = HashMap::new();
        map.insert((1, 2), "pair");
        assert!(matches!(to_payload(&map), Err(ProtocolError::Encode(_))));
    }
}
