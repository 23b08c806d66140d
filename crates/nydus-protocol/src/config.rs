//! Decoder limits.

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, MAX_ID_LEN, MAX_PATH_LEN};

/// Field length limits enforced while decoding.
///
/// The defaults are the protocol's wire limits. A config may tighten them
/// but not loosen them, so anything a tightened decoder accepts is also
/// accepted by every other peer. The protocol version is not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Longest accepted id, in characters.
    pub max_id_len: usize,

    /// Longest accepted path after percent-decoding, in characters.
    pub max_path_len: usize,
}

impl CodecConfig {
    /// The protocol's wire limits.
    pub const DEFAULT: CodecConfig = CodecConfig {
        max_id_len: MAX_ID_LEN,
        max_path_len: MAX_PATH_LEN,
    };

    /// Checks that both limits are non-zero and within the wire limits.
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidConfig` naming the first limit that is
    /// out of range.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        check_limit("max_id_len", self.max_id_len, MAX_ID_LEN)?;
        check_limit("max_path_len", self.max_path_len, MAX_PATH_LEN)
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn check_limit(name: &str, value: usize, wire_max: usize) -> Result<(), ProtocolError> {
    if value == 0 {
        return Err(ProtocolError::InvalidConfig(format!(
            "{name} must be at least 1"
        )));
    }
    if value > wire_max {
        return Err(ProtocolError::InvalidConfig(format!(
            "{name} is {value}, above the protocol limit of {wire_max}"
        )));
    }
    Ok(())
}
