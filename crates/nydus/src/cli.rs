//! The `nydus` command line: encode and decode single frames.

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand, ValueEnum};
use nydus_protocol::{
    encode, Codec, CodecConfig, FrameCodec, MessageKind, MAX_ID_LEN, MAX_PATH_LEN,
};
use serde_json::{json, Value};

use crate::logging::LogLevel;
use crate::NydusError;

#[derive(Debug, Parser)]
#[command(name = "nydus", version, about = "Encode and decode nydus protocol frames")]
pub struct Cli {
    /// Log level for stderr diagnostics (overrides RUST_LOG).
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Longest id the decoder accepts.
    #[arg(long, global = true, env = "NYDUS_MAX_ID_LEN", default_value_t = MAX_ID_LEN)]
    pub max_id_len: usize,

    /// Longest decoded path the decoder accepts.
    #[arg(long, global = true, env = "NYDUS_MAX_PATH_LEN", default_value_t = MAX_PATH_LEN)]
    pub max_path_len: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode frames given as arguments, or one per stdin line.
    Decode {
        frames: Vec<String>,
    },

    /// Print the frame for the given parts. No field rules are checked.
    Encode {
        #[arg(value_enum)]
        kind: KindArg,

        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        path: Option<String>,

        /// Payload as JSON text.
        #[arg(long)]
        data: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Welcome,
    Invoke,
    Result,
    Error,
    Publish,
}

impl From<KindArg> for MessageKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Welcome => MessageKind::Welcome,
            KindArg::Invoke => MessageKind::Invoke,
            KindArg::Result => MessageKind::Result,
            KindArg::Error => MessageKind::Error,
            KindArg::Publish => MessageKind::Publish,
        }
    }
}

impl Cli {
    pub fn codec_config(&self) -> CodecConfig {
        CodecConfig {
            max_id_len: self.max_id_len,
            max_path_len: self.max_path_len,
        }
    }
}

/// Runs a parsed command line. Returns `false` if any frame failed to
/// decode.
///
/// Output is flushed before returning, so a closed stdout surfaces here as
/// `NydusError::Io` instead of being lost.
pub fn run(cli: Cli, stdin: impl BufRead, out: &mut impl Write) -> Result<bool, NydusError> {
    let codec = FrameCodec::with_config(cli.codec_config())?;
    let all_ok = match cli.command {
        Command::Decode { frames } if frames.is_empty() => {
            let mut all_ok = true;
            for line in stdin.lines() {
                all_ok &= decode_one(&codec, &line?, out)?;
            }
            all_ok
        }
        Command::Decode { frames } => {
            let mut all_ok = true;
            for frame in &frames {
                all_ok &= decode_one(&codec, frame, out)?;
            }
            all_ok
        }
        Command::Encode {
            kind,
            id,
            path,
            data,
        } => {
            let data = data.as_deref().map(serde_json::from_str::<Value>).transpose()?;
            let frame = encode(kind.into(), data.as_ref(), id.as_deref(), path.as_deref())?;
            writeln!(out, "{frame}")?;
            true
        }
    };
    out.flush()?;
    Ok(all_ok)
}

/// Writes one JSON line describing the decoded frame.
fn decode_one(codec: &impl Codec, frame: &str, out: &mut impl Write) -> Result<bool, NydusError> {
    match codec.decode(frame) {
        Ok(msg) => {
            writeln!(out, "{}", serde_json::to_string(&msg)?)?;
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "{}", json!({ "type": "ParserError", "code": err.kind().code() }))?;
            Ok(false)
        }
    }
}
