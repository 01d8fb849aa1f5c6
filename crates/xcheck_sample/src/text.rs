//! The per-channel value block format exchanged with the proc evaluator.
//!
//! Each channel is rendered as a named block:
//!
//! ```text
//! my_channel : {
//!   bits[32]:0x1
//!   bits[32]:0x2
//! }
//! ```
//!
//! This is the format of `channel_inputs.txt` and of the `.results` blobs
//! produced by proc evaluation stages.

use crate::error::SampleParseError;
use xcheck_value::{parse_value, Value};

/// Renders channels as named value blocks, preserving the given order.
pub fn channel_values_to_text(channels: &[(String, Vec<Value>)]) -> String {
    let mut out = String::new();
    for (name, values) in channels {
        out.push_str(name);
        out.push_str(" : {\n");
        for value in values {
            out.push_str("  ");
            out.push_str(&value.to_string());
            out.push('\n');
        }
        out.push_str("}\n");
    }
    out
}

/// Parses named value blocks, preserving their order of appearance.
pub fn parse_channel_values(text: &str) -> Result<Vec<(String, Vec<Value>)>, SampleParseError> {
    let mut channels: Vec<(String, Vec<Value>)> = Vec::new();
    let mut current: Option<(String, Vec<Value>)> = None;
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_suffix('{') {
            if current.is_some() {
                return Err(SampleParseError::ChannelFormat {
                    line: i + 1,
                    message: "channel block opened inside another block".into(),
                });
            }
            let name = header.trim_end().trim_end_matches(':').trim_end();
            if name.is_empty() {
                return Err(SampleParseError::ChannelFormat {
                    line: i + 1,
                    message: "channel block has no name".into(),
                });
            }
            if channels.iter().any(|(existing, _)| existing == name) {
                return Err(SampleParseError::DuplicateChannel(name.to_string()));
            }
            current = Some((name.to_string(), Vec::new()));
        } else if line == "}" {
            match current.take() {
                Some(done) => channels.push(done),
                None => {
                    return Err(SampleParseError::ChannelFormat {
                        line: i + 1,
                        message: "unmatched closing brace".into(),
                    })
                }
            }
        } else {
            match current.as_mut() {
                Some((_, values)) => values.push(parse_value(line)?),
                None => {
                    return Err(SampleParseError::ChannelFormat {
                        line: i + 1,
                        message: "value outside a channel block".into(),
                    })
                }
            }
        }
    }
    if current.is_some() {
        return Err(SampleParseError::ChannelFormat {
            line: text.lines().count(),
            message: "unterminated channel block".into(),
        });
    }
    Ok(channels)
}
