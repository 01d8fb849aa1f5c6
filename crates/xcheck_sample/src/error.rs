//! Errors raised while decoding serialized sample inputs.

use xcheck_value::ValueParseError;

/// An error decoding one of the serialized sample files.
#[derive(Debug, thiserror::Error)]
pub enum SampleParseError {
    /// `options.json` failed to deserialize.
    #[error("malformed options JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value literal failed to parse.
    #[error(transparent)]
    Value(#[from] ValueParseError),

    /// An `args.txt` line failed to parse.
    #[error("args line {line}: {error}")]
    ArgsLine {
        /// 1-based line number within `args.txt`.
        line: usize,
        /// The underlying value parse error.
        error: ValueParseError,
    },

    /// A channel name appeared more than once.
    #[error("duplicate channel name `{0}`")]
    DuplicateChannel(String),

    /// A channel-values block was structurally malformed.
    #[error("channel values line {line}: {message}")]
    ChannelFormat {
        /// 1-based line number within the block text.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },
}
