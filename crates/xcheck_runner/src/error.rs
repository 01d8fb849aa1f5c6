//! Error types for the pipeline and the comparison engine.
//!
//! Internally every failure is a [`RunnerError`] variant. At the boundary,
//! all of them are normalized into a single [`SampleError`] carrying a
//! human-readable message and a timeout flag, so harness operators can
//! discard timeouts separately from genuine miscompilation bugs.

use xcheck_sample::SampleParseError;
use xcheck_value::ValueParseError;

/// Joins stage or channel names for diagnostic messages.
fn join(names: &[String]) -> String {
    names.join(", ")
}

/// A divergence detected by the result comparator.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MiscompareError {
    /// Two stages produced result sequences of different lengths.
    #[error("Results for {reference} has {reference_len} values, {name} has {len}")]
    LengthMismatch {
        /// The reference stage (lexicographically first).
        reference: String,
        /// Number of values the reference produced.
        reference_len: usize,
        /// The stage that disagreed.
        name: String,
        /// Number of values that stage produced.
        len: usize,
    },

    /// Two stages produced different values at the same index.
    #[error(
        "Result miscompare for sample {index}:\nargs: {args}\n{} =\n   {reference_value}\n{} =\n   {candidate_value}",
        join(.reference_matches),
        join(.candidate_matches)
    )]
    ValueMismatch {
        /// Index of the diverging argument vector.
        index: usize,
        /// The original arguments at that index in canonical form, or a
        /// placeholder when the batch was not supplied.
        args: String,
        /// All stages whose value at the index equals the reference's.
        reference_matches: Vec<String>,
        /// The reference value in canonical form.
        reference_value: String,
        /// All stages whose value at the index equals the candidate's.
        candidate_matches: Vec<String>,
        /// The candidate value in canonical form.
        candidate_value: String,
    },

    /// Two stages reported different numbers of channels.
    #[error(
        "Results for {reference} has {reference_count} channels, {name} has {count} channels. \
         The IR channel names in {reference} are: {}. The IR channel names in {name} are: {}",
        join(.reference_names),
        join(.names)
    )]
    ChannelCountMismatch {
        /// The reference stage.
        reference: String,
        /// Channel count of the reference.
        reference_count: usize,
        /// The stage that disagreed.
        name: String,
        /// Channel count of that stage.
        count: usize,
        /// Channel names of the reference stage.
        reference_names: Vec<String>,
        /// Channel names of the disagreeing stage.
        names: Vec<String>,
    },

    /// A reference channel is absent from a candidate stage.
    #[error("A channel named {channel} is present in {reference}, but it is not present in {name}")]
    MissingChannel {
        /// The missing channel.
        channel: String,
        /// The reference stage that has the channel.
        reference: String,
        /// The stage lacking it.
        name: String,
    },

    /// A channel carries a different number of entries in two stages.
    #[error(
        "In {reference}, channel '{channel}' has {reference_len} entries. \
         However, in {name}, channel '{channel}' has {len} entries"
    )]
    ChannelLengthMismatch {
        /// The reference stage.
        reference: String,
        /// The stage that disagreed.
        name: String,
        /// The channel concerned.
        channel: String,
        /// Entry count in the reference.
        reference_len: usize,
        /// Entry count in the disagreeing stage.
        len: usize,
    },

    /// A channel carries a different value at some position in two stages.
    #[error(
        "In {reference}, at position {index} channel '{channel}' has value {reference_value}. \
         However, in {name}, the value is {value}"
    )]
    ChannelValueMismatch {
        /// The reference stage.
        reference: String,
        /// The stage that disagreed.
        name: String,
        /// The channel concerned.
        channel: String,
        /// Position of the diverging entry.
        index: usize,
        /// The reference value in canonical form.
        reference_value: String,
        /// The disagreeing value in canonical form.
        value: String,
    },
}

/// Any failure encountered while running a sample.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// An external tool exited with a non-zero status.
    #[error("{tool} exited with status {status}: {stderr_tail}")]
    ToolInvocation {
        /// Basename of the tool binary.
        tool: String,
        /// The exit status code, or -1 if killed by a signal.
        status: i32,
        /// The tail of the tool's captured stderr.
        stderr_tail: String,
    },

    /// An external tool exceeded the configured timeout.
    #[error("{tool} timed out after {timeout_seconds}s")]
    Timeout {
        /// Basename of the tool binary.
        tool: String,
        /// The configured timeout in seconds.
        timeout_seconds: u64,
    },

    /// The requested configuration is not implemented.
    #[error("unsupported configuration: {0}")]
    Unsupported(String),

    /// The comparator found a semantic divergence.
    #[error(transparent)]
    Miscompare(#[from] MiscompareError),

    /// A serialized input file failed to parse.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] SampleParseError),

    /// A required input file was not supplied for this configuration.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// A filesystem operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A harness bug, not a problem with the sample or the tools.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValueParseError> for RunnerError {
    fn from(error: ValueParseError) -> Self {
        Self::MalformedInput(SampleParseError::Value(error))
    }
}

/// The single externally-visible error of a harness run.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct SampleError {
    /// Human-readable diagnosis of the failure.
    pub message: String,
    /// Whether the failure was a tool timeout. Operators commonly discard
    /// timeouts separately from genuine bugs.
    pub is_timeout: bool,
}

/// Normalizes any internal failure into a `(message, is_timeout)` pair.
pub fn normalize_failure(error: &RunnerError) -> (String, bool) {
    (
        error.to_string(),
        matches!(error, RunnerError::Timeout { .. }),
    )
}

impl From<RunnerError> for SampleError {
    fn from(error: RunnerError) -> Self {
        let (message, is_timeout) = normalize_failure(&error);
        Self {
            message,
            is_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_display() {
        let err = MiscompareError::LengthMismatch {
            reference: "evaluated opt IR (JIT)".into(),
            reference_len: 3,
            name: "simulated".into(),
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "Results for evaluated opt IR (JIT) has 3 values, simulated has 2"
        );
    }

    #[test]
    fn value_mismatch_display_lists_both_groups() {
        let err = MiscompareError::ValueMismatch {
            index: 1,
            args: "bits[8]:0x7".into(),
            reference_matches: vec!["a".into(), "b".into()],
            reference_value: "bits[8]:0x5".into(),
            candidate_matches: vec!["c".into()],
            candidate_value: "bits[8]:0x6".into(),
        };
        assert_eq!(
            err.to_string(),
            "Result miscompare for sample 1:\nargs: bits[8]:0x7\na, b =\n   bits[8]:0x5\nc =\n   bits[8]:0x6"
        );
    }

    #[test]
    fn missing_channel_display() {
        let err = MiscompareError::MissingChannel {
            channel: "out".into(),
            reference: "a".into(),
            name: "b".into(),
        };
        assert_eq!(
            err.to_string(),
            "A channel named out is present in a, but it is not present in b"
        );
    }

    #[test]
    fn timeout_normalizes_with_flag() {
        let err = RunnerError::Timeout {
            tool: "opt_main".into(),
            timeout_seconds: 60,
        };
        let (message, is_timeout) = normalize_failure(&err);
        assert_eq!(message, "opt_main timed out after 60s");
        assert!(is_timeout);
    }

    #[test]
    fn tool_invocation_normalizes_without_flag() {
        let err = RunnerError::ToolInvocation {
            tool: "codegen_main".into(),
            status: 1,
            stderr_tail: "assertion failed".into(),
        };
        let (message, is_timeout) = normalize_failure(&err);
        assert!(message.contains("codegen_main exited with status 1"));
        assert!(message.contains("assertion failed"));
        assert!(!is_timeout);
    }

    #[test]
    fn miscompare_normalizes_without_flag() {
        let err = RunnerError::from(MiscompareError::LengthMismatch {
            reference: "a".into(),
            reference_len: 1,
            name: "b".into(),
            len: 2,
        });
        let sample_error = SampleError::from(err);
        assert!(!sample_error.is_timeout);
        assert!(sample_error.message.contains("Results for a"));
    }
}
