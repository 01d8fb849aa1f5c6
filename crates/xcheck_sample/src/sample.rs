//! The sample container and the line-oriented wire forms of its pieces.

use crate::error::SampleParseError;
use crate::options::SampleOptions;
use xcheck_value::{parse_value, parse_values, values_to_text, Value};

/// An ordered batch of argument vectors.
///
/// For a function top, each inner vector is the argument list of one call.
/// For a proc top, each inner vector carries one tick's worth of input, one
/// value per channel, positionally matched against the channel-name list.
pub type ArgsBatch = Vec<Vec<Value>>;

/// One generated program plus everything needed to run it.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// The program text, DSLX source or IR depending on the options.
    pub input_text: String,
    /// Configuration for the run.
    pub options: SampleOptions,
    /// Input stimuli. Evaluation stages only run when this is present.
    pub args_batch: Option<ArgsBatch>,
    /// Ordered IR channel names for a proc top.
    pub ir_channel_names: Option<Vec<String>>,
    /// Initial per-channel/state values for a proc top.
    pub proc_init_values: Option<Vec<Value>>,
}

/// Renders an args batch in the `args.txt` wire form: one line per argument
/// vector, values joined by `; `.
pub fn args_batch_to_text(batch: &ArgsBatch) -> String {
    batch
        .iter()
        .map(|args| {
            args.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses the `args.txt` wire form. Blank lines are ignored.
pub fn parse_args_batch(text: &str) -> Result<ArgsBatch, SampleParseError> {
    let mut batch = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let args = line
            .split(';')
            .map(|piece| parse_value(piece.trim()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| SampleParseError::ArgsLine { line: i + 1, error })?;
        batch.push(args);
    }
    Ok(batch)
}

/// Renders channel names in the `ir_channel_names.txt` wire form, one name
/// per line.
pub fn ir_channel_names_to_text(names: &[String]) -> String {
    names.join("\n")
}

/// Parses the `ir_channel_names.txt` wire form.
///
/// Blank lines are ignored and names must be distinct.
pub fn parse_ir_channel_names(text: &str) -> Result<Vec<String>, SampleParseError> {
    let mut names: Vec<String> = Vec::new();
    for line in text.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if names.iter().any(|existing| existing == name) {
            return Err(SampleParseError::DuplicateChannel(name.to_string()));
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Renders proc initial values in the `proc_init_values.txt` wire form, one
/// canonical literal per line.
pub fn proc_init_values_to_text(values: &[Value]) -> String {
    values_to_text(values)
}

/// Parses the `proc_init_values.txt` wire form.
pub fn parse_proc_init_values(text: &str) -> Result<Vec<Value>, SampleParseError> {
    Ok(parse_values(text)?)
}
