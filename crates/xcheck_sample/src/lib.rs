//! The unit of work for the xcheck harness: one generated program plus the
//! configuration and stimuli needed to drive it through the toolchain.
//!
//! A [`Sample`] bundles the program text (DSLX source or IR), the
//! [`SampleOptions`] deciding which pipeline stages run, and the optional
//! argument batch, channel names, and proc initial values. This crate also
//! owns the textual wire formats these pieces take inside a run directory
//! (`options.json`, `args.txt`, `ir_channel_names.txt`,
//! `proc_init_values.txt`, `channel_inputs.txt`).

#![warn(missing_docs)]

mod error;
mod options;
mod sample;
mod text;

pub use error::SampleParseError;
pub use options::{SampleOptions, TopType};
pub use sample::{
    args_batch_to_text, ir_channel_names_to_text, parse_args_batch, parse_ir_channel_names,
    parse_proc_init_values, proc_init_values_to_text, ArgsBatch, Sample,
};
pub use text::{channel_values_to_text, parse_channel_values};
