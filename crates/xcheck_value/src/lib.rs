//! Typed values exchanged between the evaluation stages of the xcheck harness.
//!
//! Every stage of the differential-testing pipeline (source interpretation,
//! IR evaluation, hardware simulation) reports its results as sequences of
//! [`Value`]s. The comparison engine relies on the equality defined here:
//! two values are equal when their shapes, widths, and bit patterns agree,
//! regardless of any signed/unsigned interpretation tag. The IR tools and
//! the hardware simulator produce unsigned values while the source-language
//! interpreter can produce signed ones, so the tag must not influence
//! comparison.
//!
//! The crate also implements the canonical text grammar (`bits[32]:0x2a`,
//! tuples in parentheses, arrays in brackets) used by every `.results`
//! artifact and by diagnostic output.

#![warn(missing_docs)]

mod parse;
mod value;

pub use parse::{parse_value, parse_values, values_to_text, ValueParseError};
pub use value::{Bits, Value};
