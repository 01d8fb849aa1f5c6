//! Immutable per-sample configuration deciding which pipeline stages run.

use crate::error::SampleParseError;
use serde::{Deserialize, Serialize};

/// The kind of entry construct a sample's program designates as its top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopType {
    /// A pure function evaluated once per argument vector.
    Function,
    /// A channel-communicating proc evaluated one tick per argument vector.
    Proc,
}

/// Options controlling how a sample is run.
///
/// Every stage of the pipeline is gated on one of these flags; a stage whose
/// flag is false never runs, regardless of upstream success. The serialized
/// form lives at `options.json` inside the run directory, with absent fields
/// taking the defaults below so old run directories stay replayable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleOptions {
    /// Whether the program text is DSLX source (as opposed to IR text).
    pub input_is_dslx: bool,
    /// Whether the program's top is a function or a proc.
    pub top_type: TopType,
    /// Extra flags passed to the IR converter tool.
    pub ir_converter_args: Vec<String>,
    /// Whether to convert DSLX input to IR. When false the pipeline ends
    /// after source interpretation.
    pub convert_to_ir: bool,
    /// Whether to run the IR optimizer (and everything downstream of it).
    pub optimize_ir: bool,
    /// Whether to additionally evaluate with the JIT backend. The
    /// interpreter backend always runs as the cross-check baseline.
    pub use_jit: bool,
    /// Whether to generate a hardware description from the optimized IR.
    pub codegen: bool,
    /// Extra flags passed to the codegen tool.
    pub codegen_args: Vec<String>,
    /// Whether to simulate the generated hardware description.
    pub simulate: bool,
    /// Name of the hardware simulator to use, if not the driver's default.
    pub simulator: Option<String>,
    /// Whether codegen emits SystemVerilog (`sample.sv`) or Verilog
    /// (`sample.v`).
    pub use_system_verilog: bool,
    /// Per-tool-invocation timeout. `None` means unbounded.
    pub timeout_seconds: Option<u64>,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            input_is_dslx: true,
            top_type: TopType::Function,
            ir_converter_args: Vec::new(),
            convert_to_ir: true,
            optimize_ir: true,
            use_jit: true,
            codegen: false,
            codegen_args: Vec::new(),
            simulate: false,
            simulator: None,
            use_system_verilog: true,
            timeout_seconds: None,
        }
    }
}

impl SampleOptions {
    /// Serializes the options to the `options.json` wire form.
    pub fn to_json(&self) -> Result<String, SampleParseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes options from the `options.json` wire form.
    pub fn from_json(json: &str) -> Result<Self, SampleParseError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = SampleOptions::default();
        assert!(options.input_is_dslx);
        assert_eq!(options.top_type, TopType::Function);
        assert!(options.convert_to_ir);
        assert!(options.optimize_ir);
        assert!(options.use_jit);
        assert!(!options.codegen);
        assert!(!options.simulate);
        assert!(options.use_system_verilog);
        assert_eq!(options.timeout_seconds, None);
    }

    #[test]
    fn json_round_trip() {
        let options = SampleOptions {
            top_type: TopType::Proc,
            codegen: true,
            codegen_args: vec!["--generator=pipeline".into()],
            simulate: true,
            simulator: Some("iverilog".into()),
            timeout_seconds: Some(600),
            ..SampleOptions::default()
        };
        let json = options.to_json().unwrap();
        assert_eq!(SampleOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn absent_fields_take_defaults() {
        let options = SampleOptions::from_json("{\"codegen\": true}").unwrap();
        assert!(options.codegen);
        assert!(options.input_is_dslx);
        assert!(options.use_jit);
    }

    #[test]
    fn top_type_uses_snake_case() {
        let json = SampleOptions {
            top_type: TopType::Proc,
            ..SampleOptions::default()
        }
        .to_json()
        .unwrap();
        assert!(json.contains("\"proc\""));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = SampleOptions::from_json("{not json").unwrap_err();
        assert!(matches!(err, SampleParseError::Json(_)));
    }
}
