//! Resolved tool locations and the injected source-language evaluator.
//!
//! Tool paths are supplied by the caller at construction time instead of
//! being resolved through process-wide globals, so embedders and tests can
//! substitute their own binaries per run.

use crate::error::RunnerError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use xcheck_sample::ArgsBatch;
use xcheck_value::Value;

/// Simulator names accepted by [`check_simulator`].
pub const SUPPORTED_SIMULATORS: &[&str] = &["iverilog"];

/// Resolved locations of the external toolchain binaries.
#[derive(Clone, Debug)]
pub struct ToolSuite {
    /// Converts DSLX source to IR text.
    pub ir_converter: PathBuf,
    /// Optimizes IR text.
    pub ir_optimizer: PathBuf,
    /// Evaluates a function-top IR file against an args file.
    pub ir_evaluator: PathBuf,
    /// Evaluates a proc-top IR file against per-channel inputs.
    pub proc_evaluator: PathBuf,
    /// Generates a hardware description from optimized IR.
    pub codegen: PathBuf,
    /// Drives a hardware simulator over a generated module.
    pub simulator_driver: PathBuf,
    /// Toolchain build/version identifier, persisted to `revision.txt`.
    pub revision: String,
    /// Library search path handed to the source-language evaluator.
    pub dslx_stdlib_path: Option<PathBuf>,
}

impl ToolSuite {
    /// Resolves the standard binary names inside a single tool directory.
    pub fn from_tool_dir(dir: &Path, revision: impl Into<String>) -> Self {
        Self {
            ir_converter: dir.join("ir_converter_main"),
            ir_optimizer: dir.join("opt_main"),
            ir_evaluator: dir.join("eval_ir_main"),
            proc_evaluator: dir.join("eval_proc_main"),
            codegen: dir.join("codegen_main"),
            simulator_driver: dir.join("simulate_module_main"),
            revision: revision.into(),
            dslx_stdlib_path: None,
        }
    }

    /// Sets the library search path for the source-language evaluator.
    pub fn with_dslx_stdlib_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dslx_stdlib_path = Some(path.into());
        self
    }
}

/// Validates a requested simulator name before the driver tool is invoked.
///
/// `None` selects the driver's default simulator and always passes.
pub fn check_simulator(simulator: Option<&str>) -> Result<(), RunnerError> {
    match simulator {
        None => Ok(()),
        Some(name) if SUPPORTED_SIMULATORS.contains(&name) => Ok(()),
        Some(name) => Err(RunnerError::Unsupported(format!(
            "unknown verilog simulator `{name}`"
        ))),
    }
}

/// The in-process source-language evaluator, supplied by the embedder.
///
/// The harness does not implement source interpretation itself; it consumes
/// this interface and cross-checks its results against the IR and hardware
/// paths. Results use the same sign-agnostic [`Value`] model as every other
/// stage.
pub trait SourceInterpreter {
    /// Evaluates a function top once per argument vector, returning one
    /// result value per vector.
    fn run_function_batched(
        &self,
        program: &str,
        top: &str,
        args_batch: &ArgsBatch,
        stdlib_path: Option<&Path>,
    ) -> Result<Vec<Value>, RunnerError>;

    /// Evaluates a proc top for one tick per argument vector, returning the
    /// values observed on each output channel.
    fn run_proc(
        &self,
        program: &str,
        top: &str,
        args_batch: &ArgsBatch,
        proc_init_values: Option<&[Value]>,
        stdlib_path: Option<&Path>,
    ) -> Result<BTreeMap<String, Vec<Value>>, RunnerError>;
}
