//! The sequential pipeline orchestrator.
//!
//! A [`SampleRunner`] owns one run directory and drives one sample through
//! the toolchain, stage by stage. Stages run strictly in dependency order,
//! never concurrently: each consumes the previous stage's artifact. Every
//! stage's primary output is persisted to the run directory before it is
//! used, so a failing sample can be replayed offline from the artifacts
//! alone.

use crate::compare::{compare_results_function, compare_results_proc, ChannelValues};
use crate::error::{RunnerError, SampleError};
use crate::exec;
use crate::timing::{SampleTiming, Timer};
use crate::tools::{check_simulator, SourceInterpreter, ToolSuite};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use xcheck_sample::{
    args_batch_to_text, channel_values_to_text, ir_channel_names_to_text, parse_args_batch,
    parse_channel_values, parse_ir_channel_names, parse_proc_init_values,
    proc_init_values_to_text, ArgsBatch, Sample, SampleOptions, TopType,
};
use xcheck_value::{parse_values, values_to_text, Value};

/// The entry point every interpreted program is expected to expose.
const TOP_NAME: &str = "main";

/// Pipeline stages, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    InterpretDslx,
    ConvertIr,
    EvalUnoptInterpreter,
    EvalUnoptJit,
    OptimizeIr,
    EvalOptJit,
    EvalOptInterpreter,
    Codegen,
    Simulate,
}

/// The ordered stage skeleton shared by function and proc mode.
///
/// Note the optimized-IR evaluations deliberately run JIT before
/// interpreter, mirroring the unoptimized pair in reverse.
const PIPELINE: &[Stage] = &[
    Stage::InterpretDslx,
    Stage::ConvertIr,
    Stage::EvalUnoptInterpreter,
    Stage::EvalUnoptJit,
    Stage::OptimizeIr,
    Stage::EvalOptJit,
    Stage::EvalOptInterpreter,
    Stage::Codegen,
    Stage::Simulate,
];

/// What the guard of one stage decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StageDecision {
    /// Execute the stage.
    Run,
    /// Skip the stage and continue down the pipeline.
    Skip,
    /// Terminate the pipeline successfully without comparing results.
    Stop,
}

/// The guard table: decides per stage whether to run, skip, or stop.
///
/// Stages gated by a flag never run when the flag is false, regardless of
/// upstream success. The unoptimized interpreter evaluation runs whenever an
/// args batch is present, independent of `use_jit`: it is the cross-check
/// baseline.
///
/// `args_len` is the length of the supplied args batch, or `None` when no
/// batch was supplied at all. Source interpretation requires a non-empty
/// batch; the IR evaluation stages run off the args file and only need the
/// batch to exist, even empty.
fn decide(stage: Stage, options: &SampleOptions, args_len: Option<usize>) -> StageDecision {
    use StageDecision::{Run, Skip, Stop};
    let has_args = args_len.is_some();
    match stage {
        Stage::InterpretDslx => {
            if options.input_is_dslx && args_len.is_some_and(|len| len > 0) {
                Run
            } else {
                Skip
            }
        }
        Stage::ConvertIr => {
            if !options.input_is_dslx {
                Skip
            } else if options.convert_to_ir {
                Run
            } else {
                Stop
            }
        }
        Stage::EvalUnoptInterpreter => {
            if has_args {
                Run
            } else {
                Skip
            }
        }
        Stage::EvalUnoptJit => {
            if has_args && options.use_jit {
                Run
            } else {
                Skip
            }
        }
        Stage::OptimizeIr => {
            if options.optimize_ir {
                Run
            } else {
                Skip
            }
        }
        Stage::EvalOptJit => {
            if options.optimize_ir && has_args && options.use_jit {
                Run
            } else {
                Skip
            }
        }
        Stage::EvalOptInterpreter => {
            if options.optimize_ir && has_args {
                Run
            } else {
                Skip
            }
        }
        Stage::Codegen => {
            if options.optimize_ir && options.codegen {
                Run
            } else {
                Skip
            }
        }
        Stage::Simulate => {
            if options.optimize_ir && options.codegen && options.simulate {
                Run
            } else {
                Skip
            }
        }
    }
}

/// Converts a guard-implied `Option` into a value, failing as a harness bug.
fn require<T>(value: Option<T>, what: &str) -> Result<T, RunnerError> {
    value.ok_or_else(|| RunnerError::Internal(format!("{what} is missing despite stage guard")))
}

/// Runs one sample through every enabled evaluation path and compares the
/// results.
///
/// The runner operates in a single run directory supplied at construction
/// time and records all inputs, tool stderr, and stage outputs to that
/// directory for debugging and replay. One runner serves one sample run;
/// callers parallelizing across samples must use one runner (and one run
/// directory) per sample.
pub struct SampleRunner {
    run_dir: PathBuf,
    tools: ToolSuite,
    interpreter: Option<Box<dyn SourceInterpreter>>,
    timing: SampleTiming,
}

impl SampleRunner {
    /// Creates a runner bound to the given run directory and tool table.
    pub fn new(run_dir: impl Into<PathBuf>, tools: ToolSuite) -> Self {
        Self {
            run_dir: run_dir.into(),
            tools,
            interpreter: None,
            timing: SampleTiming::default(),
        }
    }

    /// Injects the source-language evaluator used by interpretation stages.
    pub fn with_source_interpreter(mut self, interpreter: Box<dyn SourceInterpreter>) -> Self {
        self.interpreter = Some(interpreter);
        self
    }

    /// Returns the per-stage timing gathered so far.
    pub fn timing(&self) -> &SampleTiming {
        &self.timing
    }

    /// Returns the run directory this runner owns.
    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Serializes the sample into the run directory and runs it.
    pub fn run(&mut self, sample: &Sample) -> Result<(), SampleError> {
        match self.write_sample_inputs(sample) {
            Ok(files) => self.run_from_files(
                &files.input,
                "options.json",
                files.args.as_deref(),
                files.channels.as_deref(),
                files.init.as_deref(),
            ),
            Err(error) => Err(self.record_failure(error)),
        }
    }

    /// Runs a sample whose pieces already exist as files in the run
    /// directory.
    ///
    /// Each argument is the name of a file (not a full path) inside the run
    /// directory. On any failure a normalized transcript is written to
    /// `exception.txt` before the error is returned.
    pub fn run_from_files(
        &mut self,
        input_filename: &str,
        options_filename: &str,
        args_filename: Option<&str>,
        ir_channel_names_filename: Option<&str>,
        proc_init_values_filename: Option<&str>,
    ) -> Result<(), SampleError> {
        self.run_from_files_inner(
            input_filename,
            options_filename,
            args_filename,
            ir_channel_names_filename,
            proc_init_values_filename,
        )
        .map_err(|error| self.record_failure(error))
    }

    fn run_from_files_inner(
        &mut self,
        input_filename: &str,
        options_filename: &str,
        args_filename: Option<&str>,
        ir_channel_names_filename: Option<&str>,
        proc_init_values_filename: Option<&str>,
    ) -> Result<(), RunnerError> {
        debug!("reading sample files");
        let options = SampleOptions::from_json(&self.read_file(options_filename)?)?;
        let revision = self.tools.revision.clone();
        self.write_file("revision.txt", &revision)?;
        match options.top_type {
            TopType::Function => self.run_function(input_filename, &options, args_filename),
            TopType::Proc => self.run_proc(
                input_filename,
                &options,
                args_filename,
                ir_channel_names_filename,
                proc_init_values_filename,
            ),
        }
    }

    fn write_sample_inputs(&self, sample: &Sample) -> Result<InputFiles, RunnerError> {
        let input = if sample.options.input_is_dslx {
            "sample.x"
        } else {
            "sample.ir"
        };
        self.write_file(input, &sample.input_text)?;
        self.write_file("options.json", &sample.options.to_json()?)?;
        let args = sample
            .args_batch
            .as_ref()
            .map(|batch| self.write_file("args.txt", &args_batch_to_text(batch)))
            .transpose()?;
        let channels = sample
            .ir_channel_names
            .as_ref()
            .map(|names| self.write_file("ir_channel_names.txt", &ir_channel_names_to_text(names)))
            .transpose()?;
        let init = sample
            .proc_init_values
            .as_ref()
            .map(|values| {
                self.write_file("proc_init_values.txt", &proc_init_values_to_text(values))
            })
            .transpose()?;
        Ok(InputFiles {
            input: input.to_string(),
            args,
            channels,
            init,
        })
    }

    /// Writes the exception transcript and normalizes the failure.
    fn record_failure(&self, error: RunnerError) -> SampleError {
        let sample_error = SampleError::from(error);
        // Best effort: failing to persist the transcript must not mask the
        // original failure.
        let _ = std::fs::write(self.run_dir.join("exception.txt"), &sample_error.message);
        tracing::error!(
            message = %sample_error.message,
            is_timeout = sample_error.is_timeout,
            "sample failed"
        );
        sample_error
    }

    fn run_function(
        &mut self,
        input_filename: &str,
        options: &SampleOptions,
        args_filename: Option<&str>,
    ) -> Result<(), RunnerError> {
        let input_text = self.read_file(input_filename)?;
        let args_batch = match args_filename {
            Some(filename) => Some(parse_args_batch(&self.read_file(filename)?)?),
            None => None,
        };
        let args_len = args_batch.as_ref().map(Vec::len);

        let mut results: Vec<(String, Vec<Value>)> = Vec::new();
        let mut ir_filename = if options.input_is_dslx {
            None
        } else {
            Some(self.write_file("sample.ir", &input_text)?)
        };
        let mut opt_ir_filename: Option<String> = None;
        let mut verilog_filename: Option<String> = None;

        for &stage in PIPELINE {
            match decide(stage, options, args_len) {
                StageDecision::Skip => continue,
                StageDecision::Stop => return Ok(()),
                StageDecision::Run => {}
            }
            let timer = Timer::start();
            match stage {
                Stage::InterpretDslx => {
                    let batch = require(args_batch.as_ref(), "args batch")?;
                    let values = self.interpret_dslx_function(&input_text, TOP_NAME, batch)?;
                    results.push(("interpreted DSLX".to_string(), values));
                    self.timing.interpret_dslx_ns = Some(timer.elapsed_ns());
                }
                Stage::ConvertIr => {
                    ir_filename = Some(self.dslx_to_ir_function(input_filename, options)?);
                    self.timing.convert_ir_ns = Some(timer.elapsed_ns());
                }
                Stage::EvalUnoptInterpreter => {
                    let ir = require(ir_filename.as_deref(), "unoptimized IR file")?;
                    let args_file = require(args_filename, "args file")?;
                    let values = self.evaluate_ir_function(ir, args_file, false, options)?;
                    results.push(("evaluated unopt IR (interpreter)".to_string(), values));
                    self.timing.unoptimized_interpret_ir_ns = Some(timer.elapsed_ns());
                }
                Stage::EvalUnoptJit => {
                    let ir = require(ir_filename.as_deref(), "unoptimized IR file")?;
                    let args_file = require(args_filename, "args file")?;
                    let values = self.evaluate_ir_function(ir, args_file, true, options)?;
                    results.push(("evaluated unopt IR (JIT)".to_string(), values));
                    self.timing.unoptimized_jit_ns = Some(timer.elapsed_ns());
                }
                Stage::OptimizeIr => {
                    let ir = require(ir_filename.as_deref(), "unoptimized IR file")?;
                    opt_ir_filename = Some(self.optimize_ir(ir, options)?);
                    self.timing.optimize_ns = Some(timer.elapsed_ns());
                }
                Stage::EvalOptJit => {
                    let ir = require(opt_ir_filename.as_deref(), "optimized IR file")?;
                    let args_file = require(args_filename, "args file")?;
                    let values = self.evaluate_ir_function(ir, args_file, true, options)?;
                    results.push(("evaluated opt IR (JIT)".to_string(), values));
                    self.timing.optimized_jit_ns = Some(timer.elapsed_ns());
                }
                Stage::EvalOptInterpreter => {
                    let ir = require(opt_ir_filename.as_deref(), "optimized IR file")?;
                    let args_file = require(args_filename, "args file")?;
                    let values = self.evaluate_ir_function(ir, args_file, false, options)?;
                    results.push(("evaluated opt IR (interpreter)".to_string(), values));
                    self.timing.optimized_interpret_ir_ns = Some(timer.elapsed_ns());
                }
                Stage::Codegen => {
                    let opt_ir = require(opt_ir_filename.as_deref(), "optimized IR file")?;
                    verilog_filename =
                        Some(self.codegen(opt_ir, &options.codegen_args, options)?);
                    self.timing.codegen_ns = Some(timer.elapsed_ns());
                }
                Stage::Simulate => {
                    assert!(
                        args_filename.is_some(),
                        "simulation requires an args batch"
                    );
                    let verilog = require(verilog_filename.as_deref(), "hardware description")?;
                    let args_file = require(args_filename, "args file")?;
                    let values = self.simulate_function(
                        verilog,
                        "module_sig.textproto",
                        args_file,
                        options,
                    )?;
                    results.push(("simulated".to_string(), values));
                    self.timing.simulate_ns = Some(timer.elapsed_ns());
                }
            }
        }

        Ok(compare_results_function(&results, args_batch.as_ref())?)
    }

    fn run_proc(
        &mut self,
        input_filename: &str,
        options: &SampleOptions,
        args_filename: Option<&str>,
        ir_channel_names_filename: Option<&str>,
        proc_init_values_filename: Option<&str>,
    ) -> Result<(), RunnerError> {
        let input_text = self.read_file(input_filename)?;
        let args_batch = match args_filename {
            Some(filename) => Some(parse_args_batch(&self.read_file(filename)?)?),
            None => None,
        };
        let ir_channel_names = match ir_channel_names_filename {
            Some(filename) => Some(parse_ir_channel_names(&self.read_file(filename)?)?),
            None => None,
        };
        let proc_init_values = match proc_init_values_filename {
            Some(filename) => Some(parse_proc_init_values(&self.read_file(filename)?)?),
            None => None,
        };
        let args_len = args_batch.as_ref().map(Vec::len);

        let mut results: Vec<(String, ChannelValues)> = Vec::new();
        let mut ir_filename = if options.input_is_dslx {
            None
        } else {
            Some(self.write_file("sample.ir", &input_text)?)
        };
        let mut opt_ir_filename: Option<String> = None;

        for &stage in PIPELINE {
            match decide(stage, options, args_len) {
                StageDecision::Skip => continue,
                StageDecision::Stop => return Ok(()),
                StageDecision::Run => {}
            }
            let timer = Timer::start();
            match stage {
                Stage::InterpretDslx => {
                    let batch = require(args_batch.as_ref(), "args batch")?;
                    let channels = self.interpret_dslx_proc(
                        &input_text,
                        TOP_NAME,
                        batch,
                        proc_init_values.as_deref(),
                    )?;
                    results.push(("interpreted DSLX".to_string(), channels));
                    self.timing.interpret_dslx_ns = Some(timer.elapsed_ns());
                }
                Stage::ConvertIr => {
                    let init = proc_init_values.as_deref().ok_or_else(|| {
                        RunnerError::MissingInput(
                            "proc-top IR conversion requires proc initial values".into(),
                        )
                    })?;
                    ir_filename = Some(self.dslx_to_ir_proc(input_filename, init, options)?);
                    self.timing.convert_ir_ns = Some(timer.elapsed_ns());
                }
                Stage::EvalUnoptInterpreter => {
                    let channels =
                        self.evaluate_ir_proc_stage(&ir_filename, &args_batch, &ir_channel_names, false, options)?;
                    results.push(("evaluated unopt IR (interpreter)".to_string(), channels));
                    self.timing.unoptimized_interpret_ir_ns = Some(timer.elapsed_ns());
                }
                Stage::EvalUnoptJit => {
                    let channels =
                        self.evaluate_ir_proc_stage(&ir_filename, &args_batch, &ir_channel_names, true, options)?;
                    results.push(("evaluated unopt IR (JIT)".to_string(), channels));
                    self.timing.unoptimized_jit_ns = Some(timer.elapsed_ns());
                }
                Stage::OptimizeIr => {
                    let ir = require(ir_filename.as_deref(), "unoptimized IR file")?;
                    opt_ir_filename = Some(self.optimize_ir(ir, options)?);
                    self.timing.optimize_ns = Some(timer.elapsed_ns());
                }
                Stage::EvalOptJit => {
                    let channels =
                        self.evaluate_ir_proc_stage(&opt_ir_filename, &args_batch, &ir_channel_names, true, options)?;
                    results.push(("evaluated opt IR (JIT)".to_string(), channels));
                    self.timing.optimized_jit_ns = Some(timer.elapsed_ns());
                }
                Stage::EvalOptInterpreter => {
                    let channels =
                        self.evaluate_ir_proc_stage(&opt_ir_filename, &args_batch, &ir_channel_names, false, options)?;
                    results.push(("evaluated opt IR (interpreter)".to_string(), channels));
                    self.timing.optimized_interpret_ir_ns = Some(timer.elapsed_ns());
                }
                Stage::Codegen => {
                    let opt_ir = require(opt_ir_filename.as_deref(), "optimized IR file")?;
                    self.codegen(opt_ir, &options.codegen_args, options)?;
                    self.timing.codegen_ns = Some(timer.elapsed_ns());
                }
                Stage::Simulate => {
                    return Err(RunnerError::Unsupported(
                        "simulation for procs is not supported".into(),
                    ));
                }
            }
        }

        Ok(compare_results_proc(&results)?)
    }

    /// Gathers the proc evaluation inputs checked by the stage guards and
    /// runs one evaluation.
    fn evaluate_ir_proc_stage(
        &self,
        ir_filename: &Option<String>,
        args_batch: &Option<ArgsBatch>,
        ir_channel_names: &Option<Vec<String>>,
        use_jit: bool,
        options: &SampleOptions,
    ) -> Result<ChannelValues, RunnerError> {
        let ir = require(ir_filename.as_deref(), "IR file")?;
        let batch = require(args_batch.as_ref(), "args batch")?;
        let names = ir_channel_names.as_deref().ok_or_else(|| {
            RunnerError::MissingInput("proc-top evaluation requires IR channel names".into())
        })?;
        self.evaluate_ir_proc(ir, batch, names, use_jit, options)
    }

    fn interpret_dslx_function(
        &self,
        text: &str,
        top: &str,
        args_batch: &ArgsBatch,
    ) -> Result<Vec<Value>, RunnerError> {
        debug!("interpreting DSLX file");
        let interpreter = self.source_interpreter()?;
        let values = interpreter.run_function_batched(
            text,
            top,
            args_batch,
            self.tools.dslx_stdlib_path.as_deref(),
        )?;
        self.write_file("sample.x.results", &values_to_text(&values))?;
        Ok(values)
    }

    fn interpret_dslx_proc(
        &self,
        text: &str,
        top: &str,
        args_batch: &ArgsBatch,
        proc_init_values: Option<&[Value]>,
    ) -> Result<ChannelValues, RunnerError> {
        debug!("interpreting DSLX file");
        let interpreter = self.source_interpreter()?;
        let channels = interpreter.run_proc(
            text,
            top,
            args_batch,
            proc_init_values,
            self.tools.dslx_stdlib_path.as_deref(),
        )?;
        let ordered: Vec<(String, Vec<Value>)> = channels
            .iter()
            .map(|(name, values)| (name.clone(), values.clone()))
            .collect();
        self.write_file("sample.x.results", &channel_values_to_text(&ordered))?;
        Ok(channels)
    }

    fn source_interpreter(&self) -> Result<&dyn SourceInterpreter, RunnerError> {
        self.interpreter.as_deref().ok_or_else(|| {
            RunnerError::Unsupported(
                "sample requires DSLX interpretation but no source-language evaluator was provided"
                    .into(),
            )
        })
    }

    fn dslx_to_ir_function(
        &self,
        dslx_filename: &str,
        options: &SampleOptions,
    ) -> Result<String, RunnerError> {
        let mut args = options.ir_converter_args.clone();
        args.push(dslx_filename.to_string());
        let ir_text = self.run_tool("Converting DSLX to IR", &self.tools.ir_converter, &args, options)?;
        self.write_file("sample.ir", &ir_text)
    }

    fn dslx_to_ir_proc(
        &self,
        dslx_filename: &str,
        proc_init_values: &[Value],
        options: &SampleOptions,
    ) -> Result<String, RunnerError> {
        let mut args = options.ir_converter_args.clone();
        let init = proc_init_values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        args.push(format!("--top_proc_initial_state={init}"));
        args.push(dslx_filename.to_string());
        let ir_text = self.run_tool("Converting DSLX to IR", &self.tools.ir_converter, &args, options)?;
        self.write_file("sample.ir", &ir_text)
    }

    fn evaluate_ir_function(
        &self,
        ir_filename: &str,
        args_filename: &str,
        use_jit: bool,
        options: &SampleOptions,
    ) -> Result<Vec<Value>, RunnerError> {
        let backend = if use_jit { "JIT" } else { "interpreter" };
        let args = vec![
            format!("--input_file={args_filename}"),
            if use_jit {
                "--use_llvm_jit".to_string()
            } else {
                "--nouse_llvm_jit".to_string()
            },
            ir_filename.to_string(),
        ];
        let results_text = self.run_tool(
            &format!("Evaluating IR file ({backend}): {ir_filename}"),
            &self.tools.ir_evaluator,
            &args,
            options,
        )?;
        self.write_file(&format!("{ir_filename}.results"), &results_text)?;
        Ok(parse_values(&results_text)?)
    }

    fn evaluate_ir_proc(
        &self,
        ir_filename: &str,
        args_batch: &ArgsBatch,
        ir_channel_names: &[String],
        use_jit: bool,
        options: &SampleOptions,
    ) -> Result<ChannelValues, RunnerError> {
        // Transpose the tick-major batch into per-channel input sequences.
        let mut channels: Vec<(String, Vec<Value>)> = ir_channel_names
            .iter()
            .map(|name| (name.clone(), Vec::new()))
            .collect();
        for tick in args_batch {
            assert_eq!(
                tick.len(),
                ir_channel_names.len(),
                "each args vector must carry one value per channel"
            );
            for (slot, value) in channels.iter_mut().zip(tick) {
                slot.1.push(value.clone());
            }
        }
        let channel_inputs_filename =
            self.write_file("channel_inputs.txt", &channel_values_to_text(&channels))?;

        let backend = if use_jit { "serial_jit" } else { "ir_interpreter" };
        let desc_backend = if use_jit { "JIT" } else { "interpreter" };
        let args = vec![
            format!("--inputs_for_all_channels={channel_inputs_filename}"),
            format!("--ticks={}", args_batch.len()),
            format!("--backend={backend}"),
            ir_filename.to_string(),
        ];
        let results_text = self.run_tool(
            &format!("Evaluating IR file ({desc_backend}): {ir_filename}"),
            &self.tools.proc_evaluator,
            &args,
            options,
        )?;
        self.write_file(&format!("{ir_filename}.results"), &results_text)?;
        Ok(parse_channel_values(&results_text)
            .map_err(RunnerError::from)?
            .into_iter()
            .collect())
    }

    fn optimize_ir(&self, ir_filename: &str, options: &SampleOptions) -> Result<String, RunnerError> {
        let opt_ir_text = self.run_tool(
            "Optimizing IR",
            &self.tools.ir_optimizer,
            &[ir_filename.to_string()],
            options,
        )?;
        self.write_file("sample.opt.ir", &opt_ir_text)
    }

    fn codegen(
        &self,
        ir_filename: &str,
        codegen_args: &[String],
        options: &SampleOptions,
    ) -> Result<String, RunnerError> {
        let mut args = vec![
            "--output_signature_path=module_sig.textproto".to_string(),
            "--delay_model=unit".to_string(),
        ];
        args.extend(codegen_args.iter().cloned());
        args.push(ir_filename.to_string());
        let verilog_text =
            self.run_tool("Generating Verilog", &self.tools.codegen, &args, options)?;
        let filename = if options.use_system_verilog {
            "sample.sv"
        } else {
            "sample.v"
        };
        self.write_file(filename, &verilog_text)
    }

    fn simulate_function(
        &self,
        verilog_filename: &str,
        module_sig_filename: &str,
        args_filename: &str,
        options: &SampleOptions,
    ) -> Result<Vec<Value>, RunnerError> {
        check_simulator(options.simulator.as_deref())?;
        let mut args = vec![
            format!("--signature_file={module_sig_filename}"),
            format!("--args_file={args_filename}"),
        ];
        if let Some(simulator) = &options.simulator {
            args.push(format!("--verilog_simulator={simulator}"));
        }
        args.push(verilog_filename.to_string());
        let results_text = self.run_tool(
            &format!("Simulating Verilog {verilog_filename}"),
            &self.tools.simulator_driver,
            &args,
            options,
        )?;
        self.write_file(&format!("{verilog_filename}.results"), &results_text)?;
        Ok(parse_values(&results_text)?)
    }

    fn run_tool(
        &self,
        desc: &str,
        program: &Path,
        args: &[String],
        options: &SampleOptions,
    ) -> Result<String, RunnerError> {
        exec::run_command(
            desc,
            program,
            args,
            &self.run_dir,
            options.timeout_seconds.map(Duration::from_secs),
        )
    }

    /// Writes `content` under `filename` in the run directory and returns
    /// the filename.
    fn write_file(&self, filename: &str, content: &str) -> Result<String, RunnerError> {
        std::fs::write(self.run_dir.join(filename), content)?;
        Ok(filename.to_string())
    }

    /// Returns the content of the named file in the run directory.
    fn read_file(&self, filename: &str) -> Result<String, RunnerError> {
        Ok(std::fs::read_to_string(self.run_dir.join(filename))?)
    }
}

/// Names of the input files `run` wrote for `run_from_files`.
struct InputFiles {
    input: String,
    args: Option<String>,
    channels: Option<String>,
    init: Option<String>,
}
