//! Command-line front end: replays one sample from an existing run
//! directory.
//!
//! The input files are expected inside the run directory; the harness writes
//! every stage artifact back into the same directory. Exit status is 0 on
//! agreement, 2 on a tool timeout, and 1 on any other failure, so fuzzer
//! drivers can triage timeouts without parsing the transcript.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use xcheck_runner::{SampleRunner, ToolSuite};

#[derive(Parser, Debug)]
#[command(name = "xcheck", about = "Runs one sample through every enabled evaluation path and cross-checks the results", version)]
struct Cli {
    /// Directory containing the toolchain binaries.
    #[arg(long)]
    tool_dir: PathBuf,

    /// Toolchain revision identifier recorded into the run directory.
    #[arg(long, default_value = "unknown")]
    revision: String,

    /// Library search path for the source-language evaluator.
    #[arg(long)]
    dslx_stdlib_path: Option<PathBuf>,

    /// Name of the program file inside the run directory.
    #[arg(long, default_value = "sample.x")]
    input_file: String,

    /// Name of the options file inside the run directory.
    #[arg(long, default_value = "options.json")]
    options_file: String,

    /// Name of the args-batch file inside the run directory.
    #[arg(long)]
    args_file: Option<String>,

    /// Name of the IR channel-names file inside the run directory.
    #[arg(long)]
    ir_channel_names_file: Option<String>,

    /// Name of the proc initial-values file inside the run directory.
    #[arg(long)]
    proc_init_values_file: Option<String>,

    /// Log stage progress to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// The run directory holding the sample files.
    run_dir: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut tools = ToolSuite::from_tool_dir(&cli.tool_dir, cli.revision);
    if let Some(path) = cli.dslx_stdlib_path {
        tools = tools.with_dslx_stdlib_path(path);
    }

    let mut runner = SampleRunner::new(cli.run_dir, tools);
    match runner.run_from_files(
        &cli.input_file,
        &cli.options_file,
        cli.args_file.as_deref(),
        cli.ir_channel_names_file.as_deref(),
        cli.proc_init_values_file.as_deref(),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            if error.is_timeout {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
