//! Differential-testing harness for a hardware-design compiler toolchain.
//!
//! One sample (a generated program plus stimuli) is pushed through every
//! enabled evaluation path (source interpretation, unoptimized and optimized
//! IR evaluation on interpreter and JIT backends, hardware generation and
//! simulation) and the results are compared bit for bit. Any divergence
//! points at a bug in at least one path.
//!
//! The pipeline itself lives in [`SampleRunner`]; every stage records its
//! inputs and outputs into the run directory so failures replay offline.

#![warn(missing_docs)]

pub mod compare;
pub mod error;
pub mod exec;
pub mod runner;
pub mod timing;
pub mod tools;

pub use compare::{compare_results_function, compare_results_proc, ChannelValues};
pub use error::{normalize_failure, MiscompareError, RunnerError, SampleError};
pub use runner::SampleRunner;
pub use timing::SampleTiming;
pub use tools::{check_simulator, SourceInterpreter, ToolSuite, SUPPORTED_SIMULATORS};
