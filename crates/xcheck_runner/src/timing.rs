//! Per-stage wall-clock telemetry.
//!
//! Timing is advisory only: it is reported to the embedder for external
//! aggregation and never influences control flow or comparison outcomes.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A monotonic timer measuring one stage's elapsed time in nanoseconds.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Starts the timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Returns the nanoseconds elapsed since [`Timer::start`].
    pub fn elapsed_ns(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Elapsed nanoseconds per executed pipeline stage.
///
/// A field stays `None` when its stage did not run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleTiming {
    /// Source interpretation.
    pub interpret_dslx_ns: Option<u64>,
    /// DSLX-to-IR conversion.
    pub convert_ir_ns: Option<u64>,
    /// Unoptimized IR evaluation with the interpreter backend.
    pub unoptimized_interpret_ir_ns: Option<u64>,
    /// Unoptimized IR evaluation with the JIT backend.
    pub unoptimized_jit_ns: Option<u64>,
    /// IR optimization.
    pub optimize_ns: Option<u64>,
    /// Optimized IR evaluation with the interpreter backend.
    pub optimized_interpret_ir_ns: Option<u64>,
    /// Optimized IR evaluation with the JIT backend.
    pub optimized_jit_ns: Option<u64>,
    /// Hardware generation.
    pub codegen_ns: Option<u64>,
    /// Hardware simulation.
    pub simulate_ns: Option<u64>,
}
