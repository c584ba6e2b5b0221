//! forth-golden: a golden-file test harness for a script interpreter
//!
//! # Overview
//!
//! Each test case is a source file `<id>.fth` in a test directory, paired
//! with a golden file `<id>.o` holding the exact bytes the interpreter is
//! expected to write to stdout. The harness runs `./forth <dir>/<id>.fth`
//! for every case and compares stdout byte for byte with the golden file.
//! A missing golden file is a failure.
//!
//! ```text
//! tests/
//!   arith.fth    arith.o
//!   loops.fth    loops.o
//!   new.fth                 <- fails until recorded
//! ```
//!
//! # Switches
//!
//! | Switch | Effect |
//! |--------|--------|
//! | `f` | Re-record every golden file, then run the comparison |
//! | `v` | Print exit code and output of cases that exit non-zero |
//!
//! Switches may be bundled (`-fv`) and mixed freely with long options such
//! as `--dir`. Unknown ones are reported and ignored.

mod compare;
mod discovery;
mod error;
mod executor;
mod golden;
mod logging;
mod runner;
mod switches;

pub use compare::{compare, Verdict};
pub use discovery::{case_path, discover};
pub use error::{ErrorKind, HarnessError};
pub use executor::{ExecutionResult, Executor};
pub use golden::GoldenStore;
pub use logging::init_logger;
pub use runner::{RunConfig, RunSummary, TestRunner, TestRunnerBuilder};
pub use switches::{split_args, Switches};

// Convenience functions for cargo test integration
pub use runner::{run, run_and_assert};
