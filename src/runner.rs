//! Test runner
//!
//! Discovers cases, optionally re-records every golden file, then runs and
//! judges each case in turn and prints the summary.
//!
//! The report goes to a caller-supplied writer. Diagnostics go through
//! `tracing`.

use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::PathBuf;
use crate::compare::{compare, Verdict};
use crate::discovery::discover;
use crate::error::HarnessError;
use crate::executor::{ExecutionResult, Executor};
use crate::golden::GoldenStore;
use crate::switches::Switches;

/// Configuration for the test runner
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding `<id>.<source_ext>` / `<id>.<golden_ext>` pairs
    pub dir: PathBuf,
    /// Program under test, invoked as `<program> <source path>`
    pub program: PathBuf,
    /// Source file extension, without the dot
    pub source_ext: String,
    /// Golden file extension, without the dot
    pub golden_ext: String,
    /// Regenerate all golden files before comparing
    pub override_goldens: bool,
    /// Print exit code and output for cases that exit abnormally
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("tests/"),
            program: PathBuf::from("./forth"),
            source_ext: "fth".into(),
            golden_ext: "o".into(),
            override_goldens: false,
            verbose: false,
        }
    }
}

impl RunConfig {
    /// Turn on the modes selected by command-line switches
    pub fn apply_switches(&mut self, switches: &Switches) {
        self.override_goldens |= switches.override_goldens;
        self.verbose |= switches.verbose;
    }
}

/// Pass/fail counts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub total: usize,
    /// Identifiers of failed cases, in run order, as displayed in the report
    pub failed: Vec<String>,
}

impl RunSummary {
    pub fn record(&mut self, id: &OsStr, verdict: Verdict) {
        self.total += 1;
        if verdict.passed() {
            self.passed += 1;
        } else {
            self.failed.push(id.to_string_lossy().into_owned());
        }
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Format the summary line
    pub fn summary(&self) -> String {
        format!("Tests: {}/{}", self.passed, self.total)
    }
}

/// The test runner
pub struct TestRunner {
    config: RunConfig,
    executor: Executor,
    store: GoldenStore,
}

impl TestRunner {
    pub fn new(config: RunConfig) -> Self {
        let executor = Executor::new(config.program.clone());
        let store = GoldenStore::new(config.dir.clone(), config.golden_ext.clone());
        Self {
            config,
            executor,
            store,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Discover test case identifiers in the configured directory
    pub fn discover(&self) -> Result<Vec<OsString>, HarnessError> {
        discover(&self.config.dir, &self.config.source_ext)
    }

    /// Run all phases and write the report to `out`.
    ///
    /// In override mode every golden file is rewritten first; comparison
    /// then re-runs each case from scratch.
    pub fn run_all(&self, out: &mut dyn Write) -> Result<RunSummary, HarnessError> {
        let ids = self.discover()?;

        if self.config.override_goldens {
            self.override_all(&ids, out)?;
        }

        tracing::debug!(count = ids.len(), "running cases");
        let mut summary = RunSummary::default();
        for id in &ids {
            let verdict = self.run_one(id, out)?;
            summary.record(id, verdict);
        }

        self.report(&summary, out)?;
        Ok(summary)
    }

    /// Record the current output of every case as its golden file.
    /// No comparison happens here.
    pub fn override_all(&self, ids: &[OsString], out: &mut dyn Write) -> Result<(), HarnessError> {
        writeln!(out, "Overriding all `.{}` files.\n", self.config.golden_ext)
            .map_err(HarnessError::report)?;

        for id in ids {
            let name = id.to_string_lossy();
            let _span = tracing::debug_span!("record", id = %name).entered();
            let result = self.execute(id)?;
            self.store.store(id, &result.stdout)?;

            if result.stdout.is_empty() {
                writeln!(out, "Recorded empty output for `{}`.", name).map_err(HarnessError::report)?;
            }
            if !result.success() {
                writeln!(
                    out,
                    "Recorded output for `{}` despite exit code {}.",
                    name,
                    result.exit_display()
                )
                .map_err(HarnessError::report)?;
            }
        }
        Ok(())
    }

    /// Run and judge a single case, printing failure notices as they happen
    pub fn run_one(&self, id: &OsStr, out: &mut dyn Write) -> Result<Verdict, HarnessError> {
        let name = id.to_string_lossy();
        let _span = tracing::debug_span!("case", id = %name).entered();
        let result = self.execute(id)?;

        if self.config.verbose && !result.success() {
            write_diagnostics(&name, &result, out).map_err(HarnessError::report)?;
        }

        let golden = self.store.load(id)?;
        let verdict = compare(&result.stdout, golden.as_deref());
        tracing::debug!(?verdict, "judged");

        match verdict {
            Verdict::Pass => {}
            Verdict::MissingGolden => {
                writeln!(out, "Output file for `{}` not found", name).map_err(HarnessError::report)?;
                writeln!(out, "Test `{}` failed.", name).map_err(HarnessError::report)?;
            }
            Verdict::Mismatch => {
                writeln!(out, "Test `{}` failed.", name).map_err(HarnessError::report)?;
            }
        }
        Ok(verdict)
    }

    /// Print the summary line, plus the confirmation line when nothing failed
    pub fn report(&self, summary: &RunSummary, out: &mut dyn Write) -> Result<(), HarnessError> {
        writeln!(out, "{}", summary.summary()).map_err(HarnessError::report)?;
        if summary.all_passed() {
            writeln!(out, "All tests passed! :D").map_err(HarnessError::report)?;
        }
        out.flush().map_err(HarnessError::report)
    }

    fn execute(&self, id: &OsStr) -> Result<ExecutionResult, HarnessError> {
        self.executor.run(&self.config.dir, id, &self.config.source_ext)
    }
}

/// Exit code, raw stdout, and stderr if any, for an abnormal exit
fn write_diagnostics(id: &str, result: &ExecutionResult, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        out,
        "Exit code {} while running `{}`. Logging standard output.",
        result.exit_display(),
        id
    )?;
    write_block(&result.stdout, out)?;
    if !result.stderr.is_empty() {
        writeln!(out, "Standard error:")?;
        write_block(&result.stderr, out)?;
    }
    Ok(())
}

fn write_block(bytes: &[u8], out: &mut dyn Write) -> std::io::Result<()> {
    out.write_all(bytes)?;
    if !bytes.ends_with(b"\n") {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Strip a leading dot so `.fth` and `fth` mean the same thing
fn normalize_ext(ext: &str) -> String {
    ext.strip_prefix('.').unwrap_or(ext).to_string()
}

/// Builder API for convenient test runner construction
pub struct TestRunnerBuilder {
    config: RunConfig,
}

impl TestRunnerBuilder {
    /// Start building a runner for the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            config: RunConfig {
                dir: dir.into(),
                ..Default::default()
            },
        }
    }

    /// Set the program under test
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.config.program = program.into();
        self
    }

    /// Set the source file extension (leading dot optional)
    pub fn source_ext(mut self, ext: &str) -> Self {
        self.config.source_ext = normalize_ext(ext);
        self
    }

    /// Set the golden file extension (leading dot optional)
    pub fn golden_ext(mut self, ext: &str) -> Self {
        self.config.golden_ext = normalize_ext(ext);
        self
    }

    /// Regenerate golden files before comparing
    pub fn override_goldens(mut self, enabled: bool) -> Self {
        self.config.override_goldens = enabled;
        self
    }

    /// Enable verbose diagnostics
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Apply command-line switches on top of the current settings
    pub fn switches(mut self, switches: &Switches) -> Self {
        self.config.apply_switches(switches);
        self
    }

    /// Build and return the runner
    pub fn build(self) -> TestRunner {
        TestRunner::new(self.config)
    }

    /// Build and run all tests, reporting to `out`
    pub fn run(self, out: &mut dyn Write) -> Result<RunSummary, HarnessError> {
        self.build().run_all(out)
    }
}

/// Convenience function: create a runner builder for a directory
pub fn run(dir: impl Into<PathBuf>) -> TestRunnerBuilder {
    TestRunnerBuilder::new(dir)
}

/// Run every case under `dir` with `program` and panic unless all pass.
///
/// Usage in cargo tests:
/// ```rust,ignore
/// #[test]
/// fn golden() {
///     forth_golden::run_and_assert("tests/programs", env!("CARGO_BIN_EXE_forth"));
/// }
/// ```
pub fn run_and_assert(dir: impl Into<PathBuf>, program: impl Into<PathBuf>) {
    let mut report = Vec::new();
    let result = run(dir)
        .program(program)
        .verbose(std::env::var("FORTH_GOLDEN_VERBOSE").is_ok())
        .run(&mut report);
    eprint!("{}", String::from_utf8_lossy(&report));

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => panic!("golden run aborted: {}", e),
    };
    if !summary.all_passed() {
        panic!("{} golden test(s) failed: {}", summary.failed.len(), summary.failed.join(", "));
    }
}
