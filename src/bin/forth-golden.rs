//! forth-golden CLI
//!
//! Run every `.fth` case in a directory through the interpreter and compare
//! stdout with the recorded `.o` golden files.

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use forth_golden::{split_args, RunSummary, Switches};

#[derive(Parser, Debug)]
#[command(name = "forth-golden")]
#[command(version)]
#[command(about = "Golden-file tests for the forth interpreter")]
#[command(override_usage = "forth-golden [-SWITCHES]... [OPTIONS]")]
#[command(after_help = "Switches (may be bundled, e.g. -fv):\n  \
    -f  Re-record every golden file, then run the comparison\n  \
    -v  Show exit code and output of cases that exit non-zero\n\
    Unknown switches are reported and ignored.")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Directory containing the test cases
    #[arg(long, default_value = "tests/")]
    dir: PathBuf,

    /// Interpreter to run on each case
    #[arg(long, default_value = "./forth")]
    program: PathBuf,

    /// Extension of test source files
    #[arg(long = "source-ext", default_value = "fth")]
    source_ext: String,

    /// Extension of golden output files
    #[arg(long = "golden-ext", default_value = "o")]
    golden_ext: String,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Print version
    #[arg(long, action = ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> ExitCode {
    let mut raw = std::env::args_os();
    let argv0 = raw.next().unwrap_or_else(|| "forth-golden".into());

    // clap only sees known long options; switch bundles bypass it so an
    // unknown one is reported instead of aborting the run.
    let command = Cli::command();
    let (bundles, options) = split_args(raw, |name| {
        command
            .get_arguments()
            .find(|arg| arg.get_long() == Some(name))
            .map(|arg| arg.get_action().takes_values())
    });
    let cli = Cli::parse_from(std::iter::once(argv0).chain(options));

    if let Err(e) = forth_golden::init_logger("warn") {
        eprintln!("warning: logging disabled: {:#}", e);
    }

    let switches = Switches::parse(&bundles);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match run(&cli, &switches, &mut out) {
        Ok(summary) => {
            tracing::debug!(passed = summary.passed, total = summary.total, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let _ = out.flush();
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, switches: &Switches, out: &mut dyn Write) -> anyhow::Result<RunSummary> {
    for line in switches.unknown_lines() {
        writeln!(out, "{}", line).context("failed to write report")?;
    }

    let summary = forth_golden::run(&cli.dir)
        .program(&cli.program)
        .source_ext(&cli.source_ext)
        .golden_ext(&cli.golden_ext)
        .switches(switches)
        .run(out)
        .with_context(|| format!("test run in {} aborted", cli.dir.display()))?;

    Ok(summary)
}
