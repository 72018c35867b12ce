use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use reglan_core::{EnumerateOptions, Enumeration, LineSource, RegexError, Regexp};
use thiserror::Error;

mod error;
mod source;

pub use error::CommandLineError;
pub use source::FsLineSource;

/// `reglan [options] PATTERN` — enumerate every string in the regular
/// language a pattern denotes, length-ascending.
#[derive(Debug, Parser)]
#[command(name = "reglan", version, about)]
pub struct Args {
    #[arg(value_name = "PATTERN")]
    /// The pattern to enumerate.
    pub pattern: Option<String>,

    #[arg(short = 'n', long = "limit", value_name = "N")]
    /// Emit at most N strings (default: unbounded).
    pub limit: Option<u64>,

    #[arg(short = 'o', long = "offset", value_name = "K", default_value_t = 0)]
    /// Skip the first K strings before emitting.
    pub offset: u64,

    #[arg(short = 'c', long = "count")]
    /// Silent mode: print only the final count, not the strings.
    pub silent: bool,
}

impl Args {
    /// The pattern the user supplied, or `NoPattern` if it's missing.
    /// `clap` already marks the positional required in normal use; this
    /// exists so `Args` built directly (as the tests in `src/tests/` do)
    /// still validate the same way.
    pub fn pattern(&self) -> Result<&str, CommandLineError> {
        self.pattern.as_deref().ok_or(CommandLineError::NoPattern)
    }
}

/// Everything that can go wrong end to end: a bad argument, a malformed
/// pattern, or a failure writing the result.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    CommandLine(#[from] CommandLineError),
    #[error(transparent)]
    Regex(#[from] RegexError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Parses `pattern` through `source`, resolving any `(?F<path>)`
/// references. Split out from `run` so it is independently testable
/// (the core-compiling half of the pipeline).
pub fn compile_pattern(pattern: &str, source: &dyn LineSource) -> Result<Regexp, RegexError> {
    Regexp::new(pattern, source)
}

/// Runs the offset/bound driver over `regexp` and writes the result to
/// `out`: one string per line, or — in silent mode — a single line with the
/// count. Split out from `run` so it is independently testable (the
/// enumerating-and-emitting half of the pipeline).
pub fn execute_enumeration(
    regexp: &Regexp,
    options: EnumerateOptions,
    out: &mut impl Write,
) -> io::Result<()> {
    match regexp.enumerate(options) {
        Enumeration::Strings(strings) => {
            for s in strings {
                writeln!(out, "{s}")?;
            }
        }
        Enumeration::Count(n) => writeln!(out, "{n}")?,
    }
    Ok(())
}

/// The whole pipeline: validate `args`, compile the pattern, enumerate it,
/// write the result to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), RunError> {
    let pattern = args.pattern()?;
    let regexp = compile_pattern(pattern, &FsLineSource)?;
    let options = EnumerateOptions {
        offset: args.offset,
        limit: args.limit,
        silent: args.silent,
    };
    execute_enumeration(&regexp, options, out)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match run(&args, &mut handle) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[path = "tests/compile_pattern_tests.rs"]
mod compile_pattern_tests;
#[cfg(test)]
#[path = "tests/execute_enumeration_tests.rs"]
mod execute_enumeration_tests;
#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
