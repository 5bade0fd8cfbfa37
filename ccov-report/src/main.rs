//! `ccov-report` prints the source lines hit by the `#CCOV` coverage markers of a program log.
//!
//! ```sh
//! ccov-report LOG SRC
//! ```
//!
//! `LOG` is the log containing the markers, and `SRC` is the directory the marker file names are relative to. One row
//! is printed for every marker, in log order: the trace position, the 0-indexed line number and the source code.

#![recursion_limit = "128"] // needed for error_chain.
#![allow(dangerous_implicit_autorefs)] // triggered by clap 2's crate_authors! expansion.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate ccov;
extern crate env_logger;
extern crate termcolor;

mod error;
mod ui;

use error::{ErrorKind, Result, ResultExt};

use ccov::{SourceTable, parse_traces, read_to_string_lossy, render};
use clap::ArgMatches;

use std::env;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::exit;

/// Program entry. Calls [`run()`] and prints any error returned, or the usage line if an argument is missing.
///
/// [`run()`]: ./fn.run.html
fn main() {
    if let Err(error) = run() {
        ui::print_error(&error).expect("error while printing error 🤷");
        exit(1);
    }
}

/// Runs the `ccov-report` program.
fn run() -> Result<()> {
    let matches = parse_args();
    env_logger::init();
    debug!("matches = {:?}", matches);

    let (log_path, src_path) = match (matches.value_of_os("LOG"), matches.value_of_os("SRC")) {
        (Some(log_path), Some(src_path)) => (Path::new(log_path), Path::new(src_path)),
        _ => bail!(ErrorKind::Usage(program_name())),
    };

    let log = read_to_string_lossy(log_path).chain_err(|| format!("Cannot read log file `{}`", log_path.display()))?;
    let traces = parse_traces(&log)?;
    let sources = SourceTable::load_for(src_path, &traces)?;
    debug!("loaded {} source files for {} traces", sources.len(), traces.len());

    let stdout = io::stdout();
    let mut lock = BufWriter::new(stdout.lock());
    render(&mut lock, &traces, &sources)?;
    lock.flush()?;
    Ok(())
}

/// Parses the command line arguments using `clap`.
///
/// Both positional arguments are optional here, so that a missing one is reported with the short usage line instead
/// of clap's error message. Any positional argument after `SRC` is accepted and ignored.
fn parse_args() -> ArgMatches<'static> {
    clap_app!(ccov_report =>
        (bin_name: "ccov-report")
        (author: crate_authors!(", "))
        (about: crate_description!())
        (version: crate_version!())
        (@arg LOG: "Log file containing the #CCOV markers")
        (@arg SRC: "Directory which the source file names in the markers are relative to")
        (@arg EXTRA: +multiple +hidden "Ignored")
    ).get_matches()
}

/// The name this program is invoked with.
fn program_name() -> String {
    env::args_os().next().map_or_else(|| "ccov-report".to_owned(), |arg0| arg0.to_string_lossy().into_owned())
}
