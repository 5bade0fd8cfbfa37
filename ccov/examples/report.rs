#[macro_use]
extern crate error_chain;
extern crate ccov;
extern crate env_logger;

use ccov::{Result, SourceTable, Traces, read_to_string_lossy, render};

use std::env;
use std::io::stdout;
use std::path::PathBuf;

quick_main!(run);

/// Like `ccov-report`, but skips malformed markers instead of stopping at the first one.
fn run() -> Result<()> {
    env_logger::init();

    let mut args = env::args_os().skip(1);
    let log_path = args.next().expect("log path");
    let src_path = PathBuf::from(args.next().expect("source root"));

    let log = read_to_string_lossy(log_path)?;
    let traces = Traces::new(&log).filter_map(|trace| trace.map_err(|e| eprintln!("skipped: {}", e)).ok()).collect::<Vec<_>>();
    let sources = SourceTable::load_for(&src_path, &traces)?;
    render(stdout(), &traces, &sources)
}
