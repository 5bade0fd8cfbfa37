#[macro_use]
extern crate error_chain;
extern crate ccov;
extern crate env_logger;
extern crate serde_json;

use ccov::{Result, parse_traces, read_to_string_lossy};

use std::env;
use std::io::stdout;

quick_main!(run);

fn run() -> Result<()> {
    env_logger::init();

    let filename = env::args_os().nth(1).expect("filename");
    let log = read_to_string_lossy(filename)?;
    let traces = parse_traces(&log)?;
    serde_json::to_writer_pretty(stdout(), &traces)?;
    Ok(())
}
