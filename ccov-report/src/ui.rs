//! Print colored text.
//!
//! Diagnostics are printed to `stderr` in the `cargo` output style, so that they never mix with the report on `stdout`.
//! The only exception is the usage line.

use error::{Error, ErrorKind};

use termcolor::*;

use std::io::{Result, Write, stdout};

/// Prints an error and the causes, or the usage line for [`Usage`].
///
/// [`Usage`]: ../error/enum.ErrorKind.html#variant.Usage
pub fn print_error(error: &Error) -> Result<()> {
    if let ErrorKind::Usage(ref program) = *error.kind() {
        return print_usage(program);
    }

    let stream = StandardStream::stderr(ColorChoice::Auto);
    let mut lock = stream.lock();

    for (i, e) in error.iter().enumerate() {
        trace!("error chain #{}: {:?}", i, e);
        if i == 0 {
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_intense(true).set_bold(true))?;
            write!(lock, "error: ")?;
        } else {
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(lock, "caused by: ")?;
        }
        lock.reset()?;
        writeln!(lock, "{}", e)?;
    }
    if let Some(backtrace) = error.backtrace() {
        writeln!(lock, "\n{:?}", backtrace)?;
    }
    Ok(())
}

/// Prints the one-line usage message to `stdout`.
fn print_usage(program: &str) -> Result<()> {
    let stdout = stdout();
    let mut lock = stdout.lock();
    writeln!(lock, "{} LOG SRC", program)
}
