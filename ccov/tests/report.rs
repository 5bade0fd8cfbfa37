extern crate ccov;
extern crate diff;
extern crate termcolor;

use ccov::*;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use std::fs::read_dir;
use std::io::{self, Write};
use std::path::Path;
use std::process::exit;

fn main() {
    run().expect("IO");
}

fn run() -> io::Result<()> {
    let mut failed_tests = 0;

    let stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut lock = stdout.lock();

    let mut cases = Vec::new();
    for entry in read_dir("test-data")? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            cases.push(entry.path());
        }
    }
    cases.sort();

    for path in cases {
        write!(lock, "test {} ... ", path.display())?;
        lock.flush()?;
        if !print_test_result(&mut lock, test(&path))? {
            failed_tests += 1;
        }
    }

    if failed_tests != 0 {
        writeln!(lock, "\ntest result: {} failed.\n", failed_tests)?;
        exit(101);
    } else {
        writeln!(lock, "\ntest result: ok.\n")?;
    }

    Ok(())
}

fn test(path: &Path) -> Result<(String, String)> {
    let log = read_to_string_lossy(path.join("trace.log"))?;
    let traces = parse_traces(&log)?;
    let sources = SourceTable::load_for(&path.join("src"), &traces)?;
    let actual_report = render_to_string(&traces, &sources)?;
    let expected_report = read_to_string_lossy(path.join("expected.txt"))?;
    Ok((actual_report, expected_report))
}

fn print_test_result<W: Write + WriteColor>(mut lock: W, result: Result<(String, String)>) -> io::Result<bool> {
    Ok(match result {
        Ok((actual_report, expected_report)) => {
            let success = actual_report == expected_report;
            lock.set_color(ColorSpec::new().set_fg(Some(if success { Color::Green } else { Color::Red })))?;
            writeln!(lock, "{}", if success { "ok" } else { "FAILED" })?;
            if !success {
                for d in diff::lines(&actual_report, &expected_report) {
                    let (color, prefix, line) = match d {
                        diff::Result::Left(line) => (Color::Green, '+', line),
                        diff::Result::Both(line, _) => (Color::White, ' ', line),
                        diff::Result::Right(line) => (Color::Red, '-', line),
                    };
                    lock.set_color(ColorSpec::new().set_fg(Some(color)))?;
                    writeln!(lock, "{} {}", prefix, line)?;
                }
                writeln!(lock)?;
            }
            lock.reset()?;
            success
        },
        Err(e) => {
            lock.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
            writeln!(lock, "ERRORED")?;
            for (i, cause) in e.iter().enumerate() {
                lock.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                write!(lock, "{}", if i == 0 { "error: " } else { "caused by: " })?;
                lock.reset()?;
                writeln!(lock, "{}", cause)?;
            }
            writeln!(lock)?;
            false
        },
    })
}
