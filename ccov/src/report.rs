//! Trace report.
//!
//! The report prints one row per trace, in the order the traces appear in the log:
//!
//! ```text
//!      1|     2|    return fib(n - 1) + fib(n - 2);
//!      2|     0|int fib(int n) {
//! ```
//!
//! The first column is the 1-based position of the trace, the second column is the 0-indexed source line, and the rest
//! is the source code at that line.

use error::*;
use source::SourceTable;
use trace::TraceRecord;

use std::io::Write;

/// Width of the trace position column.
pub const INDEX_WIDTH: usize = 6;

/// Width of the source line number column.
pub const LINE_WIDTH: usize = 6;

/// Removes one line terminator from the end of `line`. A `\r\n` pair counts as one terminator.
pub fn strip_terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        &line[..line.len() - 2]
    } else if line.ends_with('\n') || line.ends_with('\r') {
        &line[..line.len() - 1]
    } else {
        line
    }
}

/// Formats a report row. Numbers wider than the columns are printed in full.
pub fn format_row(index: usize, line: i64, code: &str) -> String {
    format!("{:>iw$}|{:>lw$}|{}", index, line, code, iw = INDEX_WIDTH, lw = LINE_WIDTH)
}

/// Writes the report of `traces` into `out`.
///
/// Rows are written as they are resolved. If a trace cannot be resolved, the rows before it stay written.
///
/// # Errors
///
/// * Returns [`UnresolvedTrace`] with the 1-based position of the trace if it cannot be resolved. The cause is
///   [`MissingSource`] if the trace refers to a file absent from `sources`, or [`LineOutOfRange`] if it refers to a
///   line outside of its file.
/// * Returns [`Io`] if writing to `out` fails.
///
/// [`UnresolvedTrace`]: ../error/enum.ErrorKind.html#variant.UnresolvedTrace
/// [`MissingSource`]: ../error/enum.ErrorKind.html#variant.MissingSource
/// [`LineOutOfRange`]: ../error/enum.ErrorKind.html#variant.LineOutOfRange
/// [`Io`]: ../error/enum.ErrorKind.html#variant.Io
pub fn render<W: Write>(mut out: W, traces: &[TraceRecord], sources: &SourceTable) -> Result<()> {
    for (index, trace) in traces.iter().enumerate().map(|(i, t)| (i + 1, t)) {
        let code = sources.line(&trace.file, trace.line).chain_err(|| ErrorKind::UnresolvedTrace(index, trace.to_string()))?;
        writeln!(out, "{}", format_row(index, trace.line, strip_terminator(code)))?;
    }
    Ok(())
}

/// Renders the report of `traces` into a string.
pub fn render_to_string(traces: &[TraceRecord], sources: &SourceTable) -> Result<String> {
    let mut buffer = Vec::new();
    render(&mut buffer, traces, sources)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

//----------------------------------------------------------------------------------------------------------------------

#[cfg(test)]
use trace::parse_traces;

#[test]
fn test_strip_terminator() {
    assert_eq!(strip_terminator("int x;\n"), "int x;");
    assert_eq!(strip_terminator("int x;\r\n"), "int x;");
    assert_eq!(strip_terminator("int x;  \n"), "int x;  ");
    assert_eq!(strip_terminator("\n\n"), "\n");
    assert_eq!(strip_terminator("int x;"), "int x;");
    assert_eq!(strip_terminator(""), "");
}

#[test]
fn test_format_row() {
    assert_eq!(format_row(1, 2, "B"), "     1|     2|B");
    assert_eq!(format_row(123456, 0, ""), "123456|     0|");
    assert_eq!(format_row(1234567, 12345678, "x"), "1234567|12345678|x");
    assert_eq!(format_row(3, -1, "x"), "     3|    -1|x");
}

#[test]
fn test_render_in_log_order() {
    let traces = parse_traces("noise line\n#CCOV:foo.c:main:3\n#CCOV:foo.c:main:1\n").unwrap();
    let sources = SourceTable::from_sources(vec![("foo.c", "A\nB\nC\n")]);
    assert_eq!(render_to_string(&traces, &sources).unwrap(), "     1|     2|C\n     2|     0|A\n");
}

#[test]
fn test_render_keeps_duplicates() {
    let traces = parse_traces("#CCOV:a.c:f:1\n#CCOV:b.c:g:2:entry\n#CCOV:a.c:f:1\n").unwrap();
    let sources = SourceTable::from_sources(vec![("a.c", "int f() {\n"), ("b.c", "\n  int g;\n")]);
    assert_eq!(
        render_to_string(&traces, &sources).unwrap(),
        "     1|     0|int f() {\n     2|     1|  int g;\n     3|     0|int f() {\n"
    );
}

#[test]
fn test_render_empty() {
    assert_eq!(render_to_string(&[], &SourceTable::default()).unwrap(), "");
}

#[test]
fn test_render_partial_on_out_of_range() {
    let traces = parse_traces("#CCOV:foo.c:main:1\n#CCOV:foo.c:main:0\n#CCOV:foo.c:main:2\n").unwrap();
    let sources = SourceTable::from_sources(vec![("foo.c", "A\nB\n")]);
    let mut buffer = Vec::new();
    let err = render(&mut buffer, &traces, &sources).unwrap_err();
    match *err.kind() {
        ErrorKind::UnresolvedTrace(2, ref trace) => assert_eq!(trace, "Trace(file=foo.c,func=main,line=-1)"),
        ref kind => panic!("unexpected {:?}", kind),
    }
    assert_eq!(err.iter().nth(1).unwrap().to_string(), "line -1 is out of range for `foo.c`, which has 2 lines");
    assert_eq!(buffer, b"     1|     0|A\n");
}

#[test]
fn test_render_missing_source() {
    let traces = parse_traces("#CCOV:foo.c:main:1\n").unwrap();
    let err = render_to_string(&traces, &SourceTable::default()).unwrap_err();
    match *err.kind() {
        ErrorKind::UnresolvedTrace(1, _) => {},
        ref kind => panic!("unexpected {:?}", kind),
    }
    assert_eq!(err.iter().nth(1).unwrap().to_string(), "source `foo.c` has not been loaded");
}
