//! Decoder of `#CCOV` coverage markers.
//!
//! An instrumented program prints one marker line every time a traced location is executed:
//!
//! ```text
//! #CCOV:<file>:<function>:<line>[:entry][:ret]
//! ```
//!
//! `<line>` is 1-based. The markers may be freely interleaved with other program output, so every line not starting
//! with the signature is skipped.

use error::*;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

use std::collections::BTreeSet;
use std::fmt;
use std::iter::Enumerate;
#[cfg(feature = "serde")]
use std::result::Result as StdResult;
use std::str::{FromStr, Lines};

/// The signature token which every marker line starts with.
pub const SIGNATURE: &str = "#CCOV";

/// Separator between the fields of a marker.
pub const FIELD_SEPARATOR: char = ':';

/// Minimum number of fields (including the signature) in a marker.
pub const MIN_FIELDS: usize = 4;

bitflags! {
    /// Attributes attached to a marker by the instrumentation.
    #[derive(Default)]
    pub struct TraceAttr: u32 {
        /// The first traced location of a function.
        const ENTRY = 1;
        /// A return instruction.
        const RET = 2;
    }
}

impl TraceAttr {
    /// Parses an extra marker field. Returns an empty set for unrecognized fields.
    fn from_field(field: &str) -> TraceAttr {
        match field.trim() {
            "entry" => TraceAttr::ENTRY,
            "ret" => TraceAttr::RET,
            _ => TraceAttr::empty(),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for TraceAttr {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

/// A decoded marker.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TraceRecord {
    /// Path of the source file, relative to the source root. Copied verbatim from the marker.
    pub file: String,

    /// Name of the function containing the traced location.
    pub function: String,

    /// The 0-indexed line number. Negative if the marker carries a line number of zero or below.
    pub line: i64,

    /// Extra attributes.
    pub attr: TraceAttr,
}

impl TraceRecord {
    /// Decodes a single marker line.
    ///
    /// The line may still contain its trailing line terminator.
    ///
    /// # Errors
    ///
    /// * Returns [`NotAMarker`] if the line does not start with [`SIGNATURE`].
    /// * Returns [`TooFewFields`] if the line has less than 4 colon-separated fields.
    /// * Returns [`InvalidLineNumber`] if the 4th field is not an integer.
    ///
    /// [`NotAMarker`]: ../error/enum.ErrorKind.html#variant.NotAMarker
    /// [`TooFewFields`]: ../error/enum.ErrorKind.html#variant.TooFewFields
    /// [`InvalidLineNumber`]: ../error/enum.ErrorKind.html#variant.InvalidLineNumber
    /// [`SIGNATURE`]: ./constant.SIGNATURE.html
    pub fn parse(line: &str) -> Result<TraceRecord> {
        ensure!(is_marker(line), ErrorKind::NotAMarker(line.to_owned()));

        let fields = line.split(FIELD_SEPARATOR).collect::<Vec<_>>();
        ensure!(fields.len() >= MIN_FIELDS, ErrorKind::TooFewFields(line.to_owned(), fields.len()));

        let raw_line = fields[3].trim();
        let raw_line = match raw_line.parse::<i64>() {
            Ok(n) => n,
            Err(_) => bail!(ErrorKind::InvalidLineNumber(line.to_owned(), raw_line.to_owned())),
        };

        let attr = fields[MIN_FIELDS..].iter().fold(TraceAttr::empty(), |attr, field| attr | TraceAttr::from_field(field));

        Ok(TraceRecord {
            file: fields[1].to_owned(),
            function: fields[2].to_owned(),
            line: raw_line.saturating_sub(1), // 0-indexed
            attr,
        })
    }
}

impl FromStr for TraceRecord {
    type Err = Error;
    fn from_str(s: &str) -> Result<TraceRecord> {
        TraceRecord::parse(s)
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Trace(file={},func={},line={})", self.file, self.function, self.line)
    }
}

/// Checks whether a log line is a marker.
pub fn is_marker(line: &str) -> bool {
    line.starts_with(SIGNATURE)
}

/// Iterator over the markers of a whole log.
///
/// Every marker line yields one item, in log order. Non-marker lines are skipped. A malformed marker yields an
/// [`MalformedMarker`] error with the 1-based log line, caused by the decoding error. An `Err` item does not stop the
/// iteration, so callers may keep going past a malformed marker if they wish.
///
/// [`MalformedMarker`]: ../error/enum.ErrorKind.html#variant.MalformedMarker
///
/// # Examples
///
/// ```rust
/// use ccov::trace::Traces;
///
/// let log = "hello\n#CCOV:foo.c:main:3\n#CCOV:foo.c:main\n";
/// let (good, bad): (Vec<_>, Vec<_>) = Traces::new(log).partition(Result::is_ok);
/// assert_eq!(good.len(), 1);
/// assert_eq!(bad.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Traces<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl<'a> Traces<'a> {
    /// Creates an iterator over the markers in `text`.
    pub fn new(text: &'a str) -> Traces<'a> {
        Traces {
            lines: text.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for Traces<'a> {
    type Item = Result<TraceRecord>;

    fn next(&mut self) -> Option<Result<TraceRecord>> {
        for (index, line) in &mut self.lines {
            if is_marker(line) {
                let res = TraceRecord::parse(line).chain_err(|| ErrorKind::MalformedMarker(index + 1));
                if let Ok(ref record) = res {
                    trace!("{}: {}", index + 1, record);
                }
                return Some(res);
            }
        }
        None
    }
}

/// Parses all markers in a log, stopping at the first malformed one.
pub fn parse_traces(text: &str) -> Result<Vec<TraceRecord>> {
    let traces = Traces::new(text).collect::<Result<Vec<_>>>()?;
    debug!("parsed {} traces", traces.len());
    Ok(traces)
}

/// Collects the distinct source files referenced by `traces`.
pub fn referenced_files<'a, I>(traces: I) -> BTreeSet<&'a str>
where
    I: IntoIterator<Item = &'a TraceRecord>,
{
    traces.into_iter().map(|t| &*t.file).collect()
}

//----------------------------------------------------------------------------------------------------------------------

#[cfg(test)]
fn record(file: &str, function: &str, line: i64, attr: TraceAttr) -> TraceRecord {
    TraceRecord {
        file: file.to_owned(),
        function: function.to_owned(),
        line,
        attr,
    }
}

#[test]
fn test_parse_marker() {
    assert_eq!(TraceRecord::parse("#CCOV:foo.c:main:3\n").unwrap(), record("foo.c", "main", 2, TraceAttr::empty()));
    assert_eq!(TraceRecord::parse("#CCOV:src/a/b.c:helper:1").unwrap(), record("src/a/b.c", "helper", 0, TraceAttr::empty()));
    assert_eq!("#CCOV:x.c:f:10".parse::<TraceRecord>().unwrap().line, 9);
}

#[test]
fn test_parse_attributes() {
    assert_eq!(TraceRecord::parse("#CCOV:foo.c:main:3:entry\n").unwrap().attr, TraceAttr::ENTRY);
    assert_eq!(TraceRecord::parse("#CCOV:foo.c:main:7:ret\n").unwrap().attr, TraceAttr::RET);
    assert_eq!(TraceRecord::parse("#CCOV:foo.c:main:3:entry:ret\n").unwrap().attr, TraceAttr::ENTRY | TraceAttr::RET);
    let r = TraceRecord::parse("#CCOV:foo.c:main:3:whatever:1:2").unwrap();
    assert_eq!(r.attr, TraceAttr::empty());
    assert_eq!(r.line, 2);
}

#[test]
fn test_parse_nonpositive_line() {
    assert_eq!(TraceRecord::parse("#CCOV:foo.c:main:0").unwrap().line, -1);
    assert_eq!(TraceRecord::parse("#CCOV:foo.c:main:-4").unwrap().line, -5);
}

#[test]
fn test_parse_malformed() {
    match *TraceRecord::parse("noise #CCOV:foo.c:main:3").unwrap_err().kind() {
        ErrorKind::NotAMarker(_) => {},
        ref kind => panic!("unexpected {:?}", kind),
    }
    match *TraceRecord::parse("#CCOV:foo.c:main\n").unwrap_err().kind() {
        ErrorKind::TooFewFields(_, 3) => {},
        ref kind => panic!("unexpected {:?}", kind),
    }
    match *TraceRecord::parse("#CCOV:foo.c:main:three\n").unwrap_err().kind() {
        ErrorKind::InvalidLineNumber(_, ref field) => assert_eq!(field, "three"),
        ref kind => panic!("unexpected {:?}", kind),
    }
    match *TraceRecord::parse("#CCOV:foo.c:main:\n").unwrap_err().kind() {
        ErrorKind::InvalidLineNumber(_, ref field) => assert_eq!(field, ""),
        ref kind => panic!("unexpected {:?}", kind),
    }
}

#[test]
fn test_traces_filter_and_order() {
    let log = "noise line\n#CCOV:foo.c:main:3\nmore noise #CCOV:foo.c:main:9\n#CCOV:bar.c:f:1:entry\n#CCOV:foo.c:main:3\n";
    let traces = parse_traces(log).unwrap();
    assert_eq!(
        traces,
        vec![
            record("foo.c", "main", 2, TraceAttr::empty()),
            record("bar.c", "f", 0, TraceAttr::ENTRY),
            record("foo.c", "main", 2, TraceAttr::empty()),
        ]
    );
}

#[test]
fn test_traces_empty_log() {
    assert!(parse_traces("").unwrap().is_empty());
    assert!(parse_traces("just\nsome\noutput\n").unwrap().is_empty());
}

#[test]
fn test_parse_traces_aborts_on_malformed() {
    let log = "#CCOV:foo.c:main:3\n#CCOV:foo.c\n#CCOV:foo.c:main:1\n";
    let err = parse_traces(log).unwrap_err();
    match *err.kind() {
        ErrorKind::MalformedMarker(2) => {},
        ref kind => panic!("unexpected {:?}", kind),
    }
    let causes = err.iter().map(|e| e.to_string()).collect::<Vec<_>>();
    assert_eq!(
        causes,
        vec![
            "malformed trace marker at log line 2",
            "unexpected number of tokens, expecting at least 4 fields, found 2 in \"#CCOV:foo.c\"",
        ]
    );

    // The iterator itself keeps going.
    let lenient = Traces::new(log).filter_map(|r| r.ok()).collect::<Vec<_>>();
    assert_eq!(lenient.len(), 2);
    assert_eq!(lenient[1].line, 0);
}

#[test]
fn test_malformed_marker_log_line() {
    let log = "starting\r\nstill starting\r\n#CCOV:foo.c:main:x\r\n";
    let err = parse_traces(log).unwrap_err();
    assert_eq!(err.to_string(), "malformed trace marker at log line 3");
    assert_eq!(err.iter().nth(1).unwrap().to_string(), "invalid line number \"x\" in \"#CCOV:foo.c:main:x\"");
}

#[test]
fn test_referenced_files() {
    let traces = parse_traces("#CCOV:b.c:f:1\n#CCOV:a.c:g:2\n#CCOV:b.c:h:3\n").unwrap();
    let files = referenced_files(&traces);
    assert_eq!(files.into_iter().collect::<Vec<_>>(), vec!["a.c", "b.c"]);
}

#[test]
fn test_display() {
    let r = TraceRecord::parse("#CCOV:foo.c:main:3").unwrap();
    assert_eq!(r.to_string(), "Trace(file=foo.c,func=main,line=2)");
}
