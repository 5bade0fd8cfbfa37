//! Source files referenced by the traces.
//!
//! Only the files actually named by a marker are loaded. Each file is read in full and split into lines, keeping the
//! line terminators so that the [`report`] module decides how they are printed.
//!
//! [`report`]: ../report/index.html

use error::*;
use trace::{TraceRecord, referenced_files};
use utils::read_to_string_lossy;

use std::collections::HashMap;
use std::io;
use std::path::Path;

/// Splits `text` into lines. Every line retains its `\n` terminator, and a last line without one is kept as-is.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_owned).collect()
}

/// Loaded source code, indexed by the file name as it appears in the markers.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SourceTable {
    sources: HashMap<String, Vec<String>>,
}

impl SourceTable {
    /// Loads every file in `files` from the directory `root`.
    ///
    /// # Errors
    ///
    /// * Returns [`SourceFileMissing`] if `root/file` does not exist.
    /// * Returns [`Io`] if the file cannot be read for any other reason.
    ///
    /// [`SourceFileMissing`]: ../error/enum.ErrorKind.html#variant.SourceFileMissing
    /// [`Io`]: ../error/enum.ErrorKind.html#variant.Io
    pub fn load<'a, I>(root: &Path, files: I) -> Result<SourceTable>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sources: HashMap<String, Vec<String>> = HashMap::new();
        for file in files {
            if sources.contains_key(file) {
                continue;
            }
            let path = root.join(file);
            let text = match read_to_string_lossy(&path) {
                Ok(text) => text,
                Err(ref e) if e.kind() == io::ErrorKind::NotFound => bail!(ErrorKind::SourceFileMissing(path.display().to_string())),
                Err(e) => return Err(e).chain_err(|| format!("Cannot read source file `{}`", path.display())),
            };
            let lines = split_lines(&text);
            debug!("loaded {:?}, {} lines", path, lines.len());
            sources.insert(file.to_owned(), lines);
        }
        Ok(SourceTable { sources })
    }

    /// Loads all files referenced by `traces` from the directory `root`.
    pub fn load_for(root: &Path, traces: &[TraceRecord]) -> Result<SourceTable> {
        SourceTable::load(root, referenced_files(traces))
    }

    /// Creates a table from source code already in memory.
    pub fn from_sources<I, K, V>(sources: I) -> SourceTable
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        SourceTable {
            sources: sources.into_iter().map(|(file, text)| (file.into(), split_lines(text.as_ref()))).collect(),
        }
    }

    /// Number of files in the table.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the table has no files.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Names of the loaded files, in unspecified order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(|k| &**k)
    }

    /// Gets all lines of a file.
    ///
    /// # Errors
    ///
    /// Returns [`MissingSource`] if the file has not been loaded.
    ///
    /// [`MissingSource`]: ../error/enum.ErrorKind.html#variant.MissingSource
    pub fn lines(&self, file: &str) -> Result<&[String]> {
        match self.sources.get(file) {
            Some(lines) => Ok(&lines[..]),
            None => bail!(ErrorKind::MissingSource(file.to_owned())),
        }
    }

    /// Gets a line of a file, including its terminator. `line` is 0-indexed.
    ///
    /// # Errors
    ///
    /// * Returns [`MissingSource`] if the file has not been loaded.
    /// * Returns [`LineOutOfRange`] if `line` is negative or not less than the number of lines.
    ///
    /// [`MissingSource`]: ../error/enum.ErrorKind.html#variant.MissingSource
    /// [`LineOutOfRange`]: ../error/enum.ErrorKind.html#variant.LineOutOfRange
    pub fn line(&self, file: &str, line: i64) -> Result<&str> {
        let lines = self.lines(file)?;
        if line < 0 || line as u64 >= lines.len() as u64 {
            bail!(ErrorKind::LineOutOfRange(file.to_owned(), line, lines.len()));
        }
        Ok(lines[line as usize].as_str())
    }
}

//----------------------------------------------------------------------------------------------------------------------

#[cfg(test)]
fn test_data_root() -> ::std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data/basic/src")
}

#[test]
fn test_split_lines() {
    assert_eq!(split_lines("A\nB\nC\n"), vec!["A\n", "B\n", "C\n"]);
    assert_eq!(split_lines("A\nB"), vec!["A\n", "B"]);
    assert_eq!(split_lines("A\r\n\nB\n"), vec!["A\r\n", "\n", "B\n"]);
    assert_eq!(split_lines("\n"), vec!["\n"]);
    assert_eq!(split_lines("A\rB\n"), vec!["A\rB\n"]);
    assert!(split_lines("").is_empty());
}

#[test]
fn test_line_lookup() {
    let table = SourceTable::from_sources(vec![("foo.c", "A\nB\nC\n")]);
    assert_eq!(table.len(), 1);
    assert!(!table.is_empty());
    assert!(SourceTable::default().is_empty());
    assert_eq!(table.line("foo.c", 0).unwrap(), "A\n");
    assert_eq!(table.line("foo.c", 2).unwrap(), "C\n");
    match *table.line("foo.c", 3).unwrap_err().kind() {
        ErrorKind::LineOutOfRange(_, 3, 3) => {},
        ref kind => panic!("unexpected {:?}", kind),
    }
    match *table.line("foo.c", -1).unwrap_err().kind() {
        ErrorKind::LineOutOfRange(_, -1, 3) => {},
        ref kind => panic!("unexpected {:?}", kind),
    }
    match *table.line("bar.c", 0).unwrap_err().kind() {
        ErrorKind::MissingSource(ref file) => assert_eq!(file, "bar.c"),
        ref kind => panic!("unexpected {:?}", kind),
    }
}

#[test]
fn test_load_only_referenced() {
    let traces = ::trace::parse_traces("#CCOV:foo.c:main:3\n#CCOV:foo.c:main:1\n#CCOV:lib/util.c:add:2\n").unwrap();
    let table = SourceTable::load_for(&test_data_root(), &traces).unwrap();
    let mut files = table.files().collect::<Vec<_>>();
    files.sort();
    assert_eq!(files, vec!["foo.c", "lib/util.c"]);
    assert_eq!(table.lines("foo.c").unwrap().len(), 3);
}

#[test]
fn test_load_missing_file() {
    let err = SourceTable::load(&test_data_root(), vec!["foo.c", "does-not-exist.c"]).unwrap_err();
    match *err.kind() {
        ErrorKind::SourceFileMissing(ref path) => assert!(path.ends_with("does-not-exist.c")),
        ref kind => panic!("unexpected {:?}", kind),
    }
}
