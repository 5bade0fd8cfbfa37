//! Errors related to the `ccov` crate.
//!
//! Please see documentation of the [`error-chain` crate](https://docs.rs/error-chain/0.12.0/error_chain/) for detailed
//! usage.

use std::io;

error_chain! {
    foreign_links {
        Io(io::Error) /** Wrapper of standard I/O error. */;
        Json(::serde_json::Error) #[cfg(feature="serde_json")] /** Wrapper of JSON error. */;
    }

    errors {
        /// A marker line of the log cannot be decoded. The cause tells what is wrong with it.
        MalformedMarker(log_line: usize) {
            description("malformed trace marker")
            display("malformed trace marker at log line {}", log_line)
        }

        /// A trace cannot be paired with its source line. The cause tells which lookup failed.
        UnresolvedTrace(index: usize, trace: String) {
            description("cannot resolve trace")
            display("cannot resolve trace #{} {}", index, trace)
        }

        /// A line handed to the marker decoder does not start with the `#CCOV` signature.
        NotAMarker(line: String) {
            description("invalid trace format")
            display("invalid trace format, line does not start with the #CCOV signature: {:?}", line)
        }

        /// A marker line has fewer than the 4 colon-separated fields `#CCOV:file:function:line`.
        TooFewFields(line: String, count: usize) {
            description("unexpected number of tokens")
            display("unexpected number of tokens, expecting at least 4 fields, found {} in {:?}", count, line)
        }

        /// The line number field of a marker is not an integer.
        InvalidLineNumber(line: String, field: String) {
            description("invalid line number")
            display("invalid line number {:?} in {:?}", field, line)
        }

        /// A source file referenced by a marker does not exist under the source root.
        SourceFileMissing(path: String) {
            description("source file not found")
            display("source file `{}` not found", path)
        }

        /// A trace refers to a file which has not been loaded into the [`SourceTable`].
        ///
        /// [`SourceTable`]: ../source/struct.SourceTable.html
        MissingSource(file: String) {
            description("source not loaded")
            display("source `{}` has not been loaded", file)
        }

        /// The 0-indexed line of a trace is negative or beyond the end of its source file.
        LineOutOfRange(file: String, line: i64, count: usize) {
            description("line out of range")
            display("line {} is out of range for `{}`, which has {} lines", line, file, count)
        }
    }
}
