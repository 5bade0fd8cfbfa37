//! `ccov` decodes the `#CCOV` coverage markers printed by an instrumented program, and pairs every marker with the
//! source line it points to.
//!
//! ```rust
//! use ccov::{SourceTable, parse_traces, render_to_string};
//!
//! let traces = parse_traces("starting\n#CCOV:fib.c:fib:2\n#CCOV:fib.c:fib:1:entry\n").unwrap();
//! let sources = SourceTable::from_sources(vec![("fib.c", "int fib(int n) {\n    return n;\n}\n")]);
//! let report = render_to_string(&traces, &sources).unwrap();
//! assert_eq!(report, "     1|     1|    return n;\n     2|     0|int fib(int n) {\n");
//! ```

#![recursion_limit="128"] // needed for error_chain.

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;
#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg(feature = "serde_json")]
extern crate serde_json;

mod utils;
pub mod error;
pub mod trace;
pub mod source;
pub mod report;

pub use error::{ErrorKind, Result};
pub use report::{render, render_to_string};
pub use source::SourceTable;
pub use trace::{TraceAttr, TraceRecord, Traces, parse_traces};
pub use utils::{IntoStringLossy, read_to_string_lossy};
