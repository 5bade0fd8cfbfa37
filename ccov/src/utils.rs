//! Additional methods for libstd.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Adds the `into_string_lossy` method to `Vec<u8>`.
pub trait IntoStringLossy {
    /// Consumes the ownership and converts the string-like object into a real string. Unconvertible characters are
    /// replaced by U+FFFD.
    fn into_string_lossy(self) -> String;
}

impl IntoStringLossy for Vec<u8> {
    fn into_string_lossy(self) -> String {
        String::from_utf8(self).unwrap_or_else(|e| String::from_utf8_lossy(&e.into_bytes()).into_owned())
    }
}

/// Reads the whole file at `path` as text. Invalid UTF-8 sequences are replaced by U+FFFD.
///
/// The file is closed before returning.
pub fn read_to_string_lossy<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes.into_string_lossy())
}

#[test]
fn test_into_string_lossy() {
    assert_eq!(b"int main() {}\n".to_vec().into_string_lossy(), "int main() {}\n");
    assert_eq!(b"a\xffb".to_vec().into_string_lossy(), "a\u{fffd}b");
}
