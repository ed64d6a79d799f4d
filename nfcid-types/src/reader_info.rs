//! Reader information structures

use std::fmt;

/// Information about an opened reader
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReaderInfo {
    /// Device name reported by the reader library
    pub name: Option<String>,

    /// Connection string the reader was opened with, `None` when the
    /// library picked the device
    pub connstring: Option<String>,
}

impl ReaderInfo {
    pub fn new(name: Option<String>, connstring: Option<String>) -> Self {
        Self { name, connstring }
    }
}

impl fmt::Display for ReaderInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reader[{}, {}]",
            self.name.as_deref().unwrap_or("unnamed"),
            self.connstring.as_deref().unwrap_or("auto")
        )
    }
}
