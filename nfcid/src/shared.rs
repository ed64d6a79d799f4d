//! Lock-guarded reader for concurrent hosts
//!
//! A reader cannot serve two logical sessions at once, so every operation
//! takes the lock for its whole duration.

use std::sync::Arc;

use parking_lot::Mutex;

use nfcid_core::Target;

use crate::error::Result;
use crate::reader::Reader;

/// Reader shared between threads
///
/// Cloning is cheap and every clone talks to the same device. Exposes the
/// host surface `open`, `getid`, `close`.
#[derive(Clone)]
pub struct SharedReader {
    inner: Arc<Mutex<Reader>>,
}

impl SharedReader {
    pub fn new(reader: Reader) -> Self {
        Self {
            inner: Arc::new(Mutex::new(reader)),
        }
    }

    /// Open the reader
    pub fn open(&self) -> Result<()> {
        self.inner.lock().open()
    }

    /// Poll once for a card identifier
    pub fn getid(&self) -> Result<Option<String>> {
        self.inner.lock().poll_for_id()
    }

    /// Close the reader
    pub fn close(&self) -> Result<()> {
        self.inner.lock().close()
    }

    /// Check if open
    pub fn is_open(&self) -> bool {
        self.inner.lock().is_open()
    }

    /// Copy of the target reported by the most recent poll
    pub fn last_target(&self) -> Option<Target> {
        self.inner.lock().last_target().cloned()
    }

    /// Run `f` with exclusive access to the reader
    pub fn with_reader<T>(&self, f: impl FnOnce(&mut Reader) -> T) -> T {
        f(&mut *self.inner.lock())
    }
}

impl From<Reader> for SharedReader {
    fn from(reader: Reader) -> Self {
        Self::new(reader)
    }
}
