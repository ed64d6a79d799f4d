//! # nfcid
//!
//! Read NFC card identifiers through a native reader library.
//!
//! ## Features
//!
//! - One reader session with `open`, `poll_for_id`, `close`
//! - Typed errors instead of process exits
//! - Lock-guarded and async handles for concurrent hosts
//! - libnfc backend behind the `libnfc` feature
//!
//! ## Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "libnfc")]
//! # fn main() -> nfcid::Result<()> {
//! use nfcid::Reader;
//!
//! let mut reader = Reader::libnfc();
//! reader.open()?;
//!
//! if let Some(id) = reader.poll_for_id()? {
//!     println!("Card: {}", id);
//! }
//!
//! reader.close()?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "libnfc"))]
//! # fn main() {}
//! ```

pub mod async_reader;
pub mod error;
pub mod reader;
pub mod shared;

// Re-exports
pub use async_reader::AsyncReader;
pub use error::{Error, Result};
pub use reader::Reader;
pub use shared::SharedReader;

// Re-export types
pub use nfcid_backend::Backend;
#[cfg(feature = "libnfc")]
pub use nfcid_backend::LibNfc;
pub use nfcid_core::{BaudRate, Modulation, ModulationType, SessionState, Target, Uid};
pub use nfcid_types::{Config, ReaderInfo};
