//! # nfcid-core
//!
//! Core primitives for reading NFC card identifiers.
//!
//! This crate provides the pieces that do not touch hardware:
//! - Card identifiers and their bounded hex rendering
//! - Modulation descriptors used when polling
//! - Metadata of a detected target
//! - The open/closed session state machine

pub mod constants;
pub mod error;
pub mod modulation;
pub mod session;
pub mod target;
pub mod uid;

pub use error::{Error, Result};
pub use modulation::{BaudRate, Modulation, ModulationType};
pub use session::{Session, SessionState};
pub use target::Target;
pub use uid::{render_hex, Uid};
