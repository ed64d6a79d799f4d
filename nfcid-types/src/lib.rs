//! Type definitions for nfcid

pub mod config;
pub mod error;
pub mod reader_info;

pub use config::Config;
pub use error::{Error, Result};
pub use reader_info::ReaderInfo;
