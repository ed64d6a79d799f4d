//! Reader access layer
//!
//! Wraps the native reader library behind a narrow interface. Device
//! discovery (environment override, configuration files, auto-detection)
//! stays inside the library.

pub mod error;
#[cfg(feature = "libnfc")]
pub mod libnfc;

pub use error::{Error, Result};
#[cfg(feature = "libnfc")]
pub use libnfc::LibNfc;

use nfcid_core::{Modulation, Target};

/// Reader-access collaborator
///
/// Every call is blocking and returns before the next one starts.
pub trait Backend: Send {
    /// Initialize the library context
    fn init(&mut self) -> Result<()>;

    /// Tear down the library context
    fn exit(&mut self);

    /// Open a device and return its name
    ///
    /// `None` lets the library pick the first available device.
    fn open(&mut self, connstring: Option<&str>) -> Result<Option<String>>;

    /// Switch the open device into initiator mode
    fn initiator_init(&mut self) -> Result<()>;

    /// Make exactly one passive poll with the given modulation
    ///
    /// Returns `Ok(None)` when no tag answered.
    fn select_passive_target(&mut self, modulation: Modulation) -> Result<Option<Target>>;

    /// Close the open device
    fn close(&mut self);
}
