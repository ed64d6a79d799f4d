//! Error types for nfcid-core



/// Result type alias for nfcid-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Session transition not allowed from the current state
    #[error("Invalid session state: {0}")]
    InvalidSessionState(String),

    /// Unknown modulation type code
    #[error("Unknown modulation type: {0}")]
    UnknownModulationType(u32),

    /// Unknown baud rate code
    #[error("Unknown baud rate: {0}")]
    UnknownBaudRate(u32),
}
