//! Backend errors

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to initialize reader library context")]
    ContextInit,

    #[error("Unable to open NFC device: {0}")]
    DeviceNotFound(String),

    #[error("Invalid connection string: {0}")]
    InvalidConnstring(String),

    #[error("Unable to enter initiator mode: {0}")]
    InitiatorMode(String),

    #[error("Unsupported modulation: {0}")]
    UnsupportedModulation(String),

    #[error("Reader library context not initialized")]
    NoContext,

    #[error("No device open")]
    NoDevice,

    #[error("Already open")]
    AlreadyOpen,
}
