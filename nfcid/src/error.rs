//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reader initialization failed: {0}")]
    Init(#[source] nfcid_backend::Error),

    #[error("Reader device error: {0}")]
    Device(#[source] nfcid_backend::Error),

    #[error("Reader not open")]
    NotOpen,

    #[error("Reader already open")]
    AlreadyOpen,

    #[error("Core error: {0}")]
    Core(#[from] nfcid_core::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] nfcid_types::Error),

    #[error("Reader task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl Error {
    /// Check if the reader needs to be (re)opened before the next call
    pub fn requires_open(&self) -> bool {
        matches!(self, Self::NotOpen | Self::Init(_))
    }
}
