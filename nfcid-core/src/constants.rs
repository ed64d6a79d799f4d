//! Reader constants

/// Longest UID an ISO14443A tag reports (triple-size UID)
pub const MAX_UID_LEN: usize = 10;

/// Number of UID bytes rendered by default.
///
/// Matches the UID buffer of the wrapped reader library. Longer identifiers
/// from other tag families are cut to this many bytes unless the limit is
/// lifted in the configuration.
pub const DEFAULT_UID_LIMIT: usize = MAX_UID_LEN;

/// Longest answer-to-select an ISO14443A tag may report
pub const MAX_ATS_LEN: usize = 254;

/// Environment variables read by the configuration loader
pub mod env {
    /// Explicit device connection string, e.g. `pn532_uart:/dev/ttyUSB0`
    pub const DEVICE: &str = "NFCID_DEVICE";

    /// UID rendering limit in bytes, or `none`
    pub const UID_LIMIT: &str = "NFCID_UID_LIMIT";
}
