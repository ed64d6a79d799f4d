//! Reader configuration

use nfcid_core::constants::{env, DEFAULT_UID_LIMIT};
use nfcid_core::Modulation;

use crate::error::{Error, Result};

/// Reader configuration
///
/// Which device gets opened is normally left to the reader library. An
/// explicit connection string overrides that choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    connstring: Option<String>,
    modulation: Modulation,
    uid_limit: Option<usize>,
}

impl Config {
    /// Create the default configuration
    pub fn new() -> Self {
        Self {
            connstring: None,
            modulation: Modulation::ISO14443A_106,
            uid_limit: Some(DEFAULT_UID_LIMIT),
        }
    }

    /// Load configuration from the process environment
    ///
    /// Reads `NFCID_DEVICE` and `NFCID_UID_LIMIT`. Unset variables keep their
    /// defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(device) = lookup(env::DEVICE) {
            let device = device.trim();
            if !device.is_empty() {
                config = config.with_connstring(device);
            }
        }

        if let Some(limit) = lookup(env::UID_LIMIT) {
            config = config.with_uid_limit(parse_uid_limit(&limit)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Open this device instead of letting the library choose
    pub fn with_connstring(mut self, connstring: impl Into<String>) -> Self {
        self.connstring = Some(connstring.into());
        self
    }

    /// Poll with a different modulation
    pub fn with_modulation(mut self, modulation: Modulation) -> Self {
        self.modulation = modulation;
        self
    }

    /// Set how many UID bytes are rendered, `None` for all of them
    pub fn with_uid_limit(mut self, limit: Option<usize>) -> Self {
        self.uid_limit = limit;
        self
    }

    pub fn connstring(&self) -> Option<&str> {
        self.connstring.as_deref()
    }

    pub fn modulation(&self) -> Modulation {
        self.modulation
    }

    pub fn uid_limit(&self) -> Option<usize> {
        self.uid_limit
    }

    /// Check values that the builder cannot rule out
    pub fn validate(&self) -> Result<()> {
        if self.uid_limit == Some(0) {
            return Err(Error::Validation("UID limit must be at least 1 byte".into()));
        }

        if !self.modulation.is_supported() {
            return Err(Error::Validation(format!(
                "cannot read identifiers with modulation {}",
                self.modulation
            )));
        }

        if let Some(connstring) = &self.connstring {
            if connstring.contains('\0') {
                return Err(Error::Validation(
                    "connection string must not contain NUL bytes".into(),
                ));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_uid_limit(value: &str) -> Result<Option<usize>> {
    let value = value.trim();

    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    value
        .parse::<usize>()
        .map(Some)
        .map_err(|e| Error::Parse(format!("{}={:?}: {}", env::UID_LIMIT, value, e)))
}
