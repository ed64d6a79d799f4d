//! Detected target metadata

use std::fmt;

use crate::modulation::Modulation;
use crate::uid::Uid;

/// A tag that answered a passive poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Modulation the tag answered on
    pub modulation: Modulation,

    /// Tag identifier
    pub uid: Uid,

    /// Answer to request (ATQA)
    pub atqa: [u8; 2],

    /// Select acknowledge (SAK)
    pub sak: u8,

    /// Answer to select (ATS), empty when the tag sent none
    pub ats: Vec<u8>,
}

impl Target {
    pub fn new(modulation: Modulation, uid: impl Into<Uid>) -> Self {
        Self {
            modulation,
            uid: uid.into(),
            atqa: [0; 2],
            sak: 0,
            ats: Vec::new(),
        }
    }

    /// Set ATQA and SAK
    pub fn with_selection(mut self, atqa: [u8; 2], sak: u8) -> Self {
        self.atqa = atqa;
        self.sak = sak;
        self
    }

    /// Set answer to select
    pub fn with_ats(mut self, ats: impl Into<Vec<u8>>) -> Self {
        self.ats = ats.into();
        self
    }

    /// Check if the tag is ISO14443-4 compliant (SAK bit 6)
    pub fn is_iso14443_4(&self) -> bool {
        self.sak & 0x20 != 0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Target[{}, UID: {}, ATQA: {}, SAK: {:02x}]",
            self.modulation,
            self.uid,
            hex::encode(self.atqa),
            self.sak
        )
    }
}
