//! Modulation descriptors
//!
//! A poll is parameterized by a modulation type and a baud rate. Numeric
//! codes match the wrapped reader library's enumerations.

use std::fmt;

use crate::error::{Error, Result};

/// Tag family / modulation type
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ModulationType {
    Iso14443a = 1,
    Jewel = 2,
    Iso14443b = 3,
    Iso14443bi = 4,
    Iso14443b2sr = 5,
    Iso14443b2ct = 6,
    Felica = 7,
    Dep = 8,
    Barcode = 9,
    Iso14443biClass = 10,
}

impl ModulationType {
    /// Numeric code understood by the reader library
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Get modulation type name
    pub fn name(self) -> &'static str {
        match self {
            Self::Iso14443a => "ISO/IEC 14443A",
            Self::Jewel => "Innovision Jewel",
            Self::Iso14443b => "ISO/IEC 14443-4B",
            Self::Iso14443bi => "ISO/IEC 14443-4B'",
            Self::Iso14443b2sr => "ISO/IEC 14443-2B ST SRx",
            Self::Iso14443b2ct => "ISO/IEC 14443-2B ASK CTx",
            Self::Felica => "FeliCa",
            Self::Dep => "D.E.P.",
            Self::Barcode => "Thinfilm NFC Barcode",
            Self::Iso14443biClass => "ISO/IEC 14443-2B-3B iClass",
        }
    }
}

impl TryFrom<u32> for ModulationType {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Self::Iso14443a),
            2 => Ok(Self::Jewel),
            3 => Ok(Self::Iso14443b),
            4 => Ok(Self::Iso14443bi),
            5 => Ok(Self::Iso14443b2sr),
            6 => Ok(Self::Iso14443b2ct),
            7 => Ok(Self::Felica),
            8 => Ok(Self::Dep),
            9 => Ok(Self::Barcode),
            10 => Ok(Self::Iso14443biClass),
            _ => Err(Error::UnknownModulationType(value)),
        }
    }
}

impl fmt::Display for ModulationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Communication bit rate
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BaudRate {
    Undefined = 0,
    Kbps106 = 1,
    Kbps212 = 2,
    Kbps424 = 3,
    Kbps847 = 4,
}

impl BaudRate {
    /// Numeric code understood by the reader library
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Rate in kbit/s, `None` when undefined
    pub fn kbps(self) -> Option<u32> {
        match self {
            Self::Undefined => None,
            Self::Kbps106 => Some(106),
            Self::Kbps212 => Some(212),
            Self::Kbps424 => Some(424),
            Self::Kbps847 => Some(847),
        }
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::Undefined),
            1 => Ok(Self::Kbps106),
            2 => Ok(Self::Kbps212),
            3 => Ok(Self::Kbps424),
            4 => Ok(Self::Kbps847),
            _ => Err(Error::UnknownBaudRate(value)),
        }
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kbps() {
            Some(kbps) => write!(f, "{} kbps", kbps),
            None => f.write_str("undefined"),
        }
    }
}

/// Modulation used for a single passive poll
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Modulation {
    pub kind: ModulationType,
    pub baud_rate: BaudRate,
}

impl Modulation {
    /// ISO14443A (MIFARE) at 106 kbps, the default polling profile
    pub const ISO14443A_106: Self = Self::new(ModulationType::Iso14443a, BaudRate::Kbps106);

    pub const fn new(kind: ModulationType, baud_rate: BaudRate) -> Self {
        Self { kind, baud_rate }
    }

    /// Check if a poll with this modulation yields a readable identifier
    ///
    /// Only ISO14443A, ISO14443B and FeliCa targets carry an identifier the
    /// reader decodes, and the baud rate must be set.
    pub fn is_supported(self) -> bool {
        matches!(
            self.kind,
            ModulationType::Iso14443a | ModulationType::Iso14443b | ModulationType::Felica
        ) && self.baud_rate != BaudRate::Undefined
    }
}

impl Default for Modulation {
    fn default() -> Self {
        Self::ISO14443A_106
    }
}

impl fmt::Display for Modulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.baud_rate)
    }
}
