//! Card identifiers
//!
//! A UID is the byte sequence a tag reports when it answers a poll. Hosts
//! receive it as a lowercase hex string, two characters per byte.

use std::fmt;

use tracing::warn;

/// Identifier reported by a detected tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Uid(Vec<u8>);

impl Uid {
    /// Create a UID from raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw identifier bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of identifier bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the identifier is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the whole identifier as lowercase hex
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Render at most `limit` bytes as lowercase hex
    ///
    /// `None` renders every byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use nfcid_core::Uid;
    ///
    /// let uid = Uid::new(vec![0xDE, 0xAD, 0xBE, 0xEF]);
    /// assert_eq!(uid.render(Some(10)), "deadbeef");
    /// assert_eq!(uid.render(Some(2)), "dead");
    /// ```
    pub fn render(&self, limit: Option<usize>) -> String {
        render_hex(&self.0, limit)
    }
}

/// Render bytes as lowercase hex, keeping at most `limit` source bytes
///
/// The output is always `2 * min(len, limit)` characters from `0-9a-f`.
pub fn render_hex(bytes: &[u8], limit: Option<usize>) -> String {
    let shown = match limit {
        Some(limit) if bytes.len() > limit => {
            warn!(
                uid_len = bytes.len(),
                limit = limit,
                "Identifier longer than rendering limit, truncating"
            );
            &bytes[..limit]
        }
        _ => bytes,
    };

    hex::encode(shown)
}

impl From<Vec<u8>> for Uid {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Uid {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Uid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
