//! Session state for a reader
//!
//! A session tracks whether a reader handle is held and remembers the last
//! target a poll reported. One reader serves one session at a time.

use crate::error::{Error, Result};
use crate::target::Target;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No reader handle held
    Closed,

    /// Reader opened and in initiator mode
    Open,
}

/// Session tracker
///
/// `Closed --open--> Open --close--> Closed`. Polls are only valid while open.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    last_target: Option<Target>,
}

impl Session {
    /// Create a new closed session
    pub fn new() -> Self {
        Self {
            state: SessionState::Closed,
            last_target: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if open
    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open)
    }

    /// Mark session as open
    pub fn open(&mut self) -> Result<()> {
        if self.state != SessionState::Closed {
            return Err(Error::InvalidSessionState(format!(
                "Cannot open from state: {:?}",
                self.state
            )));
        }

        self.state = SessionState::Open;
        self.last_target = None;
        Ok(())
    }

    /// Close session
    ///
    /// Returns `true` if the session was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = SessionState::Closed;
        self.last_target = None;
        was_open
    }

    /// Replace the last detected target
    pub fn record(&mut self, target: Option<Target>) -> Result<()> {
        if !self.is_open() {
            return Err(Error::InvalidSessionState(
                "Cannot record a poll result on a closed session".into(),
            ));
        }

        self.last_target = target;
        Ok(())
    }

    /// Target reported by the most recent poll, if any
    pub fn last_target(&self) -> Option<&Target> {
        self.last_target.as_ref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
