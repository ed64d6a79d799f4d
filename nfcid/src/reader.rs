//! Reader session

use tracing::{debug, info, trace, warn};

use nfcid_backend::Backend;
use nfcid_core::{Session, SessionState, Target};
use nfcid_types::{Config, ReaderInfo};

use crate::error::{Error, Result};

/// NFC reader session
///
/// Owns one reader-access backend and at most one open device.
///
/// # Examples
///
/// ```no_run
/// # #[cfg(feature = "libnfc")]
/// # fn main() -> nfcid::Result<()> {
/// use nfcid::Reader;
///
/// let mut reader = Reader::libnfc();
/// reader.open()?;
///
/// match reader.poll_for_id()? {
///     Some(id) => println!("Card: {}", id),
///     None => println!("No card"),
/// }
///
/// reader.close()?;
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "libnfc"))]
/// # fn main() {}
/// ```
pub struct Reader {
    backend: Box<dyn Backend>,
    session: Session,
    config: Config,
    info: Option<ReaderInfo>,
}

impl Reader {
    /// Create a closed reader on top of a backend
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            session: Session::new(),
            config: Config::default(),
            info: None,
        }
    }

    /// Create a closed reader using libnfc
    #[cfg(feature = "libnfc")]
    pub fn libnfc() -> Self {
        Self::new(nfcid_backend::LibNfc::new())
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if open
    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Information about the open device
    pub fn info(&self) -> Option<&ReaderInfo> {
        self.info.as_ref()
    }

    /// Target reported by the most recent poll
    pub fn last_target(&self) -> Option<&Target> {
        self.session.last_target()
    }

    /// Open the reader
    ///
    /// Initializes the library context, opens the configured device (or the
    /// first one the library finds) and switches it into initiator mode.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyOpen`] if the reader is open
    /// - [`Error::Init`] if the context or device cannot be opened
    /// - [`Error::Device`] if the device refuses initiator mode
    ///
    /// On failure every handle acquired so far is released again.
    pub fn open(&mut self) -> Result<()> {
        if self.session.is_open() {
            return Err(Error::AlreadyOpen);
        }

        self.config.validate()?;
        let connstring = self.config.connstring().map(str::to_owned);

        info!(
            "Opening NFC reader ({})...",
            connstring.as_deref().unwrap_or("first available")
        );

        self.backend.init().map_err(Error::Init)?;

        let name = match self.backend.open(connstring.as_deref()) {
            Ok(name) => name,
            Err(e) => {
                warn!("Failed to open device: {}", e);
                self.backend.exit();
                return Err(Error::Init(e));
            }
        };

        if let Err(e) = self.backend.initiator_init() {
            warn!("Failed to enter initiator mode: {}", e);
            self.backend.close();
            self.backend.exit();
            return Err(Error::Device(e));
        }

        self.session.open()?;

        let info = ReaderInfo::new(name, connstring);
        info!("NFC reader opened: {}", info);
        self.info = Some(info);

        Ok(())
    }

    /// Poll once and return the detected target
    ///
    /// Exactly one passive poll, no retry. `Ok(None)` means no tag answered.
    pub fn poll_target(&mut self) -> Result<Option<Target>> {
        self.ensure_open()?;

        let modulation = self.config.modulation();
        trace!("Polling for {} target...", modulation);

        let target = match self.backend.select_passive_target(modulation) {
            Ok(target) => target,
            Err(e) => {
                self.session.record(None)?;
                return Err(Error::Device(e));
            }
        };

        match &target {
            Some(target) => debug!(uid = %target.uid, "Target detected"),
            None => debug!("No target detected"),
        }

        self.session.record(target.clone())?;
        Ok(target)
    }

    /// Poll once and return the identifier as lowercase hex
    ///
    /// The identifier is cut to the configured UID limit (10 bytes by
    /// default). No tag is `Ok(None)`, not an error.
    pub fn poll_for_id(&mut self) -> Result<Option<String>> {
        let limit = self.config.uid_limit();
        let target = self.poll_target()?;

        Ok(target.map(|target| target.uid.render(limit)))
    }

    /// Close the reader
    ///
    /// Closing a reader that is not open does nothing.
    pub fn close(&mut self) -> Result<()> {
        if !self.session.is_open() {
            debug!("Reader not open, nothing to close");
            return Ok(());
        }

        info!("Closing NFC reader...");

        self.backend.close();
        self.backend.exit();
        self.session.close();
        self.info = None;

        info!("NFC reader closed");
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if !self.session.is_open() {
            return Err(Error::NotOpen);
        }
        Ok(())
    }
}

impl Drop for Reader {
    fn drop(&mut self) {
        if self.session.is_open() {
            warn!("Reader dropped while still open, closing");
            let _ = self.close();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use mockall::{mock, predicate::*};
    use pretty_assertions::assert_eq;

    use nfcid_core::Modulation;

    mock! {
        pub Backend {}

        impl Backend for Backend {
            fn init(&mut self) -> nfcid_backend::Result<()>;
            fn exit(&mut self);
            fn open<'a>(&mut self, connstring: Option<&'a str>) -> nfcid_backend::Result<Option<String>>;
            fn initiator_init(&mut self) -> nfcid_backend::Result<()>;
            fn select_passive_target(&mut self, modulation: Modulation) -> nfcid_backend::Result<Option<Target>>;
            fn close(&mut self);
        }
    }

    /// Backend that opens cleanly and expects exactly one close
    pub(crate) fn opening_backend() -> MockBackend {
        let mut backend = MockBackend::new();
        backend.expect_init().times(1).returning(|| Ok(()));
        backend
            .expect_open()
            .times(1)
            .returning(|_| Ok(Some("mock reader".into())));
        backend.expect_initiator_init().times(1).returning(|| Ok(()));
        backend.expect_close().times(1).return_const(());
        backend.expect_exit().times(1).return_const(());
        backend
    }

    pub(crate) fn target(uid: &[u8]) -> Target {
        Target::new(Modulation::ISO14443A_106, uid)
    }

    #[test]
    fn test_reader_create() {
        let reader = Reader::new(MockBackend::new());
        assert!(!reader.is_open());
        assert_eq!(reader.state(), SessionState::Closed);
        assert!(reader.info().is_none());
    }

    #[test]
    fn test_open_and_close() {
        let mut reader = Reader::new(opening_backend());

        reader.open().unwrap();
        assert!(reader.is_open());
        assert_eq!(reader.info().unwrap().name.as_deref(), Some("mock reader"));

        reader.close().unwrap();
        assert!(!reader.is_open());
        assert!(reader.info().is_none());
    }

    #[test]
    fn test_poll_deadbeef() {
        let mut backend = opening_backend();
        backend
            .expect_select_passive_target()
            .with(eq(Modulation::ISO14443A_106))
            .times(1)
            .returning(|_| Ok(Some(target(&[0xDE, 0xAD, 0xBE, 0xEF]))));

        let mut reader = Reader::new(backend);
        reader.open().unwrap();

        assert_eq!(reader.poll_for_id().unwrap().as_deref(), Some("deadbeef"));
        assert_eq!(
            reader.last_target().unwrap().uid.as_bytes(),
            &[0xDE, 0xAD, 0xBE, 0xEF]
        );

        reader.close().unwrap();
    }

    #[test]
    fn test_poll_no_target_is_none() {
        let mut backend = opening_backend();
        backend
            .expect_select_passive_target()
            .times(1)
            .returning(|_| Ok(None));

        let mut reader = Reader::new(backend);
        reader.open().unwrap();

        assert_eq!(reader.poll_for_id().unwrap(), None);
        assert!(reader.last_target().is_none());

        reader.close().unwrap();
    }

    #[test]
    fn test_poll_overwrites_last_target() {
        let mut backend = opening_backend();
        let mut polls = 0;
        backend
            .expect_select_passive_target()
            .times(3)
            .returning(move |_| {
                polls += 1;
                match polls {
                    1 => Ok(Some(target(&[0x01, 0x02, 0x03, 0x04]))),
                    2 => Ok(Some(target(&[0x05, 0x06, 0x07, 0x08]))),
                    _ => Ok(None),
                }
            });

        let mut reader = Reader::new(backend);
        reader.open().unwrap();

        assert_eq!(reader.poll_for_id().unwrap().as_deref(), Some("01020304"));
        assert_eq!(reader.poll_for_id().unwrap().as_deref(), Some("05060708"));
        assert_eq!(
            reader.last_target().unwrap().uid.as_bytes(),
            &[0x05, 0x06, 0x07, 0x08]
        );
        assert_eq!(reader.poll_for_id().unwrap(), None);
        assert!(reader.last_target().is_none());

        reader.close().unwrap();
    }

    #[test]
    fn test_poll_truncates_long_uid() {
        let mut backend = opening_backend();
        backend
            .expect_select_passive_target()
            .times(1)
            .returning(|_| Ok(Some(target(&(0x01..=0x0C).collect::<Vec<u8>>()))));

        let mut reader = Reader::new(backend);
        reader.open().unwrap();

        assert_eq!(
            reader.poll_for_id().unwrap().as_deref(),
            Some("0102030405060708090a")
        );
    }

    #[test]
    fn test_poll_without_uid_limit() {
        let mut backend = opening_backend();
        backend
            .expect_select_passive_target()
            .times(1)
            .returning(|_| Ok(Some(target(&(0x01..=0x0C).collect::<Vec<u8>>()))));

        let mut reader =
            Reader::new(backend).with_config(Config::new().with_uid_limit(None));
        reader.open().unwrap();

        assert_eq!(
            reader.poll_for_id().unwrap().as_deref(),
            Some("0102030405060708090a0b0c")
        );
    }

    #[test]
    fn test_poll_before_open() {
        let mut reader = Reader::new(MockBackend::new());
        assert!(matches!(reader.poll_for_id(), Err(Error::NotOpen)));
        assert!(matches!(reader.poll_target(), Err(Error::NotOpen)));
    }

    #[test]
    fn test_poll_after_close() {
        let mut reader = Reader::new(opening_backend());
        reader.open().unwrap();
        reader.close().unwrap();

        assert!(matches!(reader.poll_for_id(), Err(Error::NotOpen)));
    }

    #[test]
    fn test_close_twice_is_noop() {
        let mut reader = Reader::new(opening_backend());
        reader.open().unwrap();

        reader.close().unwrap();
        reader.close().unwrap();
        assert!(!reader.is_open());
    }

    #[test]
    fn test_close_without_open_is_noop() {
        let mut reader = Reader::new(MockBackend::new());
        reader.close().unwrap();
        assert_eq!(reader.state(), SessionState::Closed);
    }

    #[test]
    fn test_open_twice() {
        let mut reader = Reader::new(opening_backend());
        reader.open().unwrap();

        assert!(matches!(reader.open(), Err(Error::AlreadyOpen)));
        assert!(reader.is_open());
    }

    #[test]
    fn test_open_uses_configured_connstring() {
        let mut backend = MockBackend::new();
        backend.expect_init().times(1).returning(|| Ok(()));
        backend
            .expect_open()
            .withf(|connstring| *connstring == Some("pn532_uart:/dev/ttyUSB0"))
            .times(1)
            .returning(|_| Ok(None));
        backend.expect_initiator_init().times(1).returning(|| Ok(()));
        backend.expect_close().times(1).return_const(());
        backend.expect_exit().times(1).return_const(());

        let config = Config::new().with_connstring("pn532_uart:/dev/ttyUSB0");
        let mut reader = Reader::new(backend).with_config(config);
        reader.open().unwrap();

        assert_eq!(
            reader.info().unwrap().connstring.as_deref(),
            Some("pn532_uart:/dev/ttyUSB0")
        );
    }

    #[test]
    fn test_open_context_failure() {
        let mut backend = MockBackend::new();
        backend
            .expect_init()
            .times(1)
            .returning(|| Err(nfcid_backend::Error::ContextInit));
        backend.expect_open().never();
        backend.expect_exit().never();

        let mut reader = Reader::new(backend);
        let err = reader.open().unwrap_err();

        assert!(matches!(err, Error::Init(nfcid_backend::Error::ContextInit)));
        assert!(err.requires_open());
        assert!(!reader.is_open());
    }

    #[test]
    fn test_open_device_not_found_releases_context() {
        let mut backend = MockBackend::new();
        backend.expect_init().times(1).returning(|| Ok(()));
        backend
            .expect_open()
            .times(1)
            .returning(|_| Err(nfcid_backend::Error::DeviceNotFound("no device available".into())));
        backend.expect_initiator_init().never();
        backend.expect_close().never();
        backend.expect_exit().times(1).return_const(());

        let mut reader = Reader::new(backend);

        assert!(matches!(
            reader.open(),
            Err(Error::Init(nfcid_backend::Error::DeviceNotFound(_)))
        ));
        assert!(!reader.is_open());
    }

    #[test]
    fn test_open_initiator_failure_releases_device() {
        let mut backend = MockBackend::new();
        backend.expect_init().times(1).returning(|| Ok(()));
        backend.expect_open().times(1).returning(|_| Ok(None));
        backend
            .expect_initiator_init()
            .times(1)
            .returning(|| Err(nfcid_backend::Error::InitiatorMode("RF transmission error".into())));
        backend.expect_close().times(1).return_const(());
        backend.expect_exit().times(1).return_const(());

        let mut reader = Reader::new(backend);

        assert!(matches!(
            reader.open(),
            Err(Error::Device(nfcid_backend::Error::InitiatorMode(_)))
        ));
        assert!(!reader.is_open());
    }

    #[test]
    fn test_open_rejects_invalid_config() {
        let mut backend = MockBackend::new();
        backend.expect_init().never();

        let mut reader =
            Reader::new(backend).with_config(Config::new().with_uid_limit(Some(0)));

        assert!(matches!(reader.open(), Err(Error::Config(_))));
    }

    #[test]
    fn test_poll_backend_failure_clears_last_target() {
        let mut backend = opening_backend();
        let mut polls = 0;
        backend
            .expect_select_passive_target()
            .times(2)
            .returning(move |_| {
                polls += 1;
                match polls {
                    1 => Ok(Some(target(&[0xDE, 0xAD, 0xBE, 0xEF]))),
                    _ => Err(nfcid_backend::Error::NoDevice),
                }
            });

        let mut reader = Reader::new(backend);
        reader.open().unwrap();
        reader.poll_for_id().unwrap();

        let err = reader.poll_for_id().unwrap_err();
        assert!(matches!(err, Error::Device(nfcid_backend::Error::NoDevice)));
        assert!(!err.requires_open());
        assert!(reader.last_target().is_none());
        assert!(reader.is_open());
    }

    #[test]
    fn test_open_rejects_unsupported_modulation() {
        let mut backend = MockBackend::new();
        backend.expect_init().never();

        let config = Config::new().with_modulation(Modulation::new(
            nfcid_core::ModulationType::Jewel,
            nfcid_core::BaudRate::Kbps106,
        ));
        let mut reader = Reader::new(backend).with_config(config);

        assert!(matches!(reader.open(), Err(Error::Config(_))));
        assert!(!reader.is_open());
    }

    #[test]
    fn test_drop_closes_open_reader() {
        let mut reader = Reader::new(opening_backend());
        reader.open().unwrap();
        drop(reader);
    }
}
