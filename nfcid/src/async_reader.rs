//! Async reader for tokio hosts
//!
//! Reader calls block, so each one runs on tokio's blocking pool.

use std::time::Duration;

use tokio::task;
use tracing::debug;

use crate::error::Result;
use crate::reader::Reader;
use crate::shared::SharedReader;

/// Reader usable from async code
///
/// # Examples
///
/// ```no_run
/// # #[cfg(feature = "libnfc")]
/// # async fn run() -> nfcid::Result<()> {
/// use std::time::Duration;
/// use nfcid::{AsyncReader, Reader};
///
/// let reader = AsyncReader::new(Reader::libnfc());
/// reader.open().await?;
///
/// let id = reader.wait_for_card(Duration::from_millis(200)).await?;
/// println!("Card: {}", id);
///
/// reader.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AsyncReader {
    shared: SharedReader,
}

impl AsyncReader {
    pub fn new(reader: Reader) -> Self {
        Self {
            shared: SharedReader::new(reader),
        }
    }

    /// Blocking handle to the same reader
    pub fn shared(&self) -> &SharedReader {
        &self.shared
    }

    /// Open the reader
    pub async fn open(&self) -> Result<()> {
        self.run(|reader| reader.open()).await
    }

    /// Poll once for a card identifier
    pub async fn getid(&self) -> Result<Option<String>> {
        self.run(|reader| reader.poll_for_id()).await
    }

    /// Close the reader
    pub async fn close(&self) -> Result<()> {
        self.run(|reader| reader.close()).await
    }

    /// Poll every `interval` until a card shows up
    ///
    /// Each attempt is a single `getid`; errors end the wait.
    pub async fn wait_for_card(&self, interval: Duration) -> Result<String> {
        loop {
            if let Some(id) = self.getid().await? {
                return Ok(id);
            }

            debug!("No card yet, polling again in {:?}", interval);
            tokio::time::sleep(interval).await;
        }
    }

    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Reader) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let shared = self.shared.clone();
        task::spawn_blocking(move || shared.with_reader(f)).await?
    }
}

impl From<SharedReader> for AsyncReader {
    fn from(shared: SharedReader) -> Self {
        Self { shared }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;
    use crate::reader::tests::{opening_backend, target};

    #[tokio::test]
    async fn test_async_open_poll_close() {
        let mut backend = opening_backend();
        backend
            .expect_select_passive_target()
            .times(1)
            .returning(|_| Ok(Some(target(&[0xDE, 0xAD, 0xBE, 0xEF]))));

        let reader = AsyncReader::new(Reader::new(backend));
        reader.open().await.unwrap();

        assert_eq!(reader.getid().await.unwrap().as_deref(), Some("deadbeef"));

        reader.close().await.unwrap();
        assert!(!reader.shared().is_open());
    }

    #[tokio::test]
    async fn test_async_getid_before_open() {
        let reader = AsyncReader::new(Reader::new(crate::reader::tests::MockBackend::new()));
        assert!(matches!(reader.getid().await, Err(Error::NotOpen)));
    }

    #[tokio::test]
    async fn test_wait_for_card() {
        let mut backend = opening_backend();
        let mut polls = 0;
        backend
            .expect_select_passive_target()
            .times(3)
            .returning(move |_| {
                polls += 1;
                if polls < 3 {
                    Ok(None)
                } else {
                    Ok(Some(target(&[0x04, 0x52, 0x7C, 0xA2, 0x3B, 0x5E, 0x80])))
                }
            });

        let reader = AsyncReader::new(Reader::new(backend));
        reader.open().await.unwrap();

        let id = reader.wait_for_card(Duration::from_millis(1)).await.unwrap();
        assert_eq!(id, "04527ca23b5e80");

        reader.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_wait_for_card_stops_on_error() {
        let reader = AsyncReader::new(Reader::new(crate::reader::tests::MockBackend::new()));
        let result = reader.wait_for_card(Duration::from_millis(1)).await;
        assert!(matches!(result, Err(Error::NotOpen)));
    }
}
