//! Request bodies that can be sent more than once.
//!
//! The HTTP stack consumes a body exactly once. A request that may have to be
//! replayed after re-authentication therefore materializes its body into one
//! in-memory buffer up front and hands out independent readers over it.

use std::io::{self, Cursor, Read};

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use serde::Serialize;
use tokio::io::AsyncRead;

use crate::error::{Error, InvalidInputError, TransportError};

/// A request body buffered once and readable any number of times.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use scaleio::ReplayableBody;
///
/// let body = ReplayableBody::from_json(&serde_json::json!({"name": "vol1"})).unwrap();
/// let [mut first, mut second] = body.readers();
///
/// let mut a = String::new();
/// first.read_to_string(&mut a).unwrap();
/// let mut b = String::new();
/// second.read_to_string(&mut b).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayableBody {
    bytes: Bytes,
}

impl ReplayableBody {
    /// Wrap bytes that are already in memory.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Serialize a value as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    pub fn from_json<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        let bytes = serde_json::to_vec(value).map_err(|e| InvalidInputError::Other {
            message: format!("failed to serialize request body: {e}"),
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Drain an async reader into the buffer. The source is read exactly once.
    ///
    /// # Errors
    ///
    /// Returns a transport body error if reading fails.
    pub async fn from_reader<R>(mut source: R) -> Result<Self, Error>
    where
        R: AsyncRead + Unpin,
    {
        use tokio::io::AsyncReadExt;

        let mut buf = Vec::new();
        source
            .read_to_end(&mut buf)
            .await
            .map_err(|e| TransportError::Body {
                message: format!("failed to buffer request body: {e}"),
            })?;
        Ok(Self::from_bytes(buf))
    }

    /// Collect a stream of chunks into the buffer.
    ///
    /// # Errors
    ///
    /// Returns a transport body error if the stream yields one.
    pub async fn from_stream<S, E>(stream: S) -> Result<Self, Error>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: std::fmt::Display,
    {
        let mut stream = std::pin::pin!(stream);
        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| TransportError::Body {
                message: format!("failed to buffer request body: {e}"),
            })?;
            buf.extend_from_slice(&chunk);
        }
        Ok(Self::from_bytes(buf.freeze()))
    }

    /// Returns the buffered bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the buffered body in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the body is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// A fresh reader positioned at the start of the body.
    pub fn reader(&self) -> BodyReader {
        BodyReader {
            cursor: Cursor::new(self.bytes.clone()),
        }
    }

    /// `N` independent readers over the same bytes.
    pub fn readers<const N: usize>(&self) -> [BodyReader; N] {
        std::array::from_fn(|_| self.reader())
    }
}

/// One independent reader over a [`ReplayableBody`].
///
/// Readers share the underlying buffer but keep their own position.
#[derive(Debug)]
pub struct BodyReader {
    cursor: Cursor<Bytes>,
}

impl BodyReader {
    /// The bytes this reader has not yet produced.
    pub fn remaining(&self) -> Bytes {
        let start = usize::try_from(self.cursor.position())
            .unwrap_or(usize::MAX)
            .min(self.cursor.get_ref().len());
        self.cursor.get_ref().slice(start..)
    }
}

impl Read for BodyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(&mut self.cursor, buf)
    }
}

impl From<BodyReader> for reqwest::Body {
    fn from(reader: BodyReader) -> Self {
        reqwest::Body::from(reader.remaining())
    }
}
