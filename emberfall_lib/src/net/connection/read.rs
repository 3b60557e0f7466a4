use crate::net::frames;
use crate::net::frames::Frame;
use bytes::{Buf, BytesMut};
use std::io::Cursor;
use std::marker::PhantomData;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Buffered frame reader over one half of the server connection. Bytes are
/// accumulated until a full frame parses; leftover bytes stay buffered for
/// the next frame.
pub struct ConnectionReader<TRead, TInput>
where
    TInput: Frame,
    TRead: AsyncRead + Unpin,
{
    stream: TRead,
    buffer: BytesMut,
    phantom: PhantomData<TInput>,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("io failure while reading a frame")]
    IOError(#[from] std::io::Error),
    #[error("could not parse a frame: {0}")]
    ParseError(#[from] ParseError),
    #[error("connection closed")]
    ConnectionClosed(ConnectionClosed),
}

#[derive(Debug)]
pub struct ConnectionClosed {
    /// False when the peer hung up in the middle of a frame.
    pub is_clean_shutdown: bool,
}

#[derive(Debug, Error)]
#[error("{error_str}")]
pub struct ParseError {
    pub error_str: String,
}

impl<TRead: AsyncRead + Unpin, TInput: Frame> ConnectionReader<TRead, TInput> {
    pub fn new(stream: TRead) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            phantom: Default::default(),
        }
    }

    pub async fn read_frame(&mut self) -> Result<TInput, Error> {
        loop {
            if let Some(frame) = self.parse_buffered()? {
                return Ok(frame);
            }

            // The buffer does not hold a full frame yet; pull more bytes
            // from the socket. A zero-length read means the peer hung up.
            if self.stream.read_buf(&mut self.buffer).await? == 0 {
                return Err(Error::ConnectionClosed(ConnectionClosed {
                    is_clean_shutdown: self.buffer.is_empty(),
                }));
            }
        }
    }

    fn parse_buffered(&mut self) -> Result<Option<TInput>, Error> {
        let mut cursor = Cursor::new(&self.buffer[..]);

        match TInput::parse(&mut cursor) {
            Ok(frame) => {
                let consumed = cursor.position() as usize;
                self.buffer.advance(consumed);
                Ok(Some(frame))
            }
            Err(frames::ParseError::Incomplete) => Ok(None),
            Err(invalid) => Err(Error::ParseError(ParseError {
                error_str: invalid.to_string(),
            })),
        }
    }
}
