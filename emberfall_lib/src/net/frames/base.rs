use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tokio::io::AsyncWriteExt;

use crate::net::frames::error::{ParseError, WriteError};

#[async_trait]
pub trait OutputFrame {
    async fn write_to(
        &self,
        writer: &mut (impl AsyncWriteExt + Unpin + Send),
    ) -> Result<(), WriteError>;
}

pub trait InputFrame {
    fn parse(src: &mut Cursor<&[u8]>) -> Result<Self, ParseError>
    where
        Self: Sized;
}

pub trait Frame: OutputFrame + InputFrame {}
impl<T> Frame for T where T: OutputFrame + InputFrame {}

/// Frames are `\r\n`-terminated JSON lines. Decodes the next line from the
/// cursor, advancing it past the terminator on success.
pub fn parse<T: for<'a> Deserialize<'a>>(src: &mut Cursor<&[u8]>) -> Result<T, ParseError> {
    let line = take_line(src)?;
    Ok(serde_json::from_slice::<T>(line)?)
}

pub async fn write_serialized(
    writer: &mut (impl AsyncWriteExt + Unpin),
    data: impl Serialize,
) -> Result<(), WriteError> {
    let mut payload = serde_json::to_vec(&data)?;
    payload.extend_from_slice(b"\r\n");
    writer.write_all(&payload).await?;
    Ok(())
}

fn take_line<'a>(src: &mut Cursor<&'a [u8]>) -> Result<&'a [u8], ParseError> {
    let bytes: &'a [u8] = *src.get_ref();
    let start = src.position() as usize;
    let rest = &bytes[start..];

    match rest.windows(2).position(|pair| pair == b"\r\n") {
        Some(at) => {
            src.set_position((start + at + 2) as u64);
            Ok(&rest[..at])
        }
        None => Err(ParseError::Incomplete),
    }
}
