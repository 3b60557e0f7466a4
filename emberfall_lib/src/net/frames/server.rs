use crate::net::frames::{parse, write_serialized, InputFrame, OutputFrame, ParseError, WriteError};
use crate::rules::GameStateSnapshot;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tokio::io::AsyncWriteExt;

/// Messages pushed by the rules engine. Delivery is at-least-once and not
/// necessarily in order; `sequence` increases with every accepted action so
/// receivers can drop stale deliveries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ServerMessageFrame {
    SnapshotPush {
        sequence: u64,
        snapshot: GameStateSnapshot,
    },
}

impl InputFrame for ServerMessageFrame {
    fn parse(src: &mut Cursor<&[u8]>) -> Result<Self, ParseError> {
        parse(src)
    }
}

#[async_trait]
impl OutputFrame for ServerMessageFrame {
    async fn write_to(
        &self,
        writer: &mut (impl AsyncWriteExt + Unpin + Send),
    ) -> Result<(), WriteError> {
        write_serialized(writer, self).await
    }
}
