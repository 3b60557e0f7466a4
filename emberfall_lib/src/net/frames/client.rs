use crate::net::frames::{parse, write_serialized, InputFrame, OutputFrame, ParseError, WriteError};
use crate::rules::player_actions::GameAction;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tokio::io::AsyncWriteExt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ClientMessageFrame {
    Action(GameAction),
}

impl InputFrame for ClientMessageFrame {
    fn parse(src: &mut Cursor<&[u8]>) -> Result<Self, ParseError> {
        parse(src)
    }
}

#[async_trait]
impl OutputFrame for ClientMessageFrame {
    async fn write_to(
        &self,
        writer: &mut (impl AsyncWriteExt + Unpin + Send),
    ) -> Result<(), WriteError> {
        write_serialized(writer, self).await
    }
}
