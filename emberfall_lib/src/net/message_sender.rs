use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

#[derive(Error, Debug)]
pub enum SendError {
    #[error("Channel has been closed.")]
    ChannelClosed,
    #[error("Channel is full.")]
    ChannelFull,
}

/// Non-async message send, usable from synchronous render-loop code.
pub trait MessageSender<TMessage> {
    fn send_message(&self, message: TMessage) -> Result<(), SendError>;
}

impl<TMessage> MessageSender<TMessage> for &mpsc::Sender<TMessage> {
    fn send_message(&self, message: TMessage) -> Result<(), SendError> {
        self.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => SendError::ChannelFull,
            TrySendError::Closed(_) => SendError::ChannelClosed,
        })
    }
}

impl<TMessage> MessageSender<TMessage> for mpsc::Sender<TMessage> {
    fn send_message(&self, message: TMessage) -> Result<(), SendError> {
        (&self).send_message(message)
    }
}
