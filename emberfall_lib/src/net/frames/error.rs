use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// Not enough buffered data to cut a full line yet; read more and
    /// retry.
    #[error("incomplete frame")]
    Incomplete,
    /// The line was complete but did not decode to a message.
    #[error("invalid message encoding: {0}")]
    InvalidMessage(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
#[error("Writing a frame failed.")]
pub enum WriteError {
    IOError(#[from] std::io::Error),
    SerializationError(#[from] serde_json::Error),
}
