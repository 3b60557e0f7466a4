mod read;
pub use {
    read::ConnectionClosed as ConnectionClosedError, read::ConnectionReader,
    read::Error as ReadError, read::ParseError,
};

mod write;

pub use {write::ConnectionWriter, write::Error as WriteError};
