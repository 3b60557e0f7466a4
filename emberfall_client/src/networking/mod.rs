use emberfall_lib::net::connection;
use emberfall_lib::net::frames::{ClientMessageFrame, ServerMessageFrame};

pub mod post_office;
mod snapshot_inbox;

pub use post_office::{connect, spawn_post_office, ActionSender, ConnectError};
pub use snapshot_inbox::{snapshot_channel, SnapshotInbox, SnapshotPost};

pub type ClientConnectionReader<TRead> = connection::ConnectionReader<TRead, ServerMessageFrame>;
pub type ClientConnectionWriter<TWrite> = connection::ConnectionWriter<TWrite, ClientMessageFrame>;
