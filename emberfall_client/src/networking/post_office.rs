use crate::networking::snapshot_inbox::{snapshot_channel, SnapshotInbox, SnapshotPost};
use crate::networking::{ClientConnectionReader, ClientConnectionWriter};
use emberfall_lib::net::connection::ReadError;
use emberfall_lib::net::frames::{ClientMessageFrame, ServerMessageFrame};
use emberfall_lib::net::{MessageReceiver, MessageSendError, MessageSender};
use emberfall_lib::rules::player_actions::GameAction;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Failed to connect to the server: {0}")]
    ConnectionFailed(#[from] tokio::io::Error),
}

/// Fire-and-forget action mailbox handle for input handling code. The next
/// pushed snapshot is the only acknowledgment an action ever gets.
#[derive(Clone)]
pub struct ActionSender {
    action_tx: mpsc::Sender<GameAction>,
}

impl ActionSender {
    pub fn send(&self, action: GameAction) -> Result<(), MessageSendError> {
        self.action_tx.send_message(action)
    }
}

/// Connects to the rules engine and spawns the post office over the fresh
/// socket.
pub async fn connect(
    addr: &str,
) -> Result<(SnapshotInbox, ActionSender, JoinHandle<()>, JoinHandle<()>), ConnectError> {
    let socket = TcpStream::connect(addr).await?;
    Ok(spawn_post_office(socket))
}

/// Splits the server connection into one task per direction: the reader
/// posts snapshots into the single-slot inbox, the writer drains the
/// action mailbox. Both tasks end when the connection does.
pub fn spawn_post_office(
    socket: TcpStream,
) -> (SnapshotInbox, ActionSender, JoinHandle<()>, JoinHandle<()>) {
    let (read_half, write_half) = tokio::io::split(socket);
    let reader = ClientConnectionReader::new(read_half);
    let writer = ClientConnectionWriter::new(write_half);

    let (post, inbox) = snapshot_channel();
    let (action_tx, action_rx) = mpsc::channel(16);

    let receive_task = tokio::spawn(receive_posts(reader, post));
    let send_task = tokio::spawn(handle_send_requests(MessageReceiver::new(action_rx), writer));

    (inbox, ActionSender { action_tx }, receive_task, send_task)
}

async fn receive_posts<TRead: AsyncRead + Unpin + Send>(
    mut reader: ClientConnectionReader<TRead>,
    post: SnapshotPost,
) {
    loop {
        match reader.read_frame().await {
            Ok(ServerMessageFrame::SnapshotPush { sequence, snapshot }) => {
                post.post(sequence, snapshot);
            }
            Err(ReadError::ConnectionClosed(closed)) => {
                if closed.is_clean_shutdown {
                    info!("server closed the connection");
                } else {
                    warn!("connection closed mid-frame");
                }
                return;
            }
            Err(err) => {
                warn!("error occurred while reading a frame: {:?}", err);
                return;
            }
        }
    }
}

async fn handle_send_requests<TWrite: AsyncWrite + Unpin + Send>(
    mut action_mailbox: MessageReceiver<GameAction>,
    mut writer: ClientConnectionWriter<TWrite>,
) {
    while let Ok(action) = action_mailbox.receive().await {
        if let Err(err) = writer
            .write_frame(&ClientMessageFrame::Action(action))
            .await
        {
            warn!("failed to send an action to the server: {err}");
            return;
        }
    }

    info!("no more actions to send, the post office has ended");
}
