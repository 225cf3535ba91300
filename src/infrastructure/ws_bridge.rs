// WebSocket bridge connector backed by tokio-tungstenite
use crate::application::collaborators::{BridgeConnector, BridgeLink};
use crate::application::events::{EventSender, SessionEvent};
use crate::domain::error::SessionError;
use futures::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::Message;

/// How long a closing link waits for the peer's close reply.
const CLOSE_REPLY_TIMEOUT: Duration = Duration::from_secs(2);

enum Outbound {
    Text(String),
    Close,
}

/// Spawns one I/O task per link. The task never touches session state; it
/// only posts events back through `events`.
pub struct TungsteniteConnector {
    events: EventSender,
}

impl TungsteniteConnector {
    pub fn new(events: EventSender) -> Self {
        Self { events }
    }
}

impl BridgeConnector for TungsteniteConnector {
    fn open(&mut self, link_id: u64, url: &str) -> Result<Box<dyn BridgeLink>, SessionError> {
        let request = url
            .into_client_request()
            .map_err(|e| SessionError::Transport(format!("Failed to connect: {e}")))?;

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let open = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(run_link(
            link_id,
            request,
            outbound_rx,
            open.clone(),
            self.events.clone(),
        ));

        Ok(Box::new(TungsteniteLink {
            outbound: outbound_tx,
            open,
            closing: false,
            task,
        }))
    }
}

pub struct TungsteniteLink {
    outbound: mpsc::UnboundedSender<Outbound>,
    open: Arc<AtomicBool>,
    closing: bool,
    task: JoinHandle<()>,
}

impl BridgeLink for TungsteniteLink {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn send(&mut self, text: String) {
        if self.outbound.send(Outbound::Text(text)).is_err() {
            tracing::debug!("bridge link task already finished, frame dropped");
        }
    }

    fn close(&mut self) {
        if self.closing {
            return;
        }
        self.closing = true;

        if self.open.swap(false, Ordering::SeqCst) {
            // The task runs the closing handshake and exits on its own.
            let _ = self.outbound.send(Outbound::Close);
        } else {
            self.task.abort();
        }
    }
}

impl Drop for TungsteniteLink {
    fn drop(&mut self) {
        self.close();
    }
}

async fn run_link(
    link: u64,
    request: Request,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    open: Arc<AtomicBool>,
    events: EventSender,
) {
    let stream = match tokio_tungstenite::connect_async(request).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            tracing::warn!(link, error = %e, "bridge connect failed");
            let _ = events.send(SessionEvent::SocketError {
                link,
                reason: e.to_string(),
            });
            let _ = events.send(SessionEvent::SocketClosed { link });
            return;
        }
    };

    open.store(true, Ordering::SeqCst);
    let _ = events.send(SessionEvent::SocketOpened { link });
    tracing::info!(link, "bridge connection open");

    let (mut write, mut read) = stream.split();
    let mut closing = false;

    loop {
        tokio::select! {
            command = outbound.recv() => match command {
                Some(Outbound::Text(text)) => {
                    if let Err(e) = write.send(Message::Text(text)).await {
                        tracing::warn!(link, error = %e, "bridge write failed");
                        let _ = events.send(SessionEvent::SocketError { link, reason: e.to_string() });
                        break;
                    }
                }
                Some(Outbound::Close) | None => {
                    closing = true;
                    break;
                }
            },
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let _ = events.send(SessionEvent::SocketMessage { link, text });
                }
                Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes) {
                    Ok(text) => {
                        let _ = events.send(SessionEvent::SocketMessage { link, text });
                    }
                    Err(_) => tracing::warn!(link, "non-UTF-8 binary frame dropped"),
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!(link, error = %e, "bridge read failed");
                    let _ = events.send(SessionEvent::SocketError { link, reason: e.to_string() });
                    break;
                }
            },
        }
    }

    if closing {
        if let Err(e) = write.send(Message::Close(None)).await {
            tracing::debug!(link, error = %e, "close frame not sent");
        }
        let reply = async {
            while let Some(Ok(frame)) = read.next().await {
                if frame.is_close() {
                    break;
                }
            }
        };
        if tokio::time::timeout(CLOSE_REPLY_TIMEOUT, reply).await.is_err() {
            tracing::debug!(link, "peer did not answer close frame");
        }
    }

    open.store(false, Ordering::SeqCst);
    tracing::info!(link, "bridge connection closed");
    let _ = events.send(SessionEvent::SocketClosed { link });
}
