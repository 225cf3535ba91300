// Session events - everything that can drive a state transition
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    // User controls
    Connect { url: String },
    Disconnect,
    ToggleBridge { url: String },
    ConnectSerial { port: String, baudrate: String },
    DisconnectSerial,
    ToggleSerial { port: String, baudrate: String },
    ToggleLogging,
    Clear,
    StartDemo,
    StopDemo,
    ToggleDemo,

    // Bridge link
    SocketOpened { link: u64 },
    SocketMessage { link: u64, text: String },
    SocketError { link: u64, reason: String },
    SocketClosed { link: u64 },

    // Demo timer
    DemoTick { run: u64 },
}

pub type EventSender = mpsc::UnboundedSender<SessionEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<SessionEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
