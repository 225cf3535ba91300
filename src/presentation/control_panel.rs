// Control panel - line-oriented stand-in for the dashboard's form controls
use crate::application::events::SessionEvent;
use crate::infrastructure::config::DashboardConfig;
use futures::stream::Stream;
use tokio::io::{AsyncBufReadExt, BufReader};

pub const HELP: &str = "\
commands:
  url <ws-url>     set the bridge URL
  port <name>      select a serial port
  baud <rate>      select a baud rate
  connect [on|off] connect / disconnect the bridge
  serial [on|off]  connect / disconnect the serial port
  log              start / stop logging samples
  clear            clear chart and log
  demo [on|off]    start / stop demo mode
  status           show session state
  help             show this text
  quit             exit";

#[derive(Debug, Clone, PartialEq)]
pub enum PanelOutcome {
    Event(SessionEvent),
    /// A form field changed; nothing to send to the session.
    Updated(String),
    Rejected(String),
    Status,
    Help,
    Quit,
    Empty,
}

/// Holds the form inputs (URL, selected port, selected baud rate) and turns
/// button presses into session events.
pub struct ControlPanel {
    url: String,
    port: String,
    baudrate: String,
    baud_rates: Vec<u32>,
}

impl ControlPanel {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            url: config.bridge_url.clone(),
            port: String::new(),
            baudrate: config.default_baudrate.to_string(),
            baud_rates: config.baud_rates.clone(),
        }
    }

    pub fn interpret(&mut self, line: &str) -> PanelOutcome {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return PanelOutcome::Empty;
        };
        let argument = parts.collect::<Vec<_>>().join(" ");

        match command.to_ascii_lowercase().as_str() {
            "url" => {
                self.url = argument;
                PanelOutcome::Updated(format!("bridge URL: {}", self.url))
            }
            "port" => {
                self.port = argument;
                PanelOutcome::Updated(format!("serial port: {}", self.port))
            }
            "baud" => match argument.parse::<u32>() {
                Ok(rate) if self.baud_rates.contains(&rate) => {
                    self.baudrate = argument;
                    PanelOutcome::Updated(format!("baud rate: {}", self.baudrate))
                }
                _ => PanelOutcome::Rejected(format!(
                    "baud rate must be one of {:?}",
                    self.baud_rates
                )),
            },
            "connect" => {
                let url = self.url.clone();
                switch(
                    &argument,
                    SessionEvent::ToggleBridge { url: url.clone() },
                    SessionEvent::Connect { url },
                    SessionEvent::Disconnect,
                )
            }
            "serial" => {
                let (port, baudrate) = (self.port.clone(), self.baudrate.clone());
                switch(
                    &argument,
                    SessionEvent::ToggleSerial {
                        port: port.clone(),
                        baudrate: baudrate.clone(),
                    },
                    SessionEvent::ConnectSerial { port, baudrate },
                    SessionEvent::DisconnectSerial,
                )
            }
            "log" => PanelOutcome::Event(SessionEvent::ToggleLogging),
            "clear" => PanelOutcome::Event(SessionEvent::Clear),
            "demo" => switch(
                &argument,
                SessionEvent::ToggleDemo,
                SessionEvent::StartDemo,
                SessionEvent::StopDemo,
            ),
            "status" => PanelOutcome::Status,
            "help" | "?" => PanelOutcome::Help,
            "quit" | "exit" => PanelOutcome::Quit,
            other => PanelOutcome::Rejected(format!("unknown command: {other}")),
        }
    }
}

/// No argument presses the toggle button; `on`/`off` force a direction.
fn switch(
    argument: &str,
    toggle: SessionEvent,
    on: SessionEvent,
    off: SessionEvent,
) -> PanelOutcome {
    match argument.to_ascii_lowercase().as_str() {
        "" => PanelOutcome::Event(toggle),
        "on" => PanelOutcome::Event(on),
        "off" => PanelOutcome::Event(off),
        other => PanelOutcome::Rejected(format!("expected on or off, got {other}")),
    }
}

/// Lines typed on stdin.
pub fn stdin_lines() -> impl Stream<Item = String> {
    async_stream::stream! {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => yield line,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
    }
}
