// Session service - connection state machine and event reducer
use crate::application::collaborators::{
    BridgeConnector, BridgeLink, Clock, DemoTicker, DisplaySurface,
};
use crate::application::demo_generator::{DemoGenerator, DEMO_PERIOD};
use crate::application::events::SessionEvent;
use crate::application::render_pipeline::RenderPipeline;
use crate::application::view::port_options;
use crate::domain::error::SessionError;
use crate::domain::history::{ChartSeries, CHART_CAPACITY};
use crate::domain::log::{LogBuffer, LogEntry, Severity, LOG_CAPACITY};
use crate::domain::protocol::{BridgeCommand, InboundMessage, PortDescriptor};
use crate::domain::session::SessionState;
use crate::domain::telemetry::TelemetrySample;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub chart_capacity: usize,
    pub log_capacity: usize,
    pub demo_period: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            chart_capacity: CHART_CAPACITY,
            log_capacity: LOG_CAPACITY,
            demo_period: DEMO_PERIOD,
        }
    }
}

pub struct SessionDeps {
    pub connector: Box<dyn BridgeConnector>,
    pub ticker: Box<dyn DemoTicker>,
    pub clock: Box<dyn Clock>,
    pub display: Box<dyn DisplaySurface>,
    pub demo: DemoGenerator,
}

struct ActiveLink {
    id: u64,
    handle: Box<dyn BridgeLink>,
}

/// The dashboard's single owner of mutable state. Every input (user control,
/// socket event, demo tick) goes through [`Session::handle_event`].
pub struct Session {
    state: SessionState,
    ports: Vec<PortDescriptor>,
    log: LogBuffer,
    pipeline: RenderPipeline,
    connector: Box<dyn BridgeConnector>,
    link: Option<ActiveLink>,
    next_link_id: u64,
    ticker: Box<dyn DemoTicker>,
    demo: DemoGenerator,
    demo_run: u64,
    demo_period: Duration,
    clock: Box<dyn Clock>,
}

impl Session {
    pub fn new(deps: SessionDeps, settings: SessionSettings) -> Self {
        let mut session = Self {
            state: SessionState::default(),
            ports: Vec::new(),
            log: LogBuffer::new(settings.log_capacity),
            pipeline: RenderPipeline::new(deps.display, settings.chart_capacity),
            connector: deps.connector,
            link: None,
            next_link_id: 0,
            ticker: deps.ticker,
            demo: deps.demo,
            demo_run: 0,
            demo_period: settings.demo_period,
            clock: deps.clock,
        };
        session.publish_connection();
        session.pipeline.show_ports(&port_options(&session.ports));
        session
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Connect { url } => self.connect(&url),
            SessionEvent::Disconnect => self.disconnect(),
            SessionEvent::ToggleBridge { url } => {
                if self.link.is_some() {
                    self.disconnect();
                } else {
                    self.connect(&url);
                }
            }
            SessionEvent::ConnectSerial { port, baudrate } => self.connect_serial(&port, &baudrate),
            SessionEvent::DisconnectSerial => self.disconnect_serial(),
            SessionEvent::ToggleSerial { port, baudrate } => {
                if self.state.serial_connected() {
                    self.disconnect_serial();
                } else {
                    self.connect_serial(&port, &baudrate);
                }
            }
            SessionEvent::ToggleLogging => self.toggle_logging(),
            SessionEvent::Clear => self.clear(),
            SessionEvent::StartDemo => self.start_demo(),
            SessionEvent::StopDemo => self.stop_demo(),
            SessionEvent::ToggleDemo => {
                if self.state.demo_active {
                    self.stop_demo();
                } else {
                    self.start_demo();
                }
            }
            SessionEvent::SocketOpened { link } => {
                if self.is_current_link(link) {
                    self.on_socket_opened();
                }
            }
            SessionEvent::SocketMessage { link, text } => {
                if self.is_current_link(link) {
                    self.on_socket_message(&text);
                }
            }
            SessionEvent::SocketError { link, reason } => {
                if self.is_current_link(link) {
                    tracing::warn!(link, %reason, "bridge socket error");
                    self.report(SessionError::Transport(
                        "WebSocket connection error".to_string(),
                    ));
                }
            }
            SessionEvent::SocketClosed { link } => {
                if self.is_current_link(link) {
                    self.link = None;
                    self.on_socket_closed();
                }
            }
            SessionEvent::DemoTick { run } => self.on_demo_tick(run),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn chart(&self) -> &ChartSeries {
        self.pipeline.chart()
    }

    pub fn ports(&self) -> &[PortDescriptor] {
        &self.ports
    }

    fn connect(&mut self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            self.report(SessionError::Validation(
                "Please enter WebSocket URL".to_string(),
            ));
            return;
        }
        if self.link.is_some() {
            self.report(SessionError::Validation(
                "Bridge connection already open".to_string(),
            ));
            return;
        }

        self.next_link_id += 1;
        let id = self.next_link_id;
        match self.connector.open(id, url) {
            Ok(handle) => {
                tracing::info!(link = id, url, "opening bridge connection");
                self.link = Some(ActiveLink { id, handle });
                self.state.begin_connecting();
                self.publish_connection();
            }
            Err(err) => self.report(err),
        }
    }

    /// Explicit user disconnect. Tears the socket down right away and also
    /// stops demo mode; a late close event from that socket is then stale.
    fn disconnect(&mut self) {
        if let Some(mut link) = self.link.take() {
            link.handle.close();
            self.on_socket_closed();
        }
        self.stop_demo();
    }

    fn connect_serial(&mut self, port: &str, baudrate: &str) {
        let port = port.trim();
        if port.is_empty() {
            self.report(SessionError::Validation(
                "Please select a serial port".to_string(),
            ));
            return;
        }
        let Ok(baudrate) = baudrate.trim().parse::<u32>() else {
            self.report(SessionError::Validation(format!(
                "Invalid baud rate: {baudrate}"
            )));
            return;
        };

        // State only moves once the bridge acknowledges with `connected`.
        self.send_command(BridgeCommand::Connect {
            port: port.to_string(),
            baudrate,
        });
    }

    fn disconnect_serial(&mut self) {
        self.send_command(BridgeCommand::Disconnect);
    }

    /// Sends only over an open link; otherwise the command is dropped.
    fn send_command(&mut self, command: BridgeCommand) {
        let Some(link) = self.link.as_mut().filter(|l| l.handle.is_open()) else {
            tracing::debug!(?command, "no open bridge link, command dropped");
            return;
        };
        match command.encode() {
            Ok(text) => link.handle.send(text),
            Err(err) => tracing::warn!(error = %err, "failed to encode bridge command"),
        }
    }

    fn toggle_logging(&mut self) {
        self.state.logging = !self.state.logging;
        self.pipeline.show_controls(&self.state.controls());
        let message = if self.state.logging {
            "Logging started"
        } else {
            "Logging stopped"
        };
        self.append_log(message, Severity::Info);
    }

    fn clear(&mut self) {
        self.pipeline.clear_chart();
        self.log.clear();
        self.pipeline.show_log(&self.log);
        self.append_log("Data cleared", Severity::Info);
    }

    /// Restarting first stops the previous run, so at most one timer exists.
    fn start_demo(&mut self) {
        self.stop_demo();

        self.demo_run += 1;
        self.ticker.start(self.demo_run, self.demo_period);
        self.state.demo_active = true;
        self.pipeline.show_controls(&self.state.controls());
        self.append_log("Demo mode started", Severity::Info);
    }

    fn stop_demo(&mut self) {
        if !self.state.demo_active {
            return;
        }
        self.ticker.stop();
        self.state.demo_active = false;
        self.pipeline.show_controls(&self.state.controls());
        self.append_log("Demo mode stopped", Severity::Info);
    }

    fn on_demo_tick(&mut self, run: u64) {
        if !self.state.demo_active || run != self.demo_run {
            tracing::debug!(run, current = self.demo_run, "stale demo tick ignored");
            return;
        }
        let sample = self.demo.sample_at(self.clock.now_millis());
        self.dispatch_sample(sample);
    }

    fn on_socket_opened(&mut self) {
        self.state.bridge_opened();
        self.publish_connection();
        self.append_log("Connected to WebSocket bridge", Severity::Info);
        self.send_command(BridgeCommand::ListPorts);
    }

    /// Close path shared by peer-initiated and local teardown. Demo mode is
    /// left alone here.
    fn on_socket_closed(&mut self) {
        self.state.bridge_closed();
        self.publish_connection();
        self.append_log("WebSocket connection closed", Severity::Warning);
    }

    fn on_socket_message(&mut self, text: &str) {
        let message = match InboundMessage::parse(text, self.clock.now_millis()) {
            Ok(message) => message,
            Err(err) => {
                self.report(err);
                return;
            }
        };

        match message {
            InboundMessage::Ports(ports) => {
                tracing::debug!(count = ports.len(), "port list replaced");
                self.ports = ports;
                self.pipeline.show_ports(&port_options(&self.ports));
            }
            InboundMessage::Connected { port, baudrate } => {
                let text = format!("Connected to {port} at {baudrate} baud");
                if self.state.serial_acknowledged(port, baudrate) {
                    self.publish_connection();
                    self.append_log(text, Severity::Info);
                }
            }
            InboundMessage::Disconnected => {
                if self.state.serial_released() {
                    self.publish_connection();
                    self.append_log("Serial port disconnected", Severity::Info);
                }
            }
            InboundMessage::PeerError { message } => {
                self.report(SessionError::PeerReported(message));
            }
            InboundMessage::Raw { data } => {
                self.append_log(format!("Raw data: {data}"), Severity::Info);
            }
            InboundMessage::Telemetry(sample) => {
                self.dispatch_sample(sample);
            }
        }
    }

    fn dispatch_sample(&mut self, sample: TelemetrySample) {
        self.pipeline.process(&sample, self.clock.time_label());

        if self.state.logging {
            match serde_json::to_string_pretty(&sample) {
                Ok(text) => self.append_log(text, Severity::Info),
                Err(err) => tracing::warn!(error = %err, "failed to serialize sample for log"),
            }
        }
    }

    fn is_current_link(&self, id: u64) -> bool {
        let current = self.link.as_ref().is_some_and(|l| l.id == id);
        if !current {
            tracing::debug!(link = id, "event from superseded bridge link ignored");
        }
        current
    }

    fn report(&mut self, err: SessionError) {
        if err.is_user_visible() {
            self.append_log(err.to_string(), Severity::Error);
        } else {
            tracing::warn!(error = %err, "dropping bridge message");
        }
    }

    fn append_log(&mut self, message: impl Into<String>, severity: Severity) {
        let entry = LogEntry::new(self.clock.time_label(), message.into(), severity);
        self.log.push(entry);
        self.pipeline.show_log(&self.log);
    }

    fn publish_connection(&mut self) {
        self.pipeline
            .show_connection(&self.state.status(), &self.state.controls());
    }
}
