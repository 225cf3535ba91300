// Collaborator traits injected into the session
use crate::application::view::{AttitudeIndicator, Orientation, PortOption, Readouts};
use crate::domain::error::SessionError;
use crate::domain::history::ChartSeries;
use crate::domain::log::LogBuffer;
use crate::domain::session::{ConnectionStatus, ControlState};
use std::time::Duration;

/// Opens message links to the bridge. Events produced by the link are posted
/// back to the session tagged with `link_id`.
pub trait BridgeConnector {
    fn open(&mut self, link_id: u64, url: &str) -> Result<Box<dyn BridgeLink>, SessionError>;
}

pub trait BridgeLink {
    /// True once the handshake finished and until the link closes.
    fn is_open(&self) -> bool;

    /// Fire-and-forget send of one text frame.
    fn send(&mut self, text: String);

    /// Idempotent.
    fn close(&mut self);
}

/// Fixed-period timer driving demo mode. Ticks carry the run id they were
/// started with.
pub trait DemoTicker {
    fn start(&mut self, run: u64, period: Duration);
    fn stop(&mut self);
}

pub trait Clock {
    fn now_millis(&self) -> i64;

    /// Wall-clock label used for chart points and log entries.
    fn time_label(&self) -> String;
}

/// Everything the user sees.
pub trait DisplaySurface {
    fn show_status(&mut self, status: &ConnectionStatus);
    fn show_controls(&mut self, controls: &ControlState);
    fn show_ports(&mut self, options: &[PortOption]);
    fn show_readouts(&mut self, readouts: &Readouts);
    fn show_attitude(&mut self, indicator: &AttitudeIndicator);
    fn show_orientation(&mut self, orientation: &Orientation);
    fn show_chart(&mut self, chart: &ChartSeries);
    fn show_log(&mut self, log: &LogBuffer);
}
