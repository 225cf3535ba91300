// Render pipeline - routes canonical samples to readouts, attitude and chart
use crate::application::collaborators::DisplaySurface;
use crate::application::view::{AttitudeIndicator, Orientation, PortOption, Readouts};
use crate::domain::history::ChartSeries;
use crate::domain::log::LogBuffer;
use crate::domain::session::{ConnectionStatus, ControlState};
use crate::domain::telemetry::TelemetrySample;

/// Owns the chart window and the display. Does not know whether a sample
/// came from the bridge or the demo generator.
pub struct RenderPipeline {
    display: Box<dyn DisplaySurface>,
    chart: ChartSeries,
}

impl RenderPipeline {
    pub fn new(display: Box<dyn DisplaySurface>, chart_capacity: usize) -> Self {
        Self {
            display,
            chart: ChartSeries::new(chart_capacity),
        }
    }

    /// Push one sample through every display surface.
    pub fn process(&mut self, sample: &TelemetrySample, label: String) {
        self.display.show_readouts(&Readouts::from_sample(sample));

        if let Some(attitude) = &sample.attitude {
            self.display.show_attitude(&AttitudeIndicator::from(attitude));
            self.display.show_orientation(&Orientation::from(attitude));
        }

        if self.chart.record(label, &sample.gyro) {
            self.display.show_chart(&self.chart);
        } else {
            tracing::trace!(sample.timestamp_millis, "sample without gyro axes, chart unchanged");
        }
    }

    pub fn clear_chart(&mut self) {
        self.chart.clear();
        self.display.show_chart(&self.chart);
    }

    pub fn chart(&self) -> &ChartSeries {
        &self.chart
    }

    pub fn show_connection(&mut self, status: &ConnectionStatus, controls: &ControlState) {
        self.display.show_status(status);
        self.display.show_controls(controls);
    }

    pub fn show_controls(&mut self, controls: &ControlState) {
        self.display.show_controls(controls);
    }

    pub fn show_ports(&mut self, options: &[PortOption]) {
        self.display.show_ports(options);
    }

    pub fn show_log(&mut self, log: &LogBuffer) {
        self.display.show_log(log);
    }
}
