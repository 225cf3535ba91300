// Console display surface - renders dashboard surfaces as tracing output
use crate::application::collaborators::DisplaySurface;
use crate::application::view::{AttitudeIndicator, Orientation, PortOption, Readouts};
use crate::domain::history::{ChartSeries, GyroAxis};
use crate::domain::log::{LogBuffer, Severity};
use crate::domain::session::{ConnectionStatus, ControlState};

/// Headless stand-in for the browser page. Status, ports and log lines go
/// out at `info`; the high-rate surfaces at `debug`/`trace`.
#[derive(Default)]
pub struct ConsoleDisplay {
    log_seen: u64,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySurface for ConsoleDisplay {
    fn show_status(&mut self, status: &ConnectionStatus) {
        let dot = if status.connected { "●" } else { "○" };
        tracing::info!(target: "display", "{dot} {}", status.text);
    }

    fn show_controls(&mut self, controls: &ControlState) {
        tracing::debug!(
            target: "display",
            connect = controls.connect_label,
            serial = controls.serial_label,
            serial_enabled = controls.serial_enabled,
            logging = controls.logging_label,
            demo = controls.demo_label,
            "controls"
        );
    }

    fn show_ports(&mut self, options: &[PortOption]) {
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        tracing::info!(target: "display", "ports: {}", labels.join(" | "));
    }

    fn show_readouts(&mut self, readouts: &Readouts) {
        tracing::debug!(
            target: "display",
            "accel [{} {} {}] gyro [{} {} {}] temp {}",
            readouts.accel[0],
            readouts.accel[1],
            readouts.accel[2],
            readouts.gyro[0],
            readouts.gyro[1],
            readouts.gyro[2],
            readouts.temperature
        );
    }

    fn show_attitude(&mut self, indicator: &AttitudeIndicator) {
        tracing::debug!(
            target: "display",
            "roll {} pitch {} (horizon rotate {}deg, shift {}px)",
            indicator.roll_text,
            indicator.pitch_text,
            indicator.rotation_deg,
            indicator.offset_px
        );
    }

    fn show_orientation(&mut self, orientation: &Orientation) {
        tracing::trace!(
            target: "display",
            x = orientation.x_rad,
            y = orientation.y_rad,
            z = orientation.z_rad,
            "orientation"
        );
    }

    fn show_chart(&mut self, chart: &ChartSeries) {
        let Some(point) = chart.latest() else {
            tracing::trace!(target: "display", "chart cleared");
            return;
        };
        let labels = chart.labels();
        let [x, y, z] = [GyroAxis::X, GyroAxis::Y, GyroAxis::Z].map(|axis| span(&chart.series(axis)));
        tracing::trace!(
            target: "display",
            points = chart.len(),
            "chart {}..{} gyro [{} {} {}] x {:.2}..{:.2} y {:.2}..{:.2} z {:.2}..{:.2}",
            labels.first().copied().unwrap_or_default(),
            point.label,
            point.x,
            point.y,
            point.z,
            x.0,
            x.1,
            y.0,
            y.1,
            z.0,
            z.1
        );
    }

    /// Prints only entries appended since the previous call.
    fn show_log(&mut self, log: &LogBuffer) {
        if log.is_empty() {
            tracing::trace!(target: "display", "log cleared");
        }
        let fresh = log.appended().saturating_sub(self.log_seen);
        self.log_seen = log.appended();

        let fresh = usize::try_from(fresh).unwrap_or(usize::MAX).min(log.len());
        for entry in log.entries().skip(log.len() - fresh) {
            match entry.severity {
                Severity::Info => {
                    tracing::info!(target: "display", "[{}] {}", entry.timestamp, entry.message)
                }
                Severity::Warning => {
                    tracing::warn!(target: "display", "[{}] {}", entry.timestamp, entry.message)
                }
                Severity::Error => {
                    tracing::error!(target: "display", "[{}] {}", entry.timestamp, entry.message)
                }
            }
        }
    }
}

/// Min and max over one chart series.
fn span(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_covers_series() {
        assert_eq!(span(&[1.5, -2.0, 0.25]), (-2.0, 1.5));
    }

    #[test]
    fn test_log_prints_only_new_entries() {
        let mut display = ConsoleDisplay::new();
        let mut log = LogBuffer::new(2);
        for i in 0..3 {
            log.push(crate::domain::log::LogEntry::new(
                format!("t{i}"),
                format!("entry {i}"),
                Severity::Info,
            ));
        }
        display.show_log(&log);
        assert_eq!(display.log_seen, 3);

        log.clear();
        display.show_log(&log);
        assert_eq!(display.log_seen, log.appended());
    }
}
