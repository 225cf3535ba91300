// View models handed to the display surface
use crate::domain::protocol::PortDescriptor;
use crate::domain::telemetry::{Attitude, Reading, TelemetrySample, Vector3};

pub const READOUT_DEFAULT: &str = "0.00";
pub const TEMPERATURE_DEFAULT: &str = "--";
pub const PORT_PLACEHOLDER: &str = "Select Port";

/// Current-value text for each live readout.
#[derive(Debug, Clone, PartialEq)]
pub struct Readouts {
    pub accel: [String; 3],
    pub gyro: [String; 3],
    pub temperature: String,
}

impl Readouts {
    pub fn from_sample(sample: &TelemetrySample) -> Self {
        Self {
            accel: axis_texts(&sample.accel),
            gyro: axis_texts(&sample.gyro),
            temperature: sample
                .temperature
                .map_or_else(|| TEMPERATURE_DEFAULT.to_string(), |t| format!("{t}")),
        }
    }
}

fn axis_texts(v: &Vector3) -> [String; 3] {
    [reading_text(&v.x), reading_text(&v.y), reading_text(&v.z)]
}

fn reading_text(reading: &Reading) -> String {
    reading.text().unwrap_or(READOUT_DEFAULT).to_string()
}

/// 2D artificial horizon: rotate by roll, shift by twice the pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct AttitudeIndicator {
    pub rotation_deg: f64,
    pub offset_px: f64,
    pub roll_text: String,
    pub pitch_text: String,
}

impl From<&Attitude> for AttitudeIndicator {
    fn from(attitude: &Attitude) -> Self {
        Self {
            rotation_deg: attitude.roll,
            offset_px: attitude.pitch * 2.0,
            roll_text: format!("{}°", attitude.roll),
            pitch_text: format!("{}°", attitude.pitch),
        }
    }
}

/// Euler rotation for the 3D model, in radians. Axis order is
/// x = pitch, y = yaw, z = roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub x_rad: f64,
    pub y_rad: f64,
    pub z_rad: f64,
}

impl From<&Attitude> for Orientation {
    fn from(attitude: &Attitude) -> Self {
        Self {
            x_rad: attitude.pitch.to_radians(),
            y_rad: attitude.yaw.to_radians(),
            z_rad: attitude.roll.to_radians(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortOption {
    pub value: String,
    pub label: String,
}

/// Selector contents: placeholder first, then one option per port.
pub fn port_options(ports: &[PortDescriptor]) -> Vec<PortOption> {
    std::iter::once(PortOption {
        value: String::new(),
        label: PORT_PLACEHOLDER.to_string(),
    })
    .chain(ports.iter().map(|p| PortOption {
        value: p.port.clone(),
        label: p.label(),
    }))
    .collect()
}
