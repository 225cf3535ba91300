// Telemetry sample model - canonical record for one IMU reading
use crate::domain::error::SessionError;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One axis value as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Reading {
    #[default]
    Absent,
    /// Present, but not a number (or a numeric string).
    Malformed,
    /// Parsed value and the text it arrived as. Readouts show the text.
    Value(f64, String),
}

impl Reading {
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Reading::Absent,
            Some(Value::Number(n)) => n
                .as_f64()
                .map_or(Reading::Malformed, |v| Reading::Value(v, n.to_string())),
            Some(Value::String(s)) if s.trim().is_empty() => Reading::Absent,
            Some(Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Reading::Value(v, s.trim().to_string()),
                _ => Reading::Malformed,
            },
            Some(_) => Reading::Malformed,
        }
    }

    /// A locally produced value printed with a fixed number of decimals.
    pub fn fixed(value: f64, decimals: usize) -> Self {
        Reading::Value(value, format!("{value:.decimals$}"))
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Reading::Absent)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Value(v, _) => Some(*v),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Reading::Value(_, text) => Some(text),
            _ => None,
        }
    }

    /// Chart math treats a failed parse as zero.
    pub fn value_or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Value(v, _) => serializer.serialize_f64(*v),
            _ => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Vector3 {
    pub x: Reading,
    pub y: Reading,
    pub z: Reading,
}

impl Vector3 {
    pub fn fixed(x: f64, y: f64, z: f64, decimals: usize) -> Self {
        Self {
            x: Reading::fixed(x, decimals),
            y: Reading::fixed(y, decimals),
            z: Reading::fixed(z, decimals),
        }
    }

    fn from_json(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_object) {
            Some(obj) => Self {
                x: Reading::from_json(obj.get("x")),
                y: Reading::from_json(obj.get("y")),
                z: Reading::from_json(obj.get("z")),
            },
            None => Self::default(),
        }
    }

    /// True when at least one axis was supplied.
    pub fn has_any(&self) -> bool {
        self.x.is_present() || self.y.is_present() || self.z.is_present()
    }
}

/// Orientation in degrees. Only built when roll and pitch are both numeric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Attitude {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Attitude {
    fn from_json(value: Option<&Value>) -> Option<Self> {
        let obj = value.and_then(Value::as_object)?;
        let roll = Reading::from_json(obj.get("roll")).value()?;
        let pitch = Reading::from_json(obj.get("pitch")).value()?;
        let yaw = Reading::from_json(obj.get("yaw")).value_or_zero();
        Some(Self { roll, pitch, yaw })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetrySample {
    #[serde(rename = "timestamp")]
    pub timestamp_millis: i64,
    pub accel: Vector3,
    pub gyro: Vector3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attitude: Option<Attitude>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl TelemetrySample {
    /// Normalize one inbound payload. Accepts `accel`/`accelerometer` and
    /// `gyro`/`gyroscope`; numbers may arrive as numeric strings.
    pub fn from_value(value: &Value, now_millis: i64) -> Result<Self, SessionError> {
        let obj = value.as_object().ok_or_else(|| {
            SessionError::Protocol(format!("telemetry payload is not an object: {value}"))
        })?;

        Ok(Self {
            timestamp_millis: timestamp_of(obj).unwrap_or(now_millis),
            accel: Vector3::from_json(aliased(obj, "accel", "accelerometer")),
            gyro: Vector3::from_json(aliased(obj, "gyro", "gyroscope")),
            attitude: Attitude::from_json(obj.get("attitude")),
            temperature: Reading::from_json(obj.get("temperature")).value(),
        })
    }
}

fn aliased<'a>(obj: &'a Map<String, Value>, primary: &str, alias: &str) -> Option<&'a Value> {
    obj.get(primary)
        .filter(|v| !v.is_null())
        .or_else(|| obj.get(alias))
}

fn timestamp_of(obj: &Map<String, Value>) -> Option<i64> {
    match obj.get("timestamp")? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|v| v as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accelerometer_alias_matches_accel() {
        let short = json!({"accel": {"x": 0.1, "y": -0.2, "z": 0.98}});
        let long = json!({"accelerometer": {"x": 0.1, "y": -0.2, "z": 0.98}});

        let a = TelemetrySample::from_value(&short, 1000).unwrap();
        let b = TelemetrySample::from_value(&long, 1000).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.accel.z.value(), Some(0.98));
    }

    #[test]
    fn test_gyroscope_alias_and_numeric_strings() {
        let payload = json!({"gyroscope": {"x": "1.5", "y": "2.0", "z": "3.0"}});
        let sample = TelemetrySample::from_value(&payload, 0).unwrap();
        assert_eq!(sample.gyro.x.value(), Some(1.5));
        assert_eq!(sample.gyro.y.value(), Some(2.0));
        assert_eq!(sample.gyro.z.value(), Some(3.0));
        assert!(sample.attitude.is_none());
    }

    #[test]
    fn test_reading_keeps_text_as_received() {
        let payload = json!({"accel": {"x": "1.50", "y": 2.0, "z": " 7 "}});
        let sample = TelemetrySample::from_value(&payload, 0).unwrap();
        assert_eq!(sample.accel.x.text(), Some("1.50"));
        assert_eq!(sample.accel.y.text(), Some("2.0"));
        assert_eq!(sample.accel.z.text(), Some("7"));
        assert_eq!(sample.accel.z.value(), Some(7.0));

        assert_eq!(Reading::fixed(0.5, 3).text(), Some("0.500"));
        assert_eq!(Reading::Malformed.text(), None);
    }

    #[test]
    fn test_malformed_axis_is_present_but_zero() {
        let payload = json!({"gyro": {"x": "abc", "z": true}});
        let sample = TelemetrySample::from_value(&payload, 0).unwrap();
        assert_eq!(sample.gyro.x, Reading::Malformed);
        assert_eq!(sample.gyro.y, Reading::Absent);
        assert!(sample.gyro.has_any());
        assert_eq!(sample.gyro.x.value_or_zero(), 0.0);
    }

    #[test]
    fn test_attitude_needs_roll_and_pitch() {
        let partial = json!({"attitude": {"roll": 10.0}});
        let sample = TelemetrySample::from_value(&partial, 0).unwrap();
        assert!(sample.attitude.is_none());

        let full = json!({"attitude": {"roll": "10.5", "pitch": -4}});
        let sample = TelemetrySample::from_value(&full, 0).unwrap();
        assert_eq!(
            sample.attitude,
            Some(Attitude { roll: 10.5, pitch: -4.0, yaw: 0.0 })
        );
    }

    #[test]
    fn test_timestamp_falls_back_to_clock() {
        let with = json!({"timestamp": 4242});
        let without = json!({});
        assert_eq!(TelemetrySample::from_value(&with, 7).unwrap().timestamp_millis, 4242);
        assert_eq!(TelemetrySample::from_value(&without, 7).unwrap().timestamp_millis, 7);
    }

    #[test]
    fn test_non_object_is_protocol_error() {
        let err = TelemetrySample::from_value(&json!([1, 2, 3]), 0).unwrap_err();
        assert!(matches!(err, SessionError::Protocol(_)));
    }

    #[test]
    fn test_serializes_missing_axes_as_null() {
        let payload = json!({"gyro": {"x": 1.0}, "temperature": 26.5});
        let sample = TelemetrySample::from_value(&payload, 12).unwrap();
        let text = serde_json::to_value(&sample).unwrap();
        assert_eq!(text["timestamp"], json!(12));
        assert_eq!(text["gyro"]["x"], json!(1.0));
        assert_eq!(text["gyro"]["y"], Value::Null);
        assert_eq!(text["temperature"], json!(26.5));
        assert!(text.get("attitude").is_none());
    }
}
