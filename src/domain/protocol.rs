// Bridge wire protocol - outbound commands and inbound message classification
use crate::domain::error::SessionError;
use crate::domain::telemetry::TelemetrySample;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Commands sent to the bridge as JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeCommand {
    ListPorts,
    Connect { port: String, baudrate: u32 },
    Disconnect,
}

impl BridgeCommand {
    pub fn encode(&self) -> Result<String, SessionError> {
        serde_json::to_string(self).map_err(|e| SessionError::Protocol(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDescriptor {
    pub port: String,
    #[serde(default)]
    pub description: String,
}

impl PortDescriptor {
    pub fn label(&self) -> String {
        format!("{} - {}", self.port, self.description)
    }
}

#[derive(Debug, Deserialize)]
struct ConnectedAck {
    #[serde(default)]
    port: String,
    #[serde(default)]
    baudrate: u32,
}

/// One classified message from the bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    Ports(Vec<PortDescriptor>),
    Connected { port: String, baudrate: u32 },
    Disconnected,
    PeerError { message: String },
    Raw { data: String },
    /// Anything without a recognized `type`.
    Telemetry(TelemetrySample),
}

impl InboundMessage {
    pub fn parse(text: &str, now_millis: i64) -> Result<Self, SessionError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| SessionError::Protocol(e.to_string()))?;

        match value.get("type").and_then(Value::as_str) {
            Some("ports") => {
                let data = value.get("data").cloned().unwrap_or(Value::Array(Vec::new()));
                let ports = serde_json::from_value(data)
                    .map_err(|e| SessionError::Protocol(format!("bad port list: {e}")))?;
                Ok(InboundMessage::Ports(ports))
            }
            Some("connected") => {
                let ack = ConnectedAck::deserialize(&value)
                    .map_err(|e| SessionError::Protocol(format!("bad connected ack: {e}")))?;
                Ok(InboundMessage::Connected {
                    port: ack.port,
                    baudrate: ack.baudrate,
                })
            }
            Some("disconnected") => Ok(InboundMessage::Disconnected),
            Some("error") => Ok(InboundMessage::PeerError {
                message: text_field(&value, "message"),
            }),
            Some("raw") => Ok(InboundMessage::Raw {
                data: text_field(&value, "data"),
            }),
            _ => TelemetrySample::from_value(&value, now_millis).map(InboundMessage::Telemetry),
        }
    }
}

fn text_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
