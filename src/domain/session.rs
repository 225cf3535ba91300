// Session state model - bridge link, nested serial link, logging and demo flags

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    BridgeConnecting,
    BridgeConnected,
    SerialConnected {
        port: String,
        baudrate: u32,
    },
}

/// Status line shown next to the connection indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub text: String,
}

/// Labels and enablement for the user controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub connect_label: &'static str,
    pub serial_enabled: bool,
    pub serial_label: &'static str,
    pub logging_label: &'static str,
    pub demo_label: &'static str,
}

/// Serial connectivity is encoded inside the bridge state, so a serial link
/// without a bridge cannot be represented. Demo mode is independent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub connection: ConnectionState,
    pub logging: bool,
    pub demo_active: bool,
}

impl SessionState {
    pub fn bridge_connected(&self) -> bool {
        matches!(
            self.connection,
            ConnectionState::BridgeConnected | ConnectionState::SerialConnected { .. }
        )
    }

    pub fn serial_connected(&self) -> bool {
        matches!(self.connection, ConnectionState::SerialConnected { .. })
    }

    pub fn begin_connecting(&mut self) {
        self.connection = ConnectionState::BridgeConnecting;
    }

    pub fn bridge_opened(&mut self) {
        self.connection = ConnectionState::BridgeConnected;
    }

    /// Socket gone: drop back to `Disconnected` from any state.
    pub fn bridge_closed(&mut self) {
        self.connection = ConnectionState::Disconnected;
    }

    /// Apply the bridge's `connected` acknowledgement. Ignored without a bridge.
    pub fn serial_acknowledged(&mut self, port: String, baudrate: u32) -> bool {
        if !self.bridge_connected() {
            return false;
        }
        self.connection = ConnectionState::SerialConnected { port, baudrate };
        true
    }

    /// Apply the bridge's `disconnected` acknowledgement.
    pub fn serial_released(&mut self) -> bool {
        if !self.bridge_connected() {
            return false;
        }
        self.connection = ConnectionState::BridgeConnected;
        true
    }

    pub fn status(&self) -> ConnectionStatus {
        let (connected, text) = match &self.connection {
            ConnectionState::Disconnected => (false, "Disconnected".to_string()),
            ConnectionState::BridgeConnecting => (false, "Connecting...".to_string()),
            ConnectionState::BridgeConnected => (true, "Connected to Bridge".to_string()),
            ConnectionState::SerialConnected { port, baudrate } => {
                (true, format!("Serial: {port} @ {baudrate}"))
            }
        };
        ConnectionStatus { connected, text }
    }

    pub fn controls(&self) -> ControlState {
        ControlState {
            connect_label: if self.bridge_connected() {
                "Disconnect"
            } else {
                "Connect to Bridge"
            },
            serial_enabled: self.bridge_connected(),
            serial_label: if self.serial_connected() {
                "Disconnect Serial"
            } else {
                "Connect Serial"
            },
            logging_label: if self.logging {
                "Stop Logging"
            } else {
                "Start Logging"
            },
            demo_label: if self.demo_active {
                "Stop Demo"
            } else {
                "Demo Mode"
            },
        }
    }
}
