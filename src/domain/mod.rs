// Domain layer - Pure types, bounded buffers and wire shapes
pub mod error;
pub mod history;
pub mod log;
pub mod protocol;
pub mod session;
pub mod telemetry;
