// Infrastructure layer - External dependencies and adapters
pub mod clock;
pub mod config;
pub mod demo_ticker;
pub mod ws_bridge;
