// Presentation layer - Console controls and display surface
pub mod console_display;
pub mod control_panel;
