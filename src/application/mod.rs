// Application layer - Session state machine, render pipeline and demo source
pub mod collaborators;
pub mod demo_generator;
pub mod events;
pub mod render_pipeline;
pub mod session_service;
pub mod view;
