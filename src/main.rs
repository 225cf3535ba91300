// Main entry point - Dependency injection and event loop
mod application;
mod domain;
mod infrastructure;
mod presentation;

use futures::StreamExt;
use tracing_subscriber::EnvFilter;

use crate::application::demo_generator::DemoGenerator;
use crate::application::events::{event_channel, SessionEvent};
use crate::application::session_service::{Session, SessionDeps};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::demo_ticker::TokioDemoTicker;
use crate::infrastructure::ws_bridge::TungsteniteConnector;
use crate::presentation::console_display::ConsoleDisplay;
use crate::presentation::control_panel::{stdin_lines, ControlPanel, PanelOutcome, HELP};

// One thread, one owner: socket tasks and the demo ticker only post events.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Wire collaborators (infrastructure layer) into the session
    let (events_tx, mut events_rx) = event_channel();
    let deps = SessionDeps {
        connector: Box::new(TungsteniteConnector::new(events_tx.clone())),
        ticker: Box::new(TokioDemoTicker::new(events_tx)),
        clock: Box::new(SystemClock),
        display: Box::new(ConsoleDisplay::new()),
        demo: DemoGenerator::new(),
    };
    let mut session = Session::new(deps, config.session_settings());
    let mut panel = ControlPanel::new(&config);

    println!("Gyroscope dashboard, bridge at {}", config.bridge_url);
    println!("{HELP}");

    let commands = stdin_lines();
    futures::pin_mut!(commands);
    let mut stdin_open = true;

    loop {
        tokio::select! {
            Some(event) = events_rx.recv() => session.handle_event(event),
            line = commands.next(), if stdin_open => {
                let Some(line) = line else {
                    tracing::info!("stdin closed, press Ctrl+C to stop");
                    stdin_open = false;
                    continue;
                };
                match panel.interpret(&line) {
                    PanelOutcome::Event(event) => session.handle_event(event),
                    PanelOutcome::Updated(message) => tracing::info!("{message}"),
                    PanelOutcome::Rejected(message) => tracing::warn!("{message}"),
                    PanelOutcome::Status => print_status(&session),
                    PanelOutcome::Help => println!("{HELP}"),
                    PanelOutcome::Quit => break,
                    PanelOutcome::Empty => {}
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    println!("\nShutting down...");
    session.handle_event(SessionEvent::Disconnect);

    Ok(())
}

fn print_status(session: &Session) {
    let state = session.state();
    println!(
        "{} | logging: {} | demo: {} | ports: {} | chart: {}/{} | log: {}",
        state.status().text,
        state.logging,
        state.demo_active,
        session.ports().len(),
        session.chart().len(),
        session.chart().capacity(),
        session.log().len()
    );
}
