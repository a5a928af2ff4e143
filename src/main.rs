//! Focus Bell - a focus timer with periodic reminders
//!
//! This is the main entry point for the focus-bell application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focus_bell::{
    config::Config,
    services::{DesktopNotifier, LogNotifier},
    state::{AppState, Preferences},
    api::create_router,
    tasks::{reminder_task, status_refresh_task},
    timer::format_hms,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_bell={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-bell v{}", env!("CARGO_PKG_VERSION"));

    // CLI flags win over saved preferences
    let prefs_path = config.preferences_path();
    let prefs = config.resolve(Preferences::load(&prefs_path));
    info!(
        "Configuration: host={}, port={}, interval={}, sound={:?}",
        config.host,
        config.port,
        format_hms(prefs.interval()),
        prefs.custom_sound_path
    );

    let custom_sound = prefs.custom_sound_path.clone();
    let (state, reminder_rx) = AppState::new(config.port, config.host.clone(), prefs, Some(prefs_path));
    let state = Arc::new(state);

    // Deliver reminders off the timer's callback path
    if config.no_notify {
        tokio::spawn(reminder_task(Arc::clone(&state), LogNotifier, reminder_rx));
    } else {
        let notifier = DesktopNotifier::detect(custom_sound.as_deref()).await;
        info!("Reminder sound: {}", notifier.sound().display());
        tokio::spawn(reminder_task(Arc::clone(&state), notifier, reminder_rx));
    }

    // Refresh the status title once per second
    tokio::spawn(status_refresh_task(Arc::clone(&state)));

    if config.autostart {
        state.start();
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start     - Start the focus timer");
    info!("  POST /pause     - Pause the running timer");
    info!("  POST /resume    - Resume the paused timer");
    info!("  POST /stop      - Stop and reset the timer");
    info!("  PUT  /interval  - Set the reminder interval (idle only)");
    info!("  GET  /status    - Check elapsed time and next reminder");
    info!("  GET  /health    - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
