mod bootstrap;

use anyhow::Result;
use parley_core::settings::Settings;
use parley_net::auth::{AuthClient, AuthSession};
use parley_runtime::orchestrator::RuntimeOrchestrator;
use parley_ui::app::{self, App};
use parley_ui::themes::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Parley v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Server: {}, Auth: {}, Theme: {}",
        settings.server_url,
        settings.auth_url,
        settings.theme
    );

    if settings.logout {
        AuthSession::clear()?;
        println!("Signed out.");
        return Ok(());
    }

    let theme = Theme::from_name(&settings.theme);

    // Session-absent → sign-in form; session-present → straight to the app.
    let session = match AuthSession::load() {
        Some(session) => session,
        None => {
            let auth = AuthClient::new(settings.auth_url.clone());
            match app::run_signin(&auth, &theme).await? {
                Some(session) => {
                    session.save()?;
                    session
                }
                // The user backed out of the form.
                None => return Ok(()),
            }
        }
    };

    tracing::info!(user_id = %session.user_id, "session present; starting runtime");

    let orchestrator =
        RuntimeOrchestrator::new(settings.server_url.clone(), session.user_id.clone());
    let (rx, cmd_tx, handle) = orchestrator.start();

    let app = App::new(&settings.theme, session.email.clone());

    // Run the TUI event loop. The loop exits on 'q' / Ctrl+C inside the TUI.
    // We also listen for Ctrl+C at the OS level so that signals received
    // while the terminal is in raw mode are handled cleanly.
    tokio::select! {
        result = app.run(rx, cmd_tx) => {
            handle.abort();
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down runtime task");
            handle.abort();
        }
    }

    Ok(())
}
