use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use mlb_scoreboard::config::{Config, LogFormat};
use mlb_scoreboard::schedule::ScheduleClient;
use mlb_scoreboard::term::{self, LogGate};
use mlb_scoreboard::view::ScheduleView;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat, gate: LogGate) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(gate)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}

#[tokio::main]
async fn main() -> ExitCode {
    let gate = LogGate::new();
    let config = Config::from_env();
    init_tracing(config.as_ref().map(|c| c.log_format).unwrap_or_default(), gate.clone());
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::from(2);
        }
    };

    let client = ScheduleClient::new(config.schedule_url.clone(), config.timeout);
    info!(url = %client.url(), "Starting scoreboard");
    let mut view = ScheduleView::mount(Arc::new(client), config.layout());

    let interactive = std::io::stdout().is_terminal();
    let mut stdout = std::io::stdout().lock();

    // Logs are held while the skeleton is up so the redraw knows exactly what it is erasing
    let skeleton_height = if interactive {
        gate.hold();
        term::draw(&mut stdout, &view.render()).unwrap_or(0)
    } else {
        0
    };

    view.settle().await;
    let drawn = term::redraw(&mut stdout, skeleton_height, &view.render());

    if let Err(e) = gate.release() {
        eprintln!("failed to write held log output: {e}");
    }
    if let Err(e) = drawn {
        error!(error = %e, "Failed to write scoreboard");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
