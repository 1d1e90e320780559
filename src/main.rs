mod calendar;
mod color;
mod config;
mod course;
mod custom;
mod display;
mod grid;
mod ipc;
mod merge;
mod parse;
mod session;

use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

fn init_tracing() {
    // stdout carries the protocol; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config_path = config::config_path_from_args(std::env::args().skip(1));
    let engine_config = config::EngineConfig::load(config_path)?;
    info!(
        weeks = engine_config.weeks.count,
        palette = engine_config.palette.colors.len(),
        "timetabled starting"
    );

    let mut state = ipc::AppState {
        session: session::TimetableSession::new(engine_config),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "stdin closed with error");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "unparseable request line");
                // Can't reply without id.
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() },
                });
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        debug!(id = %req.id, method = %req.method, "request");
        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    info!("timetabled shutting down");
    Ok(())
}
