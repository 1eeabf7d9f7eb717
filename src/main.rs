mod calc;
mod catalog;
mod config;
mod grading;
mod ipc;
mod logging;
mod marks;
mod rank;
mod roster;
mod summary;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

fn initial_state() -> ipc::AppState {
    let mut state = ipc::AppState {
        config: config::EngineConfig::default(),
        config_path: None,
    };

    // Best-effort: a broken config file must not keep the sidecar from starting.
    if let Some(path) = std::env::var_os(config::CONFIG_ENV).map(PathBuf::from) {
        match config::load_config(&path) {
            Ok(cfg) => {
                tracing::info!(path = %path.display(), "config loaded");
                state.config = cfg;
                state.config_path = Some(path);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config ignored, using defaults");
            }
        }
    }
    state
}

fn main() {
    logging::init();
    let mut state = initial_state();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                tracing::warn!(error = %e, "unparseable request line");
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}
