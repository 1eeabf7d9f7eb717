use crate::config;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "configPath": state.config_path.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

fn handle_config_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    match serde_json::to_value(&state.config) {
        Ok(v) => ok(&req.id, v),
        Err(e) => err(&req.id, "internal", e.to_string(), None),
    }
}

fn handle_config_load(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(path) = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
    else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    if !path.is_file() {
        return err(
            &req.id,
            "config_read_failed",
            "config file not found",
            Some(json!({ "path": path.to_string_lossy() })),
        );
    }

    // A failed load keeps the previous config in force.
    match config::load_config(&path) {
        Ok(cfg) => {
            tracing::info!(path = %path.display(), "config loaded");
            state.config = cfg;
            state.config_path = Some(path.clone());
            ok(&req.id, json!({ "configPath": path.to_string_lossy() }))
        }
        Err(e) => err(
            &req.id,
            "config_parse_failed",
            format!("{e:#}"),
            Some(json!({ "path": path.to_string_lossy() })),
        ),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "config.get" => Some(handle_config_get(state, req)),
        "config.load" => Some(handle_config_load(state, req)),
        _ => None,
    }
}
