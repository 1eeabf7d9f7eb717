use crate::ipc::error::{calc_err, ok};
use crate::ipc::helpers::parse_catalog;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_catalog_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "subjects": state.config.catalog.all() }))
}

fn handle_catalog_set(state: &mut AppState, req: &Request) -> serde_json::Value {
    let raw = req.params.get("subjects").cloned().unwrap_or(json!(null));
    match parse_catalog(&raw) {
        Ok(catalog) => {
            tracing::info!(subjects = catalog.all().len(), "catalog replaced");
            state.config.catalog = catalog;
            ok(&req.id, json!({ "subjects": state.config.catalog.all() }))
        }
        Err(e) => calc_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "catalog.get" => Some(handle_catalog_get(state, req)),
        "catalog.set" => Some(handle_catalog_set(state, req)),
        _ => None,
    }
}
