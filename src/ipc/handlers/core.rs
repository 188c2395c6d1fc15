use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::store::{ClassStore, StoreError};
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    match ClassStore::open(&path) {
        Ok(store) => {
            let count = store.classes().len();
            state.workspace = Some(path.clone());
            state.store = Some(store);
            ok(
                &req.id,
                json!({
                    "workspacePath": path.to_string_lossy(),
                    "classCount": count
                }),
            )
        }
        // A present-but-unreadable roster gets its own code so the front-end
        // can warn the user instead of showing an empty list.
        Err(
            e @ (StoreError::Malformed(_)
            | StoreError::UnsupportedFormat(_)
            | StoreError::UnsupportedVersion(_)),
        ) => err(&req.id, "roster_unreadable", e.to_string(), None),
        Err(e) => err(&req.id, "store_open_failed", e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        _ => None,
    }
}
