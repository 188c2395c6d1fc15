use crate::backup;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::store::ClassStore;
use serde_json::json;
use std::path::PathBuf;

fn handle_backup_export(state: &mut AppState, req: &Request) -> serde_json::Value {
    let workspace = match req.params.get("workspacePath").and_then(|v| v.as_str()) {
        Some(v) => PathBuf::from(v),
        None => match state.workspace.clone() {
            Some(p) => p,
            None => {
                return err(
                    &req.id,
                    "bad_params",
                    "missing workspacePath and no workspace selected",
                    None,
                )
            }
        },
    };
    let Some(out_path) = req
        .params
        .get("outPath")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
    else {
        return err(&req.id, "bad_params", "missing params.outPath", None);
    };

    match backup::export_workspace_bundle(&workspace, &out_path) {
        Ok(summary) => ok(
            &req.id,
            json!({
                "bundleFormat": summary.bundle_format,
                "entryCount": summary.entry_count,
                "rosterSha256": summary.roster_sha256,
            }),
        ),
        Err(e) => err(&req.id, "backup_export_failed", format!("{e:?}"), None),
    }
}

fn handle_backup_import(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(in_path) = req
        .params
        .get("inPath")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
    else {
        return err(&req.id, "bad_params", "missing params.inPath", None);
    };
    let Some(workspace) = req
        .params
        .get("workspacePath")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
    else {
        return err(&req.id, "bad_params", "missing params.workspacePath", None);
    };

    match backup::import_workspace_bundle(&in_path, &workspace) {
        Ok(summary) => {
            // The import replaced the file under a live store; reload so the
            // in-memory roster matches what was just restored.
            if state.workspace.as_deref() == Some(workspace.as_path()) {
                match ClassStore::open(&workspace) {
                    Ok(store) => state.store = Some(store),
                    Err(e) => return err(&req.id, "roster_unreadable", e.to_string(), None),
                }
            }
            ok(
                &req.id,
                json!({ "bundleFormatDetected": summary.bundle_format_detected }),
            )
        }
        Err(e) => err(&req.id, "backup_import_failed", format!("{e:?}"), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "backup.exportBundle" => Some(handle_backup_export(state, req)),
        "backup.importBundle" => Some(handle_backup_import(state, req)),
        _ => None,
    }
}
