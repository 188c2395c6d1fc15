use crate::store::StoreError;
use serde_json::json;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Map a store failure onto the wire error codes the front-end switches on.
pub fn store_err(id: &str, e: StoreError) -> serde_json::Value {
    let code = match &e {
        StoreError::ClassNotFound(_)
        | StoreError::GroupNotFound(_)
        | StoreError::StudentNotFound(_) => "not_found",
        StoreError::DuplicateClassId(_)
        | StoreError::DuplicateGroupId(_)
        | StoreError::DuplicateStudentId(_) => "id_taken",
        StoreError::Malformed(_)
        | StoreError::UnsupportedFormat(_)
        | StoreError::UnsupportedVersion(_) => "roster_unreadable",
        StoreError::Io(_) => "store_io_failed",
    };
    err(id, code, e.to_string(), None)
}
