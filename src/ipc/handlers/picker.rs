use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

// "Nothing to pick from" is a normal result, not an error: a missing class,
// an unknown group, or an empty target list all answer with null.

fn handle_pick_group(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let class_id = match req.params.get("classId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing classId", None),
    };

    ok(&req.id, json!({ "group": store.pick_group(class_id) }))
}

fn handle_pick_student(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let class_id = match req.params.get("classId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing classId", None),
    };

    ok(&req.id, json!({ "student": store.pick_student(class_id) }))
}

fn handle_pick_student_from_group(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let class_id = match req.params.get("classId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing classId", None),
    };
    let group_id = match req.params.get("groupId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing groupId", None),
    };

    ok(
        &req.id,
        json!({ "student": store.pick_student_from_group(class_id, group_id) }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "pick.group" => Some(handle_pick_group(state, req)),
        "pick.student" => Some(handle_pick_student(state, req)),
        "pick.studentFromGroup" => Some(handle_pick_student_from_group(state, req)),
        _ => None,
    }
}
