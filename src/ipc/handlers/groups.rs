use crate::ipc::error::{err, ok, store_err};
use crate::ipc::types::{AppState, Request};
use crate::model::Group;
use serde_json::json;
use uuid::Uuid;

fn handle_groups_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let class_id = match req.params.get("classId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing classId", None),
    };
    let name = match req.params.get("name").and_then(|v| v.as_str()) {
        Some(v) => v.trim().to_string(),
        None => return err(&req.id, "bad_params", "missing name", None),
    };
    if name.is_empty() {
        return err(&req.id, "bad_params", "name must not be empty", None);
    }
    // Group names are unique within their class; checked here, before
    // insert, the same way the class-name check guards classes.create.
    if store.group_name_exists(&class_id, &name) {
        return err(
            &req.id,
            "name_taken",
            format!("a group named {:?} already exists in this class", name),
            None,
        );
    }

    let group_id = Uuid::new_v4().to_string();
    let group = Group {
        id: group_id.clone(),
        name: name.clone(),
        students: Vec::new(),
    };
    if let Err(e) = store.add_group(&class_id, group) {
        return store_err(&req.id, e);
    }

    ok(&req.id, json!({ "groupId": group_id, "name": name }))
}

fn handle_groups_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
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

    match store.remove_group(class_id, group_id) {
        Ok(true) => ok(&req.id, json!({ "ok": true })),
        Ok(false) => err(&req.id, "not_found", "group not found", None),
        Err(e) => store_err(&req.id, e),
    }
}

fn handle_groups_name_exists(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match req.params.get("classId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing classId", None),
    };
    let name = match req.params.get("name").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing name", None),
    };

    let exists = state
        .store
        .as_ref()
        .map(|s| s.group_name_exists(class_id, name))
        .unwrap_or(false);
    ok(&req.id, json!({ "exists": exists }))
}

fn handle_groups_assign(state: &mut AppState, req: &Request) -> serde_json::Value {
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
    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing studentId", None),
    };

    match store.assign_student(class_id, group_id, student_id) {
        Ok(assigned) => ok(&req.id, json!({ "assigned": assigned })),
        Err(e) => store_err(&req.id, e),
    }
}

fn handle_groups_unassign(state: &mut AppState, req: &Request) -> serde_json::Value {
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
    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing studentId", None),
    };

    match store.unassign_student(class_id, group_id, student_id) {
        Ok(removed) => ok(&req.id, json!({ "removed": removed })),
        Err(e) => store_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "groups.create" => Some(handle_groups_create(state, req)),
        "groups.delete" => Some(handle_groups_delete(state, req)),
        "groups.nameExists" => Some(handle_groups_name_exists(state, req)),
        "groups.assign" => Some(handle_groups_assign(state, req)),
        "groups.unassign" => Some(handle_groups_unassign(state, req)),
        _ => None,
    }
}
