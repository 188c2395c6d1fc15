use crate::ipc::error::{err, ok, store_err};
use crate::ipc::types::{AppState, Request};
use crate::model::SchoolClass;
use serde_json::json;
use uuid::Uuid;

fn handle_classes_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return ok(&req.id, json!({ "classes": [] }));
    };

    // Counts feed the list renderer ("Math (24 students, 4 groups)").
    // Roster order, not sorted; the list view shows insertion order.
    let classes: Vec<serde_json::Value> = store
        .classes()
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "name": c.name,
                "studentCount": c.students.len(),
                "groupCount": c.groups.len(),
            })
        })
        .collect();

    ok(&req.id, json!({ "classes": classes }))
}

fn handle_classes_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let class_id = match req.params.get("classId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing classId", None),
    };

    match store.class_by_id(class_id) {
        Some(class) => ok(&req.id, json!({ "class": class })),
        None => err(&req.id, "not_found", "class not found", None),
    }
}

fn handle_classes_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let name = match req.params.get("name").and_then(|v| v.as_str()) {
        Some(v) => v.trim().to_string(),
        None => return err(&req.id, "bad_params", "missing name", None),
    };
    if name.is_empty() {
        return err(&req.id, "bad_params", "name must not be empty", None);
    }
    if store.class_name_exists(&name) {
        return err(
            &req.id,
            "name_taken",
            format!("a class named {:?} already exists", name),
            None,
        );
    }

    let class_id = Uuid::new_v4().to_string();
    let class = SchoolClass {
        id: class_id.clone(),
        name: name.clone(),
        groups: Vec::new(),
        students: Vec::new(),
    };
    if let Err(e) = store.add_class(class) {
        return store_err(&req.id, e);
    }

    ok(&req.id, json!({ "classId": class_id, "name": name }))
}

fn handle_classes_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let class_id = match req.params.get("classId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing classId", None),
    };

    match store.remove_class(class_id) {
        Ok(true) => ok(&req.id, json!({ "ok": true })),
        Ok(false) => err(&req.id, "not_found", "class not found", None),
        Err(e) => store_err(&req.id, e),
    }
}

fn handle_classes_name_exists(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match req.params.get("name").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing name", None),
    };

    let exists = state
        .store
        .as_ref()
        .map(|s| s.class_name_exists(name))
        .unwrap_or(false);
    ok(&req.id, json!({ "exists": exists }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(handle_classes_list(state, req)),
        "classes.get" => Some(handle_classes_get(state, req)),
        "classes.create" => Some(handle_classes_create(state, req)),
        "classes.delete" => Some(handle_classes_delete(state, req)),
        "classes.nameExists" => Some(handle_classes_name_exists(state, req)),
        _ => None,
    }
}
