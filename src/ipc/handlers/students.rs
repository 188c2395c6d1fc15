use crate::ipc::error::{err, ok, store_err};
use crate::ipc::types::{AppState, Request};
use crate::model::Student;
use serde_json::json;
use uuid::Uuid;

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
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

    // Student numbers can come from the operator (school-issued ids), so an
    // explicit id is accepted and validated; otherwise one is generated.
    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => {
            let v = v.trim();
            if v.is_empty() {
                return err(&req.id, "bad_params", "studentId must not be empty", None);
            }
            if store.student_id_exists(&class_id, v) {
                return err(
                    &req.id,
                    "id_taken",
                    format!("student id {:?} already in use in this class", v),
                    None,
                );
            }
            v.to_string()
        }
        None => Uuid::new_v4().to_string(),
    };

    let student = Student {
        id: student_id.clone(),
        name: name.clone(),
    };
    if let Err(e) = store.add_student(&class_id, student) {
        return store_err(&req.id, e);
    }

    ok(&req.id, json!({ "studentId": student_id, "name": name }))
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let class_id = match req.params.get("classId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing classId", None),
    };
    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing studentId", None),
    };

    match store.remove_student(class_id, student_id) {
        Ok(true) => ok(&req.id, json!({ "ok": true })),
        Ok(false) => err(&req.id, "not_found", "student not found", None),
        Err(e) => store_err(&req.id, e),
    }
}

fn handle_students_id_exists(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match req.params.get("classId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing classId", None),
    };
    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing studentId", None),
    };

    let exists = state
        .store
        .as_ref()
        .map(|s| s.student_id_exists(class_id, student_id))
        .unwrap_or(false);
    ok(&req.id, json!({ "exists": exists }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.create" => Some(handle_students_create(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        "students.idExists" => Some(handle_students_id_exists(state, req)),
        _ => None,
    }
}
