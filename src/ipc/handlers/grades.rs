use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{draft_view, grade_json};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn require_grade_id(req: &Request) -> Result<i64, serde_json::Value> {
    match req.params.get("gradeId").and_then(|v| v.as_i64()) {
        Some(v) => Ok(v),
        None => Err(err(&req.id, "bad_params", "missing gradeId", None)),
    }
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let grades: Vec<serde_json::Value> = state.store.records().iter().map(grade_json).collect();
    ok(&req.id, json!({ "grades": grades }))
}

fn handle_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let grade_id = match require_grade_id(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !state.store.select(grade_id) {
        return err(
            &req.id,
            "not_found",
            "grade not found",
            Some(json!({ "gradeId": grade_id })),
        );
    }
    ok(&req.id, draft_view(&state.store))
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let grade_id = match require_grade_id(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !state.store.delete(grade_id) {
        return err(
            &req.id,
            "not_found",
            "grade not found",
            Some(json!({ "gradeId": grade_id })),
        );
    }
    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.list" => Some(handle_list(state, req)),
        "grades.select" => Some(handle_select(state, req)),
        "grades.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
