use crate::ipc::error::{err, ok};
use crate::ipc::helpers::draft_view;
use crate::ipc::types::{AppState, Request};
use crate::store::{DraftPatch, Submitted, ValidationError};
use serde_json::json;

struct HandlerErr {
    code: &'static str,
    message: String,
}

impl HandlerErr {
    fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, None)
    }
}

fn bad_params(message: impl Into<String>) -> HandlerErr {
    HandlerErr {
        code: "bad_params",
        message: message.into(),
    }
}

fn require_string(key: &str, value: &serde_json::Value) -> Result<String, HandlerErr> {
    value
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| bad_params(format!("patch.{} must be a string", key)))
}

fn parse_patch(params: &serde_json::Value) -> Result<DraftPatch, HandlerErr> {
    let Some(patch) = params.get("patch").and_then(|v| v.as_object()) else {
        return Err(bad_params("missing/invalid patch"));
    };

    let mut out = DraftPatch::default();
    for (key, value) in patch {
        match key.as_str() {
            "firstName" => out.first_name = Some(require_string(key, value)?),
            "lastName" => out.last_name = Some(require_string(key, value)?),
            "subject" => out.subject = Some(require_string(key, value)?),
            "date" => out.date = Some(require_string(key, value)?),
            "score" => {
                let Some(v) = value.as_i64() else {
                    return Err(bad_params("patch.score must be an integer"));
                };
                out.score = Some(v);
            }
            other => {
                return Err(bad_params(format!("unknown patch field: {}", other)));
            }
        }
    }
    Ok(out)
}

fn validation_failed(req_id: &str, e: ValidationError) -> serde_json::Value {
    let details = match &e {
        ValidationError::ScoreOutOfRange(v) => json!({ "field": e.field(), "value": v }),
        ValidationError::MalformedDate(raw) => json!({ "field": e.field(), "value": raw }),
        _ => json!({ "field": e.field() }),
    };
    err(req_id, "validation_failed", e.to_string(), Some(details))
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, draft_view(&state.store))
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let patch = match parse_patch(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    match state.store.update_draft(patch) {
        Ok(()) => ok(&req.id, draft_view(&state.store)),
        Err(e) => validation_failed(&req.id, e),
    }
}

fn handle_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.store.submit() {
        Ok(outcome) => ok(
            &req.id,
            json!({
                "gradeId": outcome.id(),
                "created": matches!(outcome, Submitted::Created(_))
            }),
        ),
        Err(e) => validation_failed(&req.id, e),
    }
}

fn handle_clear(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.store.clear();
    ok(&req.id, draft_view(&state.store))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "draft.get" => Some(handle_get(state, req)),
        "draft.update" => Some(handle_update(state, req)),
        "draft.submit" => Some(handle_submit(state, req)),
        "draft.clear" => Some(handle_clear(state, req)),
        _ => None,
    }
}
