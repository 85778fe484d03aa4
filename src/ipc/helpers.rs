use serde_json::json;

use crate::store::{GradeRecord, GradeStore};

pub fn grade_json(record: &GradeRecord) -> serde_json::Value {
    json!({
        "id": record.id,
        "firstName": record.first_name,
        "lastName": record.last_name,
        "subject": record.subject,
        "score": record.score,
        "date": record.date.format("%Y-%m-%d").to_string(),
    })
}

/// The form-facing view: current draft plus the selection, if any.
pub fn draft_view(store: &GradeStore) -> serde_json::Value {
    let draft = store.draft();
    json!({
        "draft": {
            "id": draft.id,
            "firstName": draft.first_name,
            "lastName": draft.last_name,
            "subject": draft.subject,
            "score": draft.score,
            "date": draft.date.map(|d| d.format("%Y-%m-%d").to_string()),
        },
        "selectedGradeId": store.selected_id(),
    })
}
