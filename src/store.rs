use chrono::NaiveDate;
use thiserror::Error;

pub const SCORE_MIN: i64 = 2;
pub const SCORE_MAX: i64 = 6;

/// A committed grade entry. Ids come from a monotonic counter and are
/// never reused or renumbered; list position is derived from insertion
/// order, not stored on the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub subject: String,
    pub score: i64,
    pub date: NaiveDate,
}

/// The in-progress entry bound to the form. Text fields may be empty and
/// score/date unset until submit. `id` is the next free id in create mode,
/// or the selected record's id in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeDraft {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub subject: String,
    pub score: Option<i64>,
    pub date: Option<NaiveDate>,
}

impl GradeDraft {
    fn empty(id: i64) -> Self {
        GradeDraft {
            id,
            first_name: String::new(),
            last_name: String::new(),
            subject: String::new(),
            score: None,
            date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    FirstName,
    LastName,
    Subject,
}

impl TextField {
    pub fn key(self) -> &'static str {
        match self {
            TextField::FirstName => "firstName",
            TextField::LastName => "lastName",
            TextField::Subject => "subject",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} must not be empty", .0.key())]
    EmptyField(TextField),
    #[error("score is required")]
    MissingScore,
    #[error("score must be between 2 and 6 (got {0})")]
    ScoreOutOfRange(i64),
    #[error("date is required")]
    MissingDate,
    #[error("date must be a valid YYYY-MM-DD date (got {0:?})")]
    MalformedDate(String),
}

impl ValidationError {
    /// The wire key of the field the error is about.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyField(f) => f.key(),
            ValidationError::MissingScore | ValidationError::ScoreOutOfRange(_) => "score",
            ValidationError::MissingDate | ValidationError::MalformedDate(_) => "date",
        }
    }
}

/// Partial edit applied to the draft; absent fields are left as they are.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DraftPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub subject: Option<String>,
    pub score: Option<i64>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Created(i64),
    Updated(i64),
}

impl Submitted {
    pub fn id(self) -> i64 {
        match self {
            Submitted::Created(id) | Submitted::Updated(id) => id,
        }
    }
}

/// In-memory grade collection plus the selection and form-draft state.
///
/// Invariants:
/// - record ids are unique; the counter only moves forward, so deleted ids
///   are never handed out again
/// - `selected_id`, when set, names a live record
/// - `draft.id` equals `selected_id` in edit mode and `next_id` otherwise
#[derive(Debug)]
pub struct GradeStore {
    records: Vec<GradeRecord>,
    selected_id: Option<i64>,
    draft: GradeDraft,
    next_id: i64,
}

impl Default for GradeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GradeStore {
    pub fn new() -> Self {
        GradeStore {
            records: Vec::new(),
            selected_id: None,
            draft: GradeDraft::empty(1),
            next_id: 1,
        }
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[GradeRecord] {
        &self.records
    }

    pub fn draft(&self) -> &GradeDraft {
        &self.draft
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected_id
    }

    /// Applies a partial edit to the draft. Text fields are trimmed on
    /// entry. A malformed date rejects the whole patch, so a failed update
    /// never half-applies.
    pub fn update_draft(&mut self, patch: DraftPatch) -> Result<(), ValidationError> {
        let date = match patch.date {
            Some(raw) => Some(parse_iso_date(&raw)?),
            None => None,
        };
        if let Some(d) = date {
            self.draft.date = Some(d);
        }
        if let Some(v) = patch.first_name {
            self.draft.first_name = v.trim().to_string();
        }
        if let Some(v) = patch.last_name {
            self.draft.last_name = v.trim().to_string();
        }
        if let Some(v) = patch.subject {
            self.draft.subject = v.trim().to_string();
        }
        if let Some(v) = patch.score {
            self.draft.score = Some(v);
        }
        Ok(())
    }

    /// Commits the draft: replaces the selected record in place when in
    /// edit mode, appends a new record otherwise. On success the draft
    /// resets to empty with the next free id and the selection clears;
    /// on failure nothing changes.
    pub fn submit(&mut self) -> Result<Submitted, ValidationError> {
        if self.draft.first_name.is_empty() {
            return Err(ValidationError::EmptyField(TextField::FirstName));
        }
        if self.draft.last_name.is_empty() {
            return Err(ValidationError::EmptyField(TextField::LastName));
        }
        if self.draft.subject.is_empty() {
            return Err(ValidationError::EmptyField(TextField::Subject));
        }
        let score = self.draft.score.ok_or(ValidationError::MissingScore)?;
        if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
            return Err(ValidationError::ScoreOutOfRange(score));
        }
        let date = self.draft.date.ok_or(ValidationError::MissingDate)?;

        let id = self.draft.id;
        let record = GradeRecord {
            id,
            first_name: self.draft.first_name.clone(),
            last_name: self.draft.last_name.clone(),
            subject: self.draft.subject.clone(),
            score,
            date,
        };

        let slot = self
            .selected_id
            .and_then(|sel| self.records.iter_mut().find(|r| r.id == sel));
        let outcome = match slot {
            Some(existing) => {
                *existing = record;
                Submitted::Updated(id)
            }
            None => {
                self.records.push(record);
                self.next_id += 1;
                Submitted::Created(id)
            }
        };

        self.selected_id = None;
        self.draft = GradeDraft::empty(self.next_id);
        Ok(outcome)
    }

    /// Enters edit mode for the record with the given id, copying it into
    /// the draft. Returns false when no such record exists.
    pub fn select(&mut self, id: i64) -> bool {
        let Some(record) = self.records.iter().find(|r| r.id == id) else {
            return false;
        };
        self.draft = GradeDraft {
            id: record.id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            subject: record.subject.clone(),
            score: Some(record.score),
            date: Some(record.date),
        };
        self.selected_id = Some(id);
        true
    }

    /// Removes the record with the given id. Remaining ids are untouched
    /// and the id counter never moves backward. Deleting the selected
    /// record exits edit mode and resets the draft. Returns false when no
    /// such record exists.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return false;
        }
        if self.selected_id == Some(id) {
            self.selected_id = None;
            self.draft = GradeDraft::empty(self.next_id);
        }
        true
    }

    /// Resets the draft to empty fields and exits edit mode.
    pub fn clear(&mut self) {
        self.selected_id = None;
        self.draft = GradeDraft::empty(self.next_id);
    }
}

pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::MalformedDate(trimmed.to_string()))
}
