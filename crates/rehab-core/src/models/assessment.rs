use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A single rated item as supplied by a clinician or read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemValue {
    pub item_id: String,
    pub value: i32,
}

impl ItemValue {
    pub fn new(item_id: impl Into<String>, value: i32) -> Self {
        Self {
            item_id: item_id.into(),
            value,
        }
    }
}

/// A committed assessment as handed to the record layer.
///
/// `total_score` and the optional subscale scores are always the engine's
/// output for `items`; the record layer stores and returns them unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub instrument_id: String,
    pub assessed_by: String,
    pub assessment_date: jiff::civil::Date,
    pub items: Vec<ItemValue>,
    pub total_score: i32,
    /// FIM only.
    pub motor_score: Option<i32>,
    /// FIM only.
    pub cognitive_score: Option<i32>,
    pub notes: Option<String>,
    pub goals: Option<String>,
    pub recommendations: Option<String>,
    pub is_baseline: bool,
    pub is_complete: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// Fields that may change after an assessment is committed.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NarrativeUpdate {
    pub notes: Option<String>,
    pub goals: Option<String>,
    pub recommendations: Option<String>,
    pub is_baseline: Option<bool>,
    pub is_complete: Option<bool>,
}

impl Assessment {
    /// Apply a narrative update. Scores, items and dates are untouched.
    pub fn apply_narrative(&mut self, update: NarrativeUpdate, now: jiff::Timestamp) {
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        if let Some(goals) = update.goals {
            self.goals = Some(goals);
        }
        if let Some(recommendations) = update.recommendations {
            self.recommendations = Some(recommendations);
        }
        if let Some(is_baseline) = update.is_baseline {
            self.is_baseline = is_baseline;
        }
        if let Some(is_complete) = update.is_complete {
            self.is_complete = is_complete;
        }
        self.updated_at = now;
    }
}
