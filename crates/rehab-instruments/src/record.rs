//! Assessment records: a draft becomes committed only after it validates.
//!
//! A [`CommittedAssessment`] owns its items, dates and score. None of those
//! can change after commit; only the narrative fields and the
//! baseline/complete flags can. Scores are never accepted from a caller.

use rehab_core::models::assessment::{Assessment, ItemValue, NarrativeUpdate};
use uuid::Uuid;

use crate::InstrumentKind;
use crate::banding::Interpretation;
use crate::instruments::fim;
use crate::scoring::{self, ScoreCard};
use crate::validation::{ValidatedItems, ValidationErrors};

/// An assessment that has not been validated or scored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentDraft {
    pub instrument: InstrumentKind,
    pub patient_id: Uuid,
    pub assessed_by: String,
    pub assessment_date: jiff::civil::Date,
    pub admission_date: jiff::civil::Date,
    pub items: Vec<ItemValue>,
    pub notes: Option<String>,
    pub goals: Option<String>,
    pub recommendations: Option<String>,
    pub is_baseline: bool,
    pub is_complete: bool,
}

impl AssessmentDraft {
    pub fn new(
        instrument: InstrumentKind,
        patient_id: Uuid,
        assessment_date: jiff::civil::Date,
        admission_date: jiff::civil::Date,
        items: Vec<ItemValue>,
    ) -> Self {
        Self {
            instrument,
            patient_id,
            assessed_by: String::new(),
            assessment_date,
            admission_date,
            items,
            notes: None,
            goals: None,
            recommendations: None,
            is_baseline: false,
            is_complete: true,
        }
    }

    pub fn assessed_by(mut self, assessed_by: impl Into<String>) -> Self {
        self.assessed_by = assessed_by.into();
        self
    }

    pub fn baseline(mut self, is_baseline: bool) -> Self {
        self.is_baseline = is_baseline;
        self
    }

    pub fn complete(mut self, is_complete: bool) -> Self {
        self.is_complete = is_complete;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn goals(mut self, goals: impl Into<String>) -> Self {
        self.goals = Some(goals.into());
        self
    }

    pub fn recommendations(mut self, recommendations: impl Into<String>) -> Self {
        self.recommendations = Some(recommendations.into());
        self
    }

    /// Validate items and dates, then score.
    ///
    /// On failure the draft comes back untouched alongside every error found.
    pub fn commit(self, today: jiff::civil::Date) -> Result<CommittedAssessment, RejectedDraft> {
        let instrument = self.instrument.instrument();
        let validated = match instrument.validate(
            &self.items,
            self.assessment_date,
            self.admission_date,
            today,
        ) {
            Ok(v) => v,
            Err(errors) => {
                tracing::warn!(
                    instrument_id = instrument.id(),
                    patient_id = %self.patient_id,
                    error_count = errors.len(),
                    "assessment draft rejected"
                );
                return Err(RejectedDraft {
                    draft: self,
                    errors,
                });
            }
        };

        let score = scoring::score(&validated);
        tracing::info!(
            instrument_id = instrument.id(),
            patient_id = %self.patient_id,
            total_score = score.total,
            "assessment committed"
        );

        Ok(CommittedAssessment {
            instrument: self.instrument,
            patient_id: self.patient_id,
            assessed_by: self.assessed_by,
            assessment_date: self.assessment_date,
            validated,
            score,
            notes: self.notes,
            goals: self.goals,
            recommendations: self.recommendations,
            is_baseline: self.is_baseline,
            is_complete: self.is_complete,
        })
    }
}

/// A draft that failed validation, with the complete error set.
#[derive(Debug, Clone)]
pub struct RejectedDraft {
    pub draft: AssessmentDraft,
    pub errors: ValidationErrors,
}

impl RejectedDraft {
    pub fn into_draft(self) -> AssessmentDraft {
        self.draft
    }
}

/// A validated, scored assessment.
#[derive(Debug, Clone)]
pub struct CommittedAssessment {
    instrument: InstrumentKind,
    patient_id: Uuid,
    assessed_by: String,
    assessment_date: jiff::civil::Date,
    validated: ValidatedItems,
    score: ScoreCard,
    notes: Option<String>,
    goals: Option<String>,
    recommendations: Option<String>,
    is_baseline: bool,
    is_complete: bool,
}

impl CommittedAssessment {
    pub fn instrument(&self) -> InstrumentKind {
        self.instrument
    }

    pub fn patient_id(&self) -> Uuid {
        self.patient_id
    }

    pub fn assessed_by(&self) -> &str {
        &self.assessed_by
    }

    pub fn assessment_date(&self) -> jiff::civil::Date {
        self.assessment_date
    }

    pub fn items(&self) -> &ValidatedItems {
        &self.validated
    }

    pub fn score(&self) -> &ScoreCard {
        &self.score
    }

    pub fn total_score(&self) -> i32 {
        self.score.total
    }

    /// Band label, recomputed from the stored total on every call.
    pub fn interpret(&self) -> &'static str {
        self.validated.definition().band_for(self.score.total).label
    }

    pub fn interpretation(&self) -> Interpretation {
        self.validated.definition().interpretation(self.score.total)
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn goals(&self) -> Option<&str> {
        self.goals.as_deref()
    }

    pub fn recommendations(&self) -> Option<&str> {
        self.recommendations.as_deref()
    }

    pub fn is_baseline(&self) -> bool {
        self.is_baseline
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    pub fn set_goals(&mut self, goals: Option<String>) {
        self.goals = goals;
    }

    pub fn set_recommendations(&mut self, recommendations: Option<String>) {
        self.recommendations = recommendations;
    }

    pub fn set_baseline(&mut self, is_baseline: bool) {
        self.is_baseline = is_baseline;
    }

    pub fn set_complete(&mut self, is_complete: bool) {
        self.is_complete = is_complete;
    }

    /// Apply a partial update to the non-scoring fields.
    pub fn apply(&mut self, update: NarrativeUpdate) {
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
    }

    /// The record handed to the store.
    pub fn to_model(&self, id: Uuid, now: jiff::Timestamp) -> Assessment {
        Assessment {
            id,
            patient_id: self.patient_id,
            instrument_id: self.instrument.id().to_string(),
            assessed_by: self.assessed_by.clone(),
            assessment_date: self.assessment_date,
            items: self.validated.to_item_values(),
            total_score: self.score.total,
            motor_score: self.score.subscale(fim::MOTOR),
            cognitive_score: self.score.subscale(fim::COGNITIVE),
            notes: self.notes.clone(),
            goals: self.goals.clone(),
            recommendations: self.recommendations.clone(),
            is_baseline: self.is_baseline,
            is_complete: self.is_complete,
            created_at: now,
            updated_at: now,
        }
    }
}
