//! Record flow around the engine: look up the patient, commit the draft,
//! hand the result to the store, and leave an audit trail.

use rehab_audit::{AuditAction, AuditEvent};
use rehab_core::error::CoreError;
use rehab_core::models::assessment::{Assessment, ItemValue, NarrativeUpdate};
use rehab_core::store::{AssessmentStore, PatientLookup};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

use crate::InstrumentKind;
use crate::banding::Interpretation;
use crate::error::InstrumentError;
use crate::record::AssessmentDraft;
use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] CoreError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Instrument(#[from] InstrumentError),
}

/// A new assessment as submitted by a clinician.
///
/// Carries no score. Any `total_score` in the incoming JSON is ignored and
/// recomputed from `items`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecordRequest {
    pub instrument: InstrumentKind,
    pub patient_id: Uuid,
    pub assessed_by: String,
    pub assessment_date: jiff::civil::Date,
    pub items: Vec<ItemValue>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub recommendations: Option<String>,
    #[serde(default)]
    pub is_baseline: bool,
    #[serde(default = "default_complete")]
    pub is_complete: bool,
}

fn default_complete() -> bool {
    true
}

pub struct AssessmentService<'a> {
    patients: &'a dyn PatientLookup,
    store: &'a dyn AssessmentStore,
}

impl<'a> AssessmentService<'a> {
    pub fn new(patients: &'a dyn PatientLookup, store: &'a dyn AssessmentStore) -> Self {
        Self { patients, store }
    }

    /// Validate, score and store a new assessment.
    pub fn record(
        &self,
        request: RecordRequest,
        today: jiff::civil::Date,
    ) -> Result<Assessment, ServiceError> {
        let patient = self.patients.patient(request.patient_id)?;

        let mut draft = AssessmentDraft::new(
            request.instrument,
            request.patient_id,
            request.assessment_date,
            patient.admission_date,
            request.items,
        )
        .assessed_by(request.assessed_by)
        .baseline(request.is_baseline)
        .complete(request.is_complete);
        draft.notes = request.notes;
        draft.goals = request.goals;
        draft.recommendations = request.recommendations;

        let committed = match draft.commit(today) {
            Ok(c) => c,
            Err(rejected) => {
                let fields: Vec<&str> = rejected.errors.iter().map(|e| e.field.as_str()).collect();
                AuditEvent::new(
                    AuditAction::AssessmentRejected,
                    request.instrument.id(),
                    request.patient_id,
                    &rejected.draft.assessed_by,
                )
                .with_details(serde_json::json!({ "fields": fields }))
                .emit();
                return Err(rejected.errors.into());
            }
        };

        let assessment = committed.to_model(Uuid::new_v4(), jiff::Timestamp::now());
        self.store.insert(assessment.clone())?;

        AuditEvent::new(
            AuditAction::AssessmentRecorded,
            &assessment.instrument_id,
            assessment.patient_id,
            &assessment.assessed_by,
        )
        .with_assessment(assessment.id)
        .with_details(serde_json::json!({
            "total_score": assessment.total_score,
            "motor_score": assessment.motor_score,
            "cognitive_score": assessment.cognitive_score,
        }))
        .emit();

        Ok(assessment)
    }

    /// Change notes, goals, recommendations or flags. Items, dates and
    /// scores are left as committed and are not re-validated.
    pub fn update_narrative(
        &self,
        id: Uuid,
        update: NarrativeUpdate,
        actor: &str,
    ) -> Result<Assessment, ServiceError> {
        let mut assessment = self.store.get(id)?;
        assessment.apply_narrative(update, jiff::Timestamp::now());
        self.store.update(assessment.clone())?;

        AuditEvent::new(
            AuditAction::NarrativeUpdated,
            &assessment.instrument_id,
            assessment.patient_id,
            actor,
        )
        .with_assessment(id)
        .emit();

        Ok(assessment)
    }

    /// Band the stored total. Nothing is cached; the stored score is read
    /// fresh each time.
    pub fn interpret(&self, id: Uuid) -> Result<Interpretation, ServiceError> {
        let assessment = self.store.get(id)?;
        let kind: InstrumentKind = assessment.instrument_id.parse()?;
        let instrument = kind.instrument();
        instrument.interpret(assessment.total_score)?;
        Ok(instrument
            .definition()
            .interpretation(assessment.total_score))
    }

    /// A patient's assessments on one instrument, newest first.
    pub fn history(
        &self,
        patient_id: Uuid,
        instrument: InstrumentKind,
    ) -> Result<Vec<Assessment>, ServiceError> {
        Ok(self
            .store
            .list_for_patient(patient_id)?
            .into_iter()
            .filter(|a| a.instrument_id == instrument.id())
            .collect())
    }
}
