use std::fmt;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

/// What happened to an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    AssessmentRecorded,
    AssessmentRejected,
    NarrativeUpdated,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::AssessmentRecorded => "assessment_recorded",
            AuditAction::AssessmentRejected => "assessment_rejected",
            AuditAction::NarrativeUpdated => "narrative_updated",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured audit event for an assessment action.
///
/// Only identifiers and scores are recorded. Narrative text and patient
/// names never go into the audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub instrument_id: String,
    pub patient_id: Uuid,
    /// Absent for rejected drafts, which never get an id.
    pub assessment_id: Option<Uuid>,
    pub actor: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        instrument_id: impl Into<String>,
        patient_id: Uuid,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            action,
            instrument_id: instrument_id.into(),
            patient_id,
            assessment_id: None,
            actor: actor.into(),
            details: None,
        }
    }

    pub fn with_assessment(mut self, assessment_id: Uuid) -> Self {
        self.assessment_id = Some(assessment_id);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing. Rejections log at `warn`.
    pub fn emit(&self) {
        let assessment_id = self
            .assessment_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();

        match self.action {
            AuditAction::AssessmentRejected => warn!(
                audit.action = %self.action,
                audit.instrument_id = %self.instrument_id,
                audit.patient_id = %self.patient_id,
                audit.actor = %self.actor,
                audit.details = %details,
                "audit event"
            ),
            _ => info!(
                audit.action = %self.action,
                audit.instrument_id = %self.instrument_id,
                audit.patient_id = %self.patient_id,
                audit.assessment_id = %assessment_id,
                audit.actor = %self.actor,
                audit.details = %details,
                "audit event"
            ),
        }
    }
}
