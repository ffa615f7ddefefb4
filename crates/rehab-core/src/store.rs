//! Collaborator contracts for the record layer.
//!
//! The scoring engine never owns persistence. It asks a [`PatientLookup`] for
//! the admission date it validates against and hands committed assessments to
//! an [`AssessmentStore`]. [`MemoryStore`] implements both for tests and for
//! embedding without a database.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::CoreError;
use crate::models::assessment::Assessment;
use crate::models::patient::Patient;

pub trait PatientLookup: Send + Sync {
    /// Fetch the patient record. Only `admission_date` is required by the
    /// engine.
    fn patient(&self, patient_id: Uuid) -> Result<Patient, CoreError>;
}

pub trait AssessmentStore: Send + Sync {
    /// Store a new assessment. Fails if the id is already taken.
    fn insert(&self, assessment: Assessment) -> Result<(), CoreError>;

    /// Return the stored assessment unchanged.
    fn get(&self, id: Uuid) -> Result<Assessment, CoreError>;

    /// Replace an existing assessment.
    fn update(&self, assessment: Assessment) -> Result<(), CoreError>;

    /// All assessments for a patient, newest first: latest assessment date,
    /// then latest entry within a day.
    fn list_for_patient(&self, patient_id: Uuid) -> Result<Vec<Assessment>, CoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    patients: RwLock<HashMap<Uuid, Patient>>,
    assessments: RwLock<HashMap<Uuid, Assessment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_patient(&self, patient: Patient) -> Result<(), CoreError> {
        let mut patients = self
            .patients
            .write()
            .map_err(|_| CoreError::StorePoisoned)?;
        patients.insert(patient.id, patient);
        Ok(())
    }
}

impl PatientLookup for MemoryStore {
    fn patient(&self, patient_id: Uuid) -> Result<Patient, CoreError> {
        let patients = self.patients.read().map_err(|_| CoreError::StorePoisoned)?;
        patients
            .get(&patient_id)
            .cloned()
            .ok_or(CoreError::PatientNotFound(patient_id))
    }
}

impl AssessmentStore for MemoryStore {
    fn insert(&self, assessment: Assessment) -> Result<(), CoreError> {
        let mut assessments = self
            .assessments
            .write()
            .map_err(|_| CoreError::StorePoisoned)?;
        if assessments.contains_key(&assessment.id) {
            return Err(CoreError::DuplicateAssessment(assessment.id));
        }
        tracing::debug!(assessment_id = %assessment.id, "stored assessment");
        assessments.insert(assessment.id, assessment);
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Assessment, CoreError> {
        let assessments = self
            .assessments
            .read()
            .map_err(|_| CoreError::StorePoisoned)?;
        assessments
            .get(&id)
            .cloned()
            .ok_or(CoreError::AssessmentNotFound(id))
    }

    fn update(&self, assessment: Assessment) -> Result<(), CoreError> {
        let mut assessments = self
            .assessments
            .write()
            .map_err(|_| CoreError::StorePoisoned)?;
        match assessments.get_mut(&assessment.id) {
            Some(existing) => {
                *existing = assessment;
                Ok(())
            }
            None => Err(CoreError::AssessmentNotFound(assessment.id)),
        }
    }

    fn list_for_patient(&self, patient_id: Uuid) -> Result<Vec<Assessment>, CoreError> {
        let assessments = self
            .assessments
            .read()
            .map_err(|_| CoreError::StorePoisoned)?;
        let mut found: Vec<Assessment> = assessments
            .values()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect();
        found.sort_by_key(|a| std::cmp::Reverse((a.assessment_date, a.created_at)));
        Ok(found)
    }
}
