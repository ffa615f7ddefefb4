//! Item value and temporal validation.
//!
//! Both validators collect every failure they find instead of stopping at
//! the first one, so a clinician gets the whole correction list at once.

use std::fmt;

use rehab_core::models::assessment::ItemValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::scoring::InstrumentDefinition;

pub const ASSESSMENT_DATE_FIELD: &str = "assessment_date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationErrorKind {
    /// A required item was not supplied.
    IncompleteInput,
    /// An item name the instrument does not define.
    UnknownItem,
    /// The same item supplied more than once.
    DuplicateItem,
    /// An item value outside its allowed set.
    DomainViolation,
    /// Assessment date outside the admission..=today window.
    TemporalViolation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Item id or `assessment_date`.
    pub field: String,
    pub kind: ValidationErrorKind,
    pub value: Option<i32>,
    pub message: String,
}

impl ValidationError {
    fn new(
        field: impl Into<String>,
        kind: ValidationErrorKind,
        value: Option<i32>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind,
            value,
            message: message.into(),
        }
    }
}

/// A non-empty, ordered set of validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// `None` when there is nothing to report.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn of_kind(&self, kind: ValidationErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.0.iter().filter(move |e| e.kind == kind)
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |e| e.field == field)
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<T: IntoIterator<Item = ValidationError>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Item values that passed [`validate_items`], in form order.
///
/// Only the validator can build one, so scoring never sees unchecked input.
#[derive(Debug, Clone)]
pub struct ValidatedItems {
    definition: &'static InstrumentDefinition,
    values: Vec<(&'static str, i32)>,
}

impl ValidatedItems {
    pub fn definition(&self) -> &'static InstrumentDefinition {
        self.definition
    }

    pub fn instrument_id(&self) -> &'static str {
        self.definition.id
    }

    pub fn values(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.values.iter().copied()
    }

    pub fn get(&self, item_id: &str) -> Option<i32> {
        self.values
            .iter()
            .find(|(id, _)| *id == item_id)
            .map(|(_, v)| *v)
    }

    pub fn to_item_values(&self) -> Vec<ItemValue> {
        self.values
            .iter()
            .map(|(id, v)| ItemValue::new(*id, *v))
            .collect()
    }
}

/// Check that every defined item is present exactly once, nothing else is
/// supplied, and each value lies in its item's domain.
pub fn validate_items(
    definition: &'static InstrumentDefinition,
    items: &[ItemValue],
) -> Result<ValidatedItems, ValidationErrors> {
    let mut errors = Vec::new();
    let mut values = Vec::with_capacity(definition.item_count());

    for item in definition.items() {
        let mut supplied = items.iter().filter(|v| v.item_id == item.id);
        let Some(first) = supplied.next() else {
            errors.push(ValidationError::new(
                item.id,
                ValidationErrorKind::IncompleteInput,
                None,
                format!("required item missing: {}", item.name),
            ));
            continue;
        };
        if supplied.next().is_some() {
            errors.push(ValidationError::new(
                item.id,
                ValidationErrorKind::DuplicateItem,
                None,
                format!("item supplied more than once: {}", item.name),
            ));
            continue;
        }
        if !item.domain.contains(first.value) {
            errors.push(ValidationError::new(
                item.id,
                ValidationErrorKind::DomainViolation,
                Some(first.value),
                format!(
                    "value out of domain: {} is {}, expected {}",
                    item.name, first.value, item.domain
                ),
            ));
            continue;
        }
        values.push((item.id, first.value));
    }

    for extra in items.iter().filter(|v| definition.item(&v.item_id).is_none()) {
        errors.push(ValidationError::new(
            extra.item_id.clone(),
            ValidationErrorKind::UnknownItem,
            Some(extra.value),
            format!("unknown item for {}: {}", definition.name, extra.item_id),
        ));
    }

    match ValidationErrors::from_vec(errors) {
        Some(errors) => {
            tracing::debug!(
                instrument_id = definition.id,
                error_count = errors.len(),
                "item validation failed"
            );
            Err(errors)
        }
        None => Ok(ValidatedItems { definition, values }),
    }
}

/// Both temporal rules, checked independently. Equality passes on both
/// bounds.
pub fn validate_dates(
    assessment_date: jiff::civil::Date,
    today: jiff::civil::Date,
    admission_date: jiff::civil::Date,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if assessment_date > today {
        errors.push(ValidationError::new(
            ASSESSMENT_DATE_FIELD,
            ValidationErrorKind::TemporalViolation,
            None,
            format!("assessment date in future: {assessment_date} is after {today}"),
        ));
    }
    if assessment_date < admission_date {
        errors.push(ValidationError::new(
            ASSESSMENT_DATE_FIELD,
            ValidationErrorKind::TemporalViolation,
            None,
            format!(
                "assessment date precedes admission: {assessment_date} is before {admission_date}"
            ),
        ));
    }
    errors
}
