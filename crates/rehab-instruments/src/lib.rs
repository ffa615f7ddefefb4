//! rehab-instruments
//!
//! Functional assessment instruments and the engine that validates, scores
//! and interprets them. Pure computation: no I/O, no clock. "Today" is always
//! passed in by the caller.

pub mod banding;
pub mod error;
pub mod instruments;
pub mod record;
pub mod scoring;
pub mod service;
pub mod validation;

use std::fmt;
use std::str::FromStr;

use rehab_core::config::EngineConfig;
use rehab_core::models::assessment::ItemValue;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use error::InstrumentError;
use scoring::{InstrumentDefinition, ScoreCard};
use validation::{ValidatedItems, ValidationErrors};

/// Trait implemented by each functional assessment instrument.
pub trait Instrument: Send + Sync {
    /// Static items, bands and subscales.
    fn definition(&self) -> &'static InstrumentDefinition;

    /// Unique identifier (e.g., "katz_adl", "fim").
    fn id(&self) -> &'static str {
        self.definition().id
    }

    /// Human-readable name (e.g., "Barthel Index").
    fn name(&self) -> &'static str {
        self.definition().name
    }

    /// Validate item values and the assessment date in one pass.
    ///
    /// Item and temporal failures are reported together.
    fn validate(
        &self,
        items: &[ItemValue],
        assessment_date: jiff::civil::Date,
        admission_date: jiff::civil::Date,
        today: jiff::civil::Date,
    ) -> Result<ValidatedItems, ValidationErrors> {
        let item_result = validation::validate_items(self.definition(), items);
        let date_errors = validation::validate_dates(assessment_date, today, admission_date);

        match item_result {
            Ok(validated) => match ValidationErrors::from_vec(date_errors) {
                None => Ok(validated),
                Some(errors) => Err(errors),
            },
            Err(mut errors) => {
                errors.extend(date_errors);
                Err(errors)
            }
        }
    }

    /// Total plus subscales for items this instrument validated.
    fn score(&self, items: &ValidatedItems) -> Result<ScoreCard, InstrumentError> {
        if items.instrument_id() != self.id() {
            return Err(InstrumentError::InstrumentMismatch {
                instrument_id: self.id().to_string(),
                validated: items.instrument_id().to_string(),
            });
        }
        Ok(scoring::score(items))
    }

    /// Band label for any score in the instrument's total range.
    fn interpret(&self, score: i32) -> Result<&'static str, InstrumentError> {
        let definition = self.definition();
        let range = definition.total_range();
        if !range.contains(score) {
            return Err(InstrumentError::ScoreOutOfRange {
                instrument_id: self.id().to_string(),
                score,
                range,
            });
        }
        Ok(definition.band_for(score).label)
    }

    /// Format a scored assessment as Markdown for reports and summaries.
    ///
    /// Both `items` and `card` must come from this instrument.
    fn to_structured_input(
        &self,
        items: &ValidatedItems,
        card: &ScoreCard,
    ) -> Result<String, InstrumentError> {
        for validated in [items.instrument_id(), card.instrument_id.as_str()] {
            if validated != self.id() {
                return Err(InstrumentError::InstrumentMismatch {
                    instrument_id: self.id().to_string(),
                    validated: validated.to_string(),
                });
            }
        }

        let definition = self.definition();
        let mut output = format!("## {}\n\n", self.name());
        for section in &definition.sections {
            output.push_str(&format!("### {}\n", section.name));
            for item in &section.items {
                if let Some(value) = items.get(item.id) {
                    match item.anchor_label(value) {
                        Some(label) => {
                            output.push_str(&format!("- {}: {} ({})\n", item.name, value, label))
                        }
                        None => output.push_str(&format!("- {}: {}\n", item.name, value)),
                    }
                }
            }
            output.push('\n');
        }

        let range = definition.total_range();
        output.push_str(&format!("**Total:** {} / {}\n", card.total, range.max));
        for sub in &card.subscales {
            output.push_str(&format!(
                "**{} subscale:** {} ({})\n",
                sub.name, sub.score, sub.range
            ));
        }
        output.push_str(&format!(
            "**Interpretation:** {}\n",
            definition.interpretation(card.total)
        ));
        Ok(output)
    }
}

/// The instruments this engine knows, as a serializable tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InstrumentKind {
    KatzAdl,
    Barthel,
    Fim,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 3] = [
        InstrumentKind::KatzAdl,
        InstrumentKind::Barthel,
        InstrumentKind::Fim,
    ];

    pub fn instrument(&self) -> &'static dyn Instrument {
        match self {
            InstrumentKind::KatzAdl => &instruments::katz_adl::KatzAdl,
            InstrumentKind::Barthel => &instruments::barthel::Barthel,
            InstrumentKind::Fim => &instruments::fim::Fim,
        }
    }

    pub fn id(&self) -> &'static str {
        self.instrument().id()
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for InstrumentKind {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InstrumentKind::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or_else(|| InstrumentError::UnknownInstrument(s.to_string()))
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::katz_adl::KatzAdl),
        Box::new(instruments::barthel::Barthel),
        Box::new(instruments::fim::Fim),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Instruments switched on in `config`.
pub fn enabled_instruments(config: &EngineConfig) -> Vec<Box<dyn Instrument>> {
    all_instruments()
        .into_iter()
        .filter(|i| config.is_enabled(i.id()))
        .collect()
}
