use thiserror::Error;

use crate::scoring::ScoreRange;
use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("items validated for '{validated}' cannot be scored by '{instrument_id}'")]
    InstrumentMismatch {
        instrument_id: String,
        validated: String,
    },

    #[error("score {score} is outside {instrument_id} range [{range}]")]
    ScoreOutOfRange {
        instrument_id: String,
        score: i32,
        range: ScoreRange,
    },

    #[error("invalid definition for '{instrument_id}': {reason}")]
    InvalidDefinition {
        instrument_id: String,
        reason: String,
    },
}
