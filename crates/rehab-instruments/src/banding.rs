//! Maps a score onto a named clinical band.
//!
//! Bands carry only an inclusive lower bound and are scanned from the highest
//! bound down, so a score sitting exactly on a boundary resolves to the
//! higher band.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::{InstrumentDefinition, ScoreRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Band {
    pub min: i32,
    pub label: &'static str,
}

pub const fn band(min: i32, label: &'static str) -> Band {
    Band { min, label }
}

/// First band, scanning highest lower bound first, whose bound is `<= score`.
pub fn scan(bands: &[Band], score: i32) -> Option<&Band> {
    bands.iter().find(|b| b.min <= score)
}

/// A resolved band with both bounds, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Interpretation {
    pub label: String,
    pub range: ScoreRange,
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.range)
    }
}

impl InstrumentDefinition {
    /// Band for a score. Scores below the lowest bound fall into the lowest
    /// band; callers holding unchecked input should range-check first.
    pub fn band_for(&self, score: i32) -> &Band {
        scan(&self.bands, score)
            .or(self.bands.last())
            .unwrap_or_else(|| panic!("instrument '{}' has no bands", self.id))
    }

    /// Inclusive range covered by `band`: up to one below the next higher
    /// band, or the instrument maximum for the top band.
    pub fn band_range(&self, band: &Band) -> ScoreRange {
        let max = self
            .bands
            .iter()
            .rev()
            .find(|b| b.min > band.min)
            .map(|b| b.min - 1)
            .unwrap_or(self.total_range().max);
        ScoreRange { min: band.min, max }
    }

    pub fn interpretation(&self, score: i32) -> Interpretation {
        let band = self.band_for(score);
        Interpretation {
            label: band.label.to_string(),
            range: self.band_range(band),
        }
    }
}
