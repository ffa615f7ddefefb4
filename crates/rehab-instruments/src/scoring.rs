use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::banding::Band;
use crate::error::InstrumentError;
use crate::validation::ValidatedItems;

/// The values a single item may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemDomain {
    /// 0 = dependent, 1 = independent.
    Binary,
    /// A small enumerated set, ascending (e.g. 0/5/10).
    Points { values: &'static [i32] },
    /// Every integer in `min..=max`.
    Range { min: i32, max: i32 },
}

impl ItemDomain {
    pub fn contains(&self, value: i32) -> bool {
        match self {
            ItemDomain::Binary => value == 0 || value == 1,
            ItemDomain::Points { values } => values.contains(&value),
            ItemDomain::Range { min, max } => (*min..=*max).contains(&value),
        }
    }

    pub fn min(&self) -> i32 {
        match self {
            ItemDomain::Binary => 0,
            ItemDomain::Points { values } => values.iter().copied().min().unwrap_or(0),
            ItemDomain::Range { min, .. } => *min,
        }
    }

    pub fn max(&self) -> i32 {
        match self {
            ItemDomain::Binary => 1,
            ItemDomain::Points { values } => values.iter().copied().max().unwrap_or(0),
            ItemDomain::Range { max, .. } => *max,
        }
    }
}

impl fmt::Display for ItemDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemDomain::Binary => f.write_str("{0, 1}"),
            ItemDomain::Points { values } => {
                let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{{{}}}", joined.join(", "))
            }
            ItemDomain::Range { min, max } => write!(f, "{min}-{max}"),
        }
    }
}

/// Descriptive label for one allowed value, e.g. FIM 4 = "Minimal Assist".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub value: i32,
    pub label: &'static str,
}

/// Shorthand for anchor tables in instrument definitions.
pub const fn anchor(value: i32, label: &'static str) -> Anchor {
    Anchor { value, label }
}

/// A single rated item.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: &'static str,
    pub name: &'static str,
    pub domain: ItemDomain,
    pub anchors: &'static [Anchor],
}

impl Item {
    pub fn anchor_label(&self, value: i32) -> Option<&'static str> {
        self.anchors
            .iter()
            .find(|a| a.value == value)
            .map(|a| a.label)
    }
}

/// A group of items as laid out on the paper form.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub id: &'static str,
    pub name: &'static str,
    pub items: Vec<Item>,
}

/// A named subset of items summed for auxiliary reporting only.
#[derive(Debug, Clone, Serialize)]
pub struct SubscaleDef {
    pub id: &'static str,
    pub name: &'static str,
    pub item_ids: &'static [&'static str],
}

/// Inclusive score range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: i32,
    pub max: i32,
}

impl ScoreRange {
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Static description of one instrument: its items, bands and subscales.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub sections: Vec<Section>,
    /// Ordered by descending lower bound.
    pub bands: Vec<Band>,
    pub subscales: Vec<SubscaleDef>,
    total_range: ScoreRange,
}

impl InstrumentDefinition {
    /// Build a definition, panicking if it is internally inconsistent.
    ///
    /// Definitions are built once inside a `LazyLock`, so a bad table fails
    /// on first use rather than on every scoring call.
    ///
    /// # Panics
    ///
    /// Panics if [`InstrumentDefinition::check`] reports a problem.
    pub fn new(
        id: &'static str,
        name: &'static str,
        sections: Vec<Section>,
        bands: Vec<Band>,
        subscales: Vec<SubscaleDef>,
    ) -> Self {
        let total_range = sections
            .iter()
            .flat_map(|s| &s.items)
            .fold(ScoreRange { min: 0, max: 0 }, |acc, item| ScoreRange {
                min: acc.min + item.domain.min(),
                max: acc.max + item.domain.max(),
            });
        let definition = Self {
            id,
            name,
            sections,
            bands,
            subscales,
            total_range,
        };
        if let Err(e) = definition.check() {
            panic!("invalid instrument definition: {e}");
        }
        definition
    }

    /// Every item in form order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.sections.iter().flat_map(|s| &s.items)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items().find(|i| i.id == id)
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    pub fn total_range(&self) -> ScoreRange {
        self.total_range
    }

    pub fn subscale(&self, id: &str) -> Option<&SubscaleDef> {
        self.subscales.iter().find(|s| s.id == id)
    }

    /// Range of a subscale, derived from its items' domains.
    pub fn subscale_range(&self, subscale: &SubscaleDef) -> ScoreRange {
        subscale
            .item_ids
            .iter()
            .filter_map(|id| self.item(id))
            .fold(ScoreRange { min: 0, max: 0 }, |acc, item| ScoreRange {
                min: acc.min + item.domain.min(),
                max: acc.max + item.domain.max(),
            })
    }

    /// Structural checks on the tables.
    pub fn check(&self) -> Result<(), InstrumentError> {
        let invalid = |reason: String| InstrumentError::InvalidDefinition {
            instrument_id: self.id.to_string(),
            reason,
        };

        let mut seen = HashSet::new();
        for item in self.items() {
            if !seen.insert(item.id) {
                return Err(invalid(format!("duplicate item '{}'", item.id)));
            }
            if let ItemDomain::Range { min, max } = item.domain
                && min > max
            {
                return Err(invalid(format!("item '{}' has an empty range", item.id)));
            }
            if let ItemDomain::Points { values } = item.domain
                && (values.is_empty() || values.windows(2).any(|w| w[0] >= w[1]))
            {
                return Err(invalid(format!(
                    "item '{}' points must be non-empty and ascending",
                    item.id
                )));
            }
            if let Some(a) = item.anchors.iter().find(|a| !item.domain.contains(a.value)) {
                return Err(invalid(format!(
                    "item '{}' has anchor {} outside its domain",
                    item.id, a.value
                )));
            }
        }

        let Some(lowest) = self.bands.last() else {
            return Err(invalid("no bands".to_string()));
        };
        if lowest.min != self.total_range.min {
            return Err(invalid(format!(
                "lowest band starts at {} but scores start at {}",
                lowest.min, self.total_range.min
            )));
        }
        if self.bands.windows(2).any(|w| w[0].min <= w[1].min) {
            return Err(invalid("bands must have strictly descending lower bounds".to_string()));
        }
        if let Some(b) = self.bands.iter().find(|b| !self.total_range.contains(b.min)) {
            return Err(invalid(format!("band '{}' starts outside the score range", b.label)));
        }

        for subscale in &self.subscales {
            if let Some(missing) = subscale.item_ids.iter().find(|id| self.item(id).is_none()) {
                return Err(invalid(format!(
                    "subscale '{}' names unknown item '{missing}'",
                    subscale.id
                )));
            }
        }
        Ok(())
    }
}

/// A subscale total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscaleScore {
    pub id: String,
    pub name: String,
    pub score: i32,
    pub range: ScoreRange,
}

/// Output of the score calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreCard {
    pub instrument_id: String,
    pub total: i32,
    pub subscales: Vec<SubscaleScore>,
}

impl ScoreCard {
    pub fn subscale(&self, id: &str) -> Option<i32> {
        self.subscales.iter().find(|s| s.id == id).map(|s| s.score)
    }
}

/// Sum validated items into a total plus any subscales the definition names.
pub fn score(items: &ValidatedItems) -> ScoreCard {
    let definition = items.definition();
    let total = items.values().map(|(_, v)| v).sum();
    let subscales = definition
        .subscales
        .iter()
        .map(|sub| SubscaleScore {
            id: sub.id.to_string(),
            name: sub.name.to_string(),
            score: sub.item_ids.iter().filter_map(|id| items.get(id)).sum(),
            range: definition.subscale_range(sub),
        })
        .collect();

    ScoreCard {
        instrument_id: definition.id.to_string(),
        total,
        subscales,
    }
}
