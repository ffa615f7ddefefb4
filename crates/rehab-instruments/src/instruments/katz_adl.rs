use std::sync::LazyLock;

use crate::Instrument;
use crate::banding::band;
use crate::scoring::{Anchor, InstrumentDefinition, Item, ItemDomain, Section, anchor};

/// Katz Index of Independence in Activities of Daily Living.
/// 6 functions, each 0 (dependent) or 1 (independent). Total 0–6.
pub struct KatzAdl;

const DEPENDENCE: &[Anchor] = &[anchor(0, "Dependent"), anchor(1, "Independent")];

impl Instrument for KatzAdl {
    fn definition(&self) -> &'static InstrumentDefinition {
        static DEFINITION: LazyLock<InstrumentDefinition> = LazyLock::new(|| {
            let functions = [
                ("bathing", "Bathing"),
                ("dressing", "Dressing"),
                ("toileting", "Toileting"),
                ("transferring", "Transferring"),
                ("continence", "Continence"),
                ("feeding", "Feeding"),
            ];

            let items = functions
                .iter()
                .map(|&(id, name)| Item {
                    id,
                    name,
                    domain: ItemDomain::Binary,
                    anchors: DEPENDENCE,
                })
                .collect();

            InstrumentDefinition::new(
                "katz_adl",
                "Katz ADL",
                vec![Section {
                    id: "adl_functions",
                    name: "ADL Functions",
                    items,
                }],
                vec![
                    band(6, "fully independent"),
                    band(4, "moderately dependent"),
                    band(2, "severely dependent"),
                    band(0, "very severely dependent"),
                ],
                vec![],
            )
        });
        &DEFINITION
    }
}
