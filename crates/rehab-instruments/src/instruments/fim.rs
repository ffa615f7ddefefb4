use std::sync::LazyLock;

use crate::Instrument;
use crate::banding::band;
use crate::scoring::{Anchor, InstrumentDefinition, Item, ItemDomain, Section, SubscaleDef, anchor};

/// FIM: Functional Independence Measure.
/// 18 items rated 1 (total assistance) to 7 (complete independence).
/// Total 18–126; motor subscale 13–91, cognitive subscale 5–35.
pub struct Fim;

pub const MOTOR: &str = "motor";
pub const COGNITIVE: &str = "cognitive";

const SEVEN_POINT: ItemDomain = ItemDomain::Range { min: 1, max: 7 };

const LEVELS: &[Anchor] = &[
    anchor(1, "Total Assist"),
    anchor(2, "Maximal Assist"),
    anchor(3, "Moderate Assist"),
    anchor(4, "Minimal Assist"),
    anchor(5, "Supervision"),
    anchor(6, "Modified Independence"),
    anchor(7, "Complete Independence"),
];

const MOTOR_ITEMS: &[&str] = &[
    "eating",
    "grooming",
    "bathing",
    "dressing_upper",
    "dressing_lower",
    "toileting",
    "bladder_management",
    "bowel_management",
    "transfer_bed_chair",
    "transfer_toilet",
    "transfer_tub_shower",
    "locomotion_walk_wheelchair",
    "locomotion_stairs",
];

const COGNITIVE_ITEMS: &[&str] = &[
    "comprehension",
    "expression",
    "social_interaction",
    "problem_solving",
    "memory",
];

fn section(
    id: &'static str,
    name: &'static str,
    items: &[(&'static str, &'static str)],
) -> Section {
    Section {
        id,
        name,
        items: items
            .iter()
            .map(|&(id, name)| Item {
                id,
                name,
                domain: SEVEN_POINT,
                anchors: LEVELS,
            })
            .collect(),
    }
}

impl Instrument for Fim {
    fn definition(&self) -> &'static InstrumentDefinition {
        static DEFINITION: LazyLock<InstrumentDefinition> = LazyLock::new(|| {
            let sections = vec![
                section(
                    "self_care",
                    "Self-Care",
                    &[
                        ("eating", "Eating"),
                        ("grooming", "Grooming"),
                        ("bathing", "Bathing"),
                        ("dressing_upper", "Dressing - Upper Body"),
                        ("dressing_lower", "Dressing - Lower Body"),
                        ("toileting", "Toileting"),
                    ],
                ),
                section(
                    "sphincter_control",
                    "Sphincter Control",
                    &[
                        ("bladder_management", "Bladder Management"),
                        ("bowel_management", "Bowel Management"),
                    ],
                ),
                section(
                    "transfers",
                    "Transfers",
                    &[
                        ("transfer_bed_chair", "Bed, Chair, Wheelchair"),
                        ("transfer_toilet", "Toilet"),
                        ("transfer_tub_shower", "Tub, Shower"),
                    ],
                ),
                section(
                    "locomotion",
                    "Locomotion",
                    &[
                        ("locomotion_walk_wheelchair", "Walk/Wheelchair"),
                        ("locomotion_stairs", "Stairs"),
                    ],
                ),
                section(
                    "communication",
                    "Communication",
                    &[
                        ("comprehension", "Comprehension"),
                        ("expression", "Expression"),
                    ],
                ),
                section(
                    "social_cognition",
                    "Social Cognition",
                    &[
                        ("social_interaction", "Social Interaction"),
                        ("problem_solving", "Problem Solving"),
                        ("memory", "Memory"),
                    ],
                ),
            ];

            InstrumentDefinition::new(
                "fim",
                "FIM",
                sections,
                vec![
                    band(108, "complete independence"),
                    band(90, "modified independence"),
                    band(54, "modified dependence"),
                    band(18, "complete dependence"),
                ],
                vec![
                    SubscaleDef {
                        id: MOTOR,
                        name: "Motor",
                        item_ids: MOTOR_ITEMS,
                    },
                    SubscaleDef {
                        id: COGNITIVE,
                        name: "Cognitive",
                        item_ids: COGNITIVE_ITEMS,
                    },
                ],
            )
        });
        &DEFINITION
    }
}
