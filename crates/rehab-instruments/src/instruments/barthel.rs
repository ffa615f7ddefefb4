use std::sync::LazyLock;

use crate::Instrument;
use crate::banding::band;
use crate::scoring::{Anchor, InstrumentDefinition, Item, ItemDomain, Section, anchor};

/// Barthel Index of activities of daily living.
/// 10 items scored in steps of 5 with item-specific maxima. Total 0–100.
pub struct Barthel;

const ZERO_FIVE: ItemDomain = ItemDomain::Points { values: &[0, 5] };
const ZERO_TEN: ItemDomain = ItemDomain::Points { values: &[0, 5, 10] };
const ZERO_FIFTEEN: ItemDomain = ItemDomain::Points {
    values: &[0, 5, 10, 15],
};

const FEEDING: &[Anchor] = &[
    anchor(0, "Unable"),
    anchor(5, "Needs help cutting, spreading butter, etc."),
    anchor(10, "Independent"),
];
const BATHING: &[Anchor] = &[anchor(0, "Dependent"), anchor(5, "Independent (or in shower)")];
const GROOMING: &[Anchor] = &[
    anchor(0, "Needs help with personal care"),
    anchor(5, "Independent face/hair/teeth/shaving"),
];
const DRESSING: &[Anchor] = &[
    anchor(0, "Dependent"),
    anchor(5, "Needs help but can do about half unaided"),
    anchor(10, "Independent (including buttons, zips, laces)"),
];
const BOWELS: &[Anchor] = &[
    anchor(0, "Incontinent (or needs enemas)"),
    anchor(5, "Occasional accident"),
    anchor(10, "Continent"),
];
const BLADDER: &[Anchor] = &[
    anchor(0, "Incontinent, or catheterized and unable to manage alone"),
    anchor(5, "Occasional accident"),
    anchor(10, "Continent"),
];
const TOILET_USE: &[Anchor] = &[
    anchor(0, "Dependent"),
    anchor(5, "Needs some help, but can do something alone"),
    anchor(10, "Independent (on and off, dressing, wiping)"),
];
const TRANSFERS: &[Anchor] = &[
    anchor(0, "Unable, no sitting balance"),
    anchor(5, "Major help (one or two people, physical), can sit"),
    anchor(10, "Minor help (verbal or physical)"),
    anchor(15, "Independent"),
];
const MOBILITY: &[Anchor] = &[
    anchor(0, "Immobile or < 50 yards"),
    anchor(5, "Wheelchair independent, including corners, > 50 yards"),
    anchor(10, "Walks with help of one person > 50 yards"),
    anchor(15, "Independent (but may use any aid) > 50 yards"),
];
const STAIRS: &[Anchor] = &[
    anchor(0, "Unable"),
    anchor(5, "Needs help (verbal, physical, carrying aid)"),
    anchor(10, "Independent"),
];

impl Instrument for Barthel {
    fn definition(&self) -> &'static InstrumentDefinition {
        static DEFINITION: LazyLock<InstrumentDefinition> = LazyLock::new(|| {
            let items = [
                ("feeding", "Feeding", ZERO_TEN, FEEDING),
                ("bathing", "Bathing", ZERO_FIVE, BATHING),
                ("grooming", "Grooming", ZERO_FIVE, GROOMING),
                ("dressing", "Dressing", ZERO_TEN, DRESSING),
                ("bowels", "Bowels", ZERO_TEN, BOWELS),
                ("bladder", "Bladder", ZERO_TEN, BLADDER),
                ("toilet_use", "Toilet Use", ZERO_TEN, TOILET_USE),
                ("transfers", "Transfers (bed to chair and back)", ZERO_FIFTEEN, TRANSFERS),
                ("mobility", "Mobility (on level surfaces)", ZERO_FIFTEEN, MOBILITY),
                ("stairs", "Stairs", ZERO_TEN, STAIRS),
            ]
            .into_iter()
            .map(|(id, name, domain, anchors)| Item {
                id,
                name,
                domain,
                anchors,
            })
            .collect();

            InstrumentDefinition::new(
                "barthel",
                "Barthel Index",
                vec![Section {
                    id: "activities",
                    name: "Activities of Daily Living",
                    items,
                }],
                vec![
                    band(90, "independent"),
                    band(60, "minimal dependence"),
                    band(40, "partial dependence"),
                    band(20, "very dependent"),
                    band(0, "totally dependent"),
                ],
                vec![],
            )
        });
        &DEFINITION
    }
}
