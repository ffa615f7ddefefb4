mod common;

use common::{admission, items, today, uniform};
use rehab_core::models::assessment::ItemValue;
use rehab_instruments::error::InstrumentError;
use rehab_instruments::instruments::barthel::Barthel;
use rehab_instruments::instruments::fim::{self, Fim};
use rehab_instruments::instruments::katz_adl::KatzAdl;
use rehab_instruments::scoring::ScoreCard;
use rehab_instruments::{Instrument, all_instruments};

fn score(instrument: &dyn Instrument, values: &[ItemValue]) -> ScoreCard {
    let validated = instrument
        .validate(values, today(), admission(), today())
        .unwrap();
    instrument.score(&validated).unwrap()
}

#[test]
fn katz_all_independent_is_fully_independent() {
    let card = score(&KatzAdl, &uniform(&KatzAdl, 1));
    assert_eq!(card.total, 6);
    assert_eq!(KatzAdl.interpret(card.total).unwrap(), "fully independent");
    assert!(card.subscales.is_empty());
}

#[test]
fn katz_four_of_six_is_moderately_dependent() {
    let card = score(&KatzAdl, &items(&KatzAdl, &[1, 1, 0, 1, 0, 1]));
    assert_eq!(card.total, 4);
    assert_eq!(KatzAdl.interpret(card.total).unwrap(), "moderately dependent");
}

#[test]
fn katz_all_dependent_is_very_severely_dependent() {
    let card = score(&KatzAdl, &uniform(&KatzAdl, 0));
    assert_eq!(card.total, 0);
    assert_eq!(KatzAdl.interpret(0).unwrap(), "very severely dependent");
}

#[test]
fn barthel_sixty_is_minimal_dependence() {
    let card = score(&Barthel, &items(&Barthel, &[5, 5, 5, 5, 5, 5, 5, 10, 10, 5]));
    assert_eq!(card.total, 60);
    assert_eq!(Barthel.interpret(card.total).unwrap(), "minimal dependence");
}

#[test]
fn barthel_max_and_min() {
    let max = score(&Barthel, &items(&Barthel, &[10, 5, 5, 10, 10, 10, 10, 15, 15, 10]));
    assert_eq!(max.total, 100);
    assert_eq!(Barthel.interpret(100).unwrap(), "independent");

    let min = score(&Barthel, &uniform(&Barthel, 0));
    assert_eq!(min.total, 0);
    assert_eq!(Barthel.interpret(0).unwrap(), "totally dependent");
}

#[test]
fn fim_all_sevens() {
    let card = score(&Fim, &uniform(&Fim, 7));
    assert_eq!(card.total, 126);
    assert_eq!(card.subscale(fim::MOTOR), Some(91));
    assert_eq!(card.subscale(fim::COGNITIVE), Some(35));
    assert_eq!(Fim.interpret(card.total).unwrap(), "complete independence");
}

#[test]
fn fim_all_ones() {
    let card = score(&Fim, &uniform(&Fim, 1));
    assert_eq!(card.total, 18);
    assert_eq!(card.subscale(fim::MOTOR), Some(13));
    assert_eq!(card.subscale(fim::COGNITIVE), Some(5));
    assert_eq!(Fim.interpret(card.total).unwrap(), "complete dependence");
}

#[test]
fn fim_mixed_scores_split_into_subscales() {
    let values = [6, 5, 4, 5, 4, 5, 6, 6, 4, 4, 3, 4, 3, 6, 6, 5, 5, 5];
    let card = score(&Fim, &items(&Fim, &values));
    assert_eq!(card.total, 86);
    assert_eq!(card.subscale(fim::MOTOR), Some(59));
    assert_eq!(card.subscale(fim::COGNITIVE), Some(27));
    assert_eq!(Fim.interpret(card.total).unwrap(), "modified dependence");
}

#[test]
fn fim_subscale_ranges_are_reported() {
    let card = score(&Fim, &uniform(&Fim, 4));
    let motor = card.subscales.iter().find(|s| s.id == fim::MOTOR).unwrap();
    assert_eq!((motor.range.min, motor.range.max), (13, 91));
    let cognitive = card.subscales.iter().find(|s| s.id == fim::COGNITIVE).unwrap();
    assert_eq!((cognitive.range.min, cognitive.range.max), (5, 35));
}

#[test]
fn total_is_sum_of_values_and_within_range() {
    for instrument in all_instruments() {
        let definition = instrument.definition();
        let range = definition.total_range();
        // Walk each item through its domain with the others at their minimum.
        for item in definition.items() {
            for value in item.domain.min()..=item.domain.max() {
                if !item.domain.contains(value) {
                    continue;
                }
                let values: Vec<_> = definition
                    .items()
                    .map(|other| {
                        let v = if other.id == item.id { value } else { other.domain.min() };
                        ItemValue::new(other.id, v)
                    })
                    .collect();
                let expected: i32 = values.iter().map(|v| v.value).sum();
                let card = score(instrument.as_ref(), &values);
                assert_eq!(card.total, expected, "{} / {}", instrument.id(), item.id);
                assert!(range.contains(card.total));
            }
        }
    }
}

#[test]
fn every_total_in_range_has_exactly_one_band() {
    for instrument in all_instruments() {
        let range = instrument.definition().total_range();
        for total in range.min..=range.max {
            assert!(
                instrument.interpret(total).is_ok(),
                "{} has no band for {total}",
                instrument.id()
            );
        }
    }
}

#[test]
fn band_boundaries_resolve_upward() {
    assert_eq!(KatzAdl.interpret(5).unwrap(), "moderately dependent");
    assert_eq!(KatzAdl.interpret(3).unwrap(), "severely dependent");
    assert_eq!(KatzAdl.interpret(1).unwrap(), "very severely dependent");

    assert_eq!(Barthel.interpret(90).unwrap(), "independent");
    assert_eq!(Barthel.interpret(89).unwrap(), "minimal dependence");
    assert_eq!(Barthel.interpret(40).unwrap(), "partial dependence");
    assert_eq!(Barthel.interpret(39).unwrap(), "very dependent");
    assert_eq!(Barthel.interpret(20).unwrap(), "very dependent");
    assert_eq!(Barthel.interpret(19).unwrap(), "totally dependent");

    assert_eq!(Fim.interpret(108).unwrap(), "complete independence");
    assert_eq!(Fim.interpret(107).unwrap(), "modified independence");
    assert_eq!(Fim.interpret(90).unwrap(), "modified independence");
    assert_eq!(Fim.interpret(89).unwrap(), "modified dependence");
    assert_eq!(Fim.interpret(54).unwrap(), "modified dependence");
    assert_eq!(Fim.interpret(53).unwrap(), "complete dependence");
}

#[test]
fn out_of_range_scores_are_rejected_by_interpret() {
    assert!(KatzAdl.interpret(7).is_err());
    assert!(KatzAdl.interpret(-1).is_err());
    assert!(Fim.interpret(17).is_err());
    assert!(Fim.interpret(127).is_err());
    assert!(Barthel.interpret(101).is_err());
}

#[test]
fn interpretation_carries_band_range() {
    let definition = Barthel.definition();
    assert_eq!(definition.interpretation(75).to_string(), "minimal dependence (60-89)");
    assert_eq!(definition.interpretation(95).to_string(), "independent (90-100)");
    assert_eq!(definition.interpretation(0).to_string(), "totally dependent (0-19)");
    assert_eq!(
        Fim.definition().interpretation(18).to_string(),
        "complete dependence (18-53)"
    );
}

#[test]
fn scoring_items_from_another_instrument_is_refused() {
    let validated = KatzAdl
        .validate(&uniform(&KatzAdl, 1), today(), admission(), today())
        .unwrap();
    assert!(Barthel.score(&validated).is_err());
}

#[test]
fn structured_input_from_another_instrument_is_refused() {
    let fim_items = Fim
        .validate(&uniform(&Fim, 7), today(), admission(), today())
        .unwrap();
    let fim_card = Fim.score(&fim_items).unwrap();
    assert!(matches!(
        KatzAdl.to_structured_input(&fim_items, &fim_card),
        Err(InstrumentError::InstrumentMismatch { ref validated, .. }) if validated == "fim"
    ));

    let katz_items = KatzAdl
        .validate(&uniform(&KatzAdl, 1), today(), admission(), today())
        .unwrap();
    assert!(matches!(
        KatzAdl.to_structured_input(&katz_items, &fim_card),
        Err(InstrumentError::InstrumentMismatch { .. })
    ));
}

#[test]
fn structured_input_lists_sections_items_and_interpretation() {
    let validated = Fim
        .validate(&uniform(&Fim, 4), today(), admission(), today())
        .unwrap();
    let card = Fim.score(&validated).unwrap();
    let text = Fim.to_structured_input(&validated, &card).unwrap();

    assert!(text.starts_with("## FIM\n"));
    assert!(text.contains("### Self-Care"));
    assert!(text.contains("### Social Cognition"));
    assert!(text.contains("- Eating: 4 (Minimal Assist)"));
    assert!(text.contains("**Total:** 72 / 126"));
    assert!(text.contains("**Motor subscale:** 52 (13-91)"));
    assert!(text.contains("**Interpretation:** modified dependence (54-89)"));
}
