mod common;

use common::{admission, items, today, uniform};
use jiff::ToSpan;
use rehab_core::models::assessment::ItemValue;
use rehab_instruments::instruments::barthel::Barthel;
use rehab_instruments::instruments::fim::Fim;
use rehab_instruments::instruments::katz_adl::KatzAdl;
use rehab_instruments::Instrument;
use rehab_instruments::validation::{
    ASSESSMENT_DATE_FIELD, ValidationErrorKind, validate_dates, validate_items,
};

#[test]
fn binary_item_set_to_two_is_a_domain_violation() {
    let mut values = uniform(&KatzAdl, 1);
    values[0].value = 2;

    let errors = KatzAdl
        .validate(&values, today(), admission(), today())
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    let err = &errors.as_slice()[0];
    assert_eq!(err.kind, ValidationErrorKind::DomainViolation);
    assert_eq!(err.field, "bathing");
    assert_eq!(err.value, Some(2));
    assert!(err.message.contains("Bathing"));
    assert!(err.message.contains('2'));
    assert!(err.message.contains("{0, 1}"));
}

#[test]
fn barthel_rejects_values_between_points() {
    // feeding allows 0/5/10, bathing only 0/5
    let values = items(&Barthel, &[7, 10, 5, 10, 10, 10, 10, 15, 15, 10]);
    let errors = validate_items(Barthel.definition(), &values).unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["feeding", "bathing"]);
    assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::DomainViolation));
    assert!(errors.as_slice()[1].message.contains("{0, 5}"));
}

#[test]
fn fim_rejects_zero_and_eight() {
    let mut values = uniform(&Fim, 4);
    values[0].value = 0;
    values[17].value = 8;
    let errors = validate_items(Fim.definition(), &values).unwrap_err();
    assert_eq!(errors.of_kind(ValidationErrorKind::DomainViolation).count(), 2);
    assert!(errors.as_slice()[0].message.contains("1-7"));
    assert_eq!(errors.as_slice()[1].field, "memory");
}

#[test]
fn missing_items_are_named() {
    let values: Vec<ItemValue> = uniform(&KatzAdl, 1)
        .into_iter()
        .filter(|v| v.item_id != "feeding" && v.item_id != "toileting")
        .collect();
    let errors = validate_items(KatzAdl.definition(), &values).unwrap_err();
    let missing: Vec<&str> = errors
        .of_kind(ValidationErrorKind::IncompleteInput)
        .map(|e| e.field.as_str())
        .collect();
    assert_eq!(missing, vec!["toileting", "feeding"]);
}

#[test]
fn unknown_and_duplicate_items_are_reported() {
    let mut values = uniform(&KatzAdl, 1);
    values.push(ItemValue::new("juggling", 1));
    values.push(ItemValue::new("bathing", 0));

    let errors = validate_items(KatzAdl.definition(), &values).unwrap_err();
    assert_eq!(errors.len(), 2);
    let kind_of = |field: &str| errors.for_field(field).next().unwrap().kind;
    assert_eq!(kind_of("bathing"), ValidationErrorKind::DuplicateItem);
    assert_eq!(kind_of("juggling"), ValidationErrorKind::UnknownItem);
}

#[test]
fn all_failures_are_collected_in_one_pass() {
    let values = vec![
        ItemValue::new("bathing", 3),
        ItemValue::new("dressing", -1),
        ItemValue::new("toileting", 1),
        ItemValue::new("transferring", 1),
        ItemValue::new("continence", 1),
        ItemValue::new("stairs", 1),
    ];
    let tomorrow = today().checked_add(1.day()).unwrap();
    let errors = KatzAdl
        .validate(&values, tomorrow, admission(), today())
        .unwrap_err();

    assert_eq!(errors.of_kind(ValidationErrorKind::DomainViolation).count(), 2);
    assert_eq!(errors.of_kind(ValidationErrorKind::IncompleteInput).count(), 1);
    assert_eq!(errors.of_kind(ValidationErrorKind::UnknownItem).count(), 1);
    assert_eq!(errors.of_kind(ValidationErrorKind::TemporalViolation).count(), 1);
}

#[test]
fn valid_items_with_a_bad_date_are_still_rejected() {
    let tomorrow = today().checked_add(1.day()).unwrap();
    let errors = Fim
        .validate(&uniform(&Fim, 5), tomorrow, admission(), today())
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.as_slice()[0].field, ASSESSMENT_DATE_FIELD);
}

#[test]
fn item_errors_are_listed_before_date_errors() {
    let mut values = uniform(&KatzAdl, 1);
    values.pop();
    let before_admission = admission().checked_sub(1.day()).unwrap();
    let errors = KatzAdl
        .validate(&values, before_admission, admission(), today())
        .unwrap_err();
    let kinds: Vec<ValidationErrorKind> = errors.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![ValidationErrorKind::IncompleteInput, ValidationErrorKind::TemporalViolation]
    );
}

#[test]
fn validated_items_keep_form_order() {
    let mut values = uniform(&KatzAdl, 1);
    values.reverse();
    let validated = validate_items(KatzAdl.definition(), &values).unwrap();
    let ids: Vec<&str> = validated.values().map(|(id, _)| id).collect();
    assert_eq!(
        ids,
        vec!["bathing", "dressing", "toileting", "transferring", "continence", "feeding"]
    );
}

#[test]
fn assessment_on_admission_day_passes() {
    assert!(validate_dates(admission(), today(), admission()).is_empty());
}

#[test]
fn assessment_day_before_admission_fails() {
    let day_before = admission().checked_sub(1.day()).unwrap();
    let errors = validate_dates(day_before, today(), admission());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ValidationErrorKind::TemporalViolation);
    assert_eq!(errors[0].field, ASSESSMENT_DATE_FIELD);
    assert!(errors[0].message.starts_with("assessment date precedes admission"));
}

#[test]
fn assessment_today_passes() {
    assert!(validate_dates(today(), today(), admission()).is_empty());
}

#[test]
fn assessment_tomorrow_fails() {
    let tomorrow = today().checked_add(1.day()).unwrap();
    let errors = validate_dates(tomorrow, today(), admission());
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("assessment date in future"));
}

#[test]
fn both_temporal_failures_are_reported_together() {
    // Admission recorded after "today" makes both rules fail at once.
    let admitted = today().checked_add(10.days()).unwrap();
    let assessed = today().checked_add(5.days()).unwrap();
    let errors = validate_dates(assessed, today(), admitted);
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::TemporalViolation));
}

#[test]
fn validate_is_deterministic() {
    let mut values = uniform(&Barthel, 5);
    values[3].value = 3;
    let first = Barthel.validate(&values, today(), admission(), today());
    let second = Barthel.validate(&values, today(), admission(), today());
    assert_eq!(first.unwrap_err(), second.unwrap_err());

    let ok = uniform(&Barthel, 0);
    let a = Barthel.validate(&ok, today(), admission(), today()).unwrap();
    let b = Barthel.validate(&ok, today(), admission(), today()).unwrap();
    assert_eq!(a.to_item_values(), b.to_item_values());
}

#[test]
fn errors_serialize_with_snake_case_kinds() {
    let errors = validate_dates(today().checked_add(1.day()).unwrap(), today(), admission());
    let json = serde_json::to_value(&errors).unwrap();
    assert_eq!(json[0]["kind"], "temporal_violation");
    assert_eq!(json[0]["field"], "assessment_date");
}
