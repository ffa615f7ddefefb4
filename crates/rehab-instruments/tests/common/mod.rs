#![allow(dead_code)]

use rehab_core::models::assessment::ItemValue;
use rehab_instruments::Instrument;

/// One value per item, in form order.
pub fn items(instrument: &dyn Instrument, values: &[i32]) -> Vec<ItemValue> {
    assert_eq!(values.len(), instrument.definition().item_count());
    instrument
        .definition()
        .items()
        .zip(values)
        .map(|(item, v)| ItemValue::new(item.id, *v))
        .collect()
}

/// Every item set to `value`.
pub fn uniform(instrument: &dyn Instrument, value: i32) -> Vec<ItemValue> {
    instrument
        .definition()
        .items()
        .map(|item| ItemValue::new(item.id, value))
        .collect()
}

pub fn admission() -> jiff::civil::Date {
    jiff::civil::date(2025, 4, 1)
}

pub fn today() -> jiff::civil::Date {
    jiff::civil::date(2025, 4, 20)
}
