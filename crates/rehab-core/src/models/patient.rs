use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub admission_date: jiff::civil::Date,
    pub discharge_date: Option<jiff::civil::Date>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_discharged(&self) -> bool {
        self.discharge_date.is_some()
    }

    /// Days from admission to discharge, or to `today` while still admitted.
    pub fn length_of_stay(&self, today: jiff::civil::Date) -> i32 {
        let end = self.discharge_date.unwrap_or(today);
        (end - self.admission_date).get_days()
    }
}
