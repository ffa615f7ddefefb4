pub mod assessment;
pub mod patient;
