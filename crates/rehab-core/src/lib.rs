//! rehab-core
//!
//! Shared vocabulary of the rehab system: patient and assessment records,
//! the collaborator traits the scoring engine calls into, and engine
//! configuration. No scoring rules live here.

pub mod config;
pub mod error;
pub mod models;
pub mod store;
