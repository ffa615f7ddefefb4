//! rehab-audit
//!
//! Application-level audit trail for assessment lifecycle actions. Events are
//! emitted through `tracing`; shipping them anywhere is the subscriber's job.

pub mod events;

pub use events::{AuditAction, AuditEvent};
