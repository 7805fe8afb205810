//! amparo-flows
//!
//! Stateful protocols over the session store: first contact with DASS-21,
//! the safety negotiation, standalone assessment submission, the
//! expressive-writing steps, and the therapist referral directory. The
//! decision logic itself lives in `amparo-triage` and `amparo-instruments`;
//! this crate sequences it and keeps the audit trail.

pub mod assessments;
pub mod context;
pub mod directory;
pub mod eea;
pub mod error;
pub mod first_contact;
pub mod negotiation;
pub mod policy;

pub use context::FlowContext;
pub use error::FlowError;
pub use policy::Policy;
