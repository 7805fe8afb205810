//! amparo-triage
//!
//! Risk triage: text flags, risk combination, safety actions, and the fixed
//! crisis response. Every function here is pure and synchronous, so it can be
//! called from any number of requests at once without locking.
//!
//! The pipeline for one request is
//! [`detect`](detect::detect) → [`combine`](combine::combine) →
//! [`select_actions`](actions::select_actions), bundled as
//! [`triage`](actions::triage).

pub mod actions;
pub mod ads;
pub mod combine;
pub mod companion;
pub mod crisis;
pub mod detect;
pub mod emergency;
pub mod error;
pub mod taxonomy;
