//! amparo-core
//!
//! Pure domain types and store key conventions.
//! No storage or HTTP dependency. This is the shared vocabulary of the Amparo system.

pub mod error;
pub mod models;
pub mod store_keys;
