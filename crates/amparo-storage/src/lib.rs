//! amparo-storage
//!
//! Session store used by the first-contact flows. One async trait with two
//! backends: an in-process map for tests and single-node deployments, and S3
//! with ETag optimistic locking.

pub mod client;
pub mod directory;
pub mod documents;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod store;
