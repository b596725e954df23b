//! Authentication
//!
//! Admin routes (enrolment, point ingestion, manual transitions) are called
//! by trusted backend services and carry a shared bearer key.

pub mod admin_key;

pub use admin_key::{admin_middleware, hash_api_key};
