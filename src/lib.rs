//! # Fireseed
//!
//! Fireseed bootstraps a Firebase Firestore database through the REST API by
//! writing a first document into the `test` collection. When that fails, it
//! explains how to create the database by hand in the Firebase console.
//!
//! - [`firestore`]: a minimal REST client (references, field-value encoding,
//!   document creation)
//! - [`setup`]: the setup run and its console report
//! - [`config`]: environment-based configuration with defaults that target
//!   the habit tracker project

pub mod config;
pub mod error;
pub mod firestore;
mod service_account;
pub mod setup;

pub use service_account::ServiceAccount;
