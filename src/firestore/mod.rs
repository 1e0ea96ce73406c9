//! # Firestore
//!
//! A small client for the Firestore REST API, covering what is needed to
//! bootstrap a database: addressing collections and documents, encoding
//! document fields, and creating documents.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), fireseed::error::FirebaseError> {
//! use fireseed::firestore::{
//!     client::{FirestoreClient, FirestoreClientOptions},
//!     collection,
//!     value::Document,
//! };
//!
//! // Talk to a local emulator instead of Google's servers.
//! let options = FirestoreClientOptions::default().host_url("http://127.0.0.1:8080");
//! let mut client = FirestoreClient::new("habit-tracker", options)?;
//!
//! let habit = Document::new()
//!     .string("title", "Read a chapter")
//!     .integer("streakCount", 3)
//!     .boolean("isActive", true);
//!
//! client
//!     .create_document_at_ref(
//!         &collection("users").doc("alice").collection("habits").doc("reading"),
//!         &habit,
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod reference;
mod token_provider;
pub mod value;

pub use reference::collection;
