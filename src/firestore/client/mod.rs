use anyhow::Context;
use reqwest::{header::CONTENT_TYPE, StatusCode};

use crate::error::FirebaseError;
use crate::ServiceAccount;

use super::reference::{CollectionReference, DocumentReference};
use super::token_provider::TokenProvider;
use super::value::{CreatedDocument, Document};

mod options;

pub use options::FirestoreClientOptions;

/// A client for the Firestore REST API (`/v1`).
///
/// Without a service account, requests carry no credentials and only succeed
/// against a database whose security rules allow unauthenticated writes
/// (Firestore's "test mode").
pub struct FirestoreClient {
    http: reqwest::Client,
    options: FirestoreClientOptions,
    project_id: String,
    token_provider: Option<TokenProvider>,
}

impl FirestoreClient {
    pub fn new(
        project_id: impl Into<String>,
        options: FirestoreClientOptions,
    ) -> Result<Self, FirebaseError> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            options,
            project_id: project_id.into(),
            token_provider: None,
        })
    }

    /// Sign every request with a bearer token derived from the given service
    /// account.
    pub fn with_service_account(mut self, service_account: ServiceAccount) -> Self {
        self.token_provider = Some(TokenProvider::new(service_account));
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn root_resource_path(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.options.database_id
        )
    }

    /// The REST endpoint of a collection, for example
    /// `https://firestore.googleapis.com/v1/projects/my-project/databases/(default)/documents/test`.
    pub fn collection_url(&self, collection_ref: &CollectionReference) -> String {
        format!(
            "{}/v1/{}/{}",
            self.options.host_url.trim_end_matches('/'),
            self.root_resource_path(),
            collection_ref
        )
    }

    /// Creates a document in the given collection, letting Firestore generate
    /// the ID. Returns the ID of the created document when the response names
    /// it.
    ///
    /// `200 OK` counts as created whatever the body looks like. Any other
    /// status is returned as [`FirebaseError::UnexpectedStatus`] with the
    /// response body attached.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), fireseed::error::FirebaseError> {
    /// use fireseed::firestore::{
    ///     client::{FirestoreClient, FirestoreClientOptions},
    ///     collection,
    ///     value::Document,
    /// };
    ///
    /// let mut client = FirestoreClient::new("my-project", FirestoreClientOptions::default())?;
    ///
    /// let doc = Document::new().string("message", "Hi Mom!");
    /// let id = client.create_document(&collection("greetings"), &doc).await?;
    ///
    /// println!("Created document with ID: {id:?}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_document(
        &mut self,
        collection_ref: &CollectionReference,
        document: &Document,
    ) -> Result<Option<String>, FirebaseError> {
        self.create_document_internal(collection_ref, None, document)
            .await
    }

    /// Creates a document at the given document reference. Returns the ID of
    /// the created document when the response names it.
    ///
    /// Firestore refuses to create a document that already exists, which
    /// surfaces as an [`FirebaseError::UnexpectedStatus`] with status 409.
    pub async fn create_document_at_ref(
        &mut self,
        doc_ref: &DocumentReference,
        document: &Document,
    ) -> Result<Option<String>, FirebaseError> {
        self.create_document_internal(&doc_ref.parent(), Some(doc_ref.id()), document)
            .await
    }

    #[tracing::instrument(
        name = "Create Firestore document",
        skip(self, collection_ref, document),
        fields(collection = %collection_ref)
    )]
    async fn create_document_internal(
        &mut self,
        collection_ref: &CollectionReference,
        document_id: Option<&str>,
        document: &Document,
    ) -> Result<Option<String>, FirebaseError> {
        let url = self.collection_url(collection_ref);

        let mut request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(document);

        if let Some(id) = document_id {
            request = request.query(&[("documentId", id)]);
        }

        if let Some(token_provider) = self.token_provider.as_mut() {
            request = request.bearer_auth(token_provider.bearer_token()?);
        }

        tracing::debug!(%url, fields = document.len(), "Sending document to Firestore");

        let res = request.send().await?;
        let status = res.status();

        if status != StatusCode::OK {
            let body = res.text().await?;
            tracing::warn!(status = status.as_u16(), "Firestore did not create the document");
            return Err(FirebaseError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        match res.json::<CreatedDocument>().await {
            Ok(created) => {
                tracing::info!(
                    name = %created.name,
                    create_time = created.create_time.as_deref().unwrap_or("unknown"),
                    "Created Firestore document"
                );
                Ok(created.id().map(str::to_string))
            }
            Err(err) => {
                tracing::debug!(error = %err, "Created document, but could not read it back");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firestore::collection;

    #[test]
    fn collection_url_targets_the_default_database() {
        let client =
            FirestoreClient::new("habit-tracker-bc361", FirestoreClientOptions::default()).unwrap();

        assert_eq!(
            client.collection_url(&collection("test")),
            "https://firestore.googleapis.com/v1/projects/habit-tracker-bc361/databases/(default)/documents/test"
        );
    }

    #[test]
    fn collection_url_respects_host_and_database_overrides() {
        let options = FirestoreClientOptions::default()
            .host_url("http://127.0.0.1:8080/")
            .database_id("staging");
        let client = FirestoreClient::new("demo", options).unwrap();

        assert_eq!(
            client.collection_url(&collection("users").doc("alice").collection("habits")),
            "http://127.0.0.1:8080/v1/projects/demo/databases/staging/documents/users/alice/habits"
        );
    }
}
