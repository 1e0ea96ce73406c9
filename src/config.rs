use std::path::PathBuf;

use crate::{
    error::FirebaseError,
    firestore::client::{FirestoreClient, FirestoreClientOptions},
    ServiceAccount,
};

pub const DEFAULT_PROJECT_ID: &str = "habit-tracker-bc361";

/// Where and how the setup talks to Firestore.
///
/// Every setting has a default, so with an empty environment the setup writes
/// unauthenticated to the production endpoint of [`DEFAULT_PROJECT_ID`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupConfig {
    pub project_id: String,
    pub host_url: String,
    pub service_account_path: Option<PathBuf>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            host_url: FirestoreClientOptions::default().host_url,
            service_account_path: None,
        }
    }
}

impl SetupConfig {
    /// Reads `FIREBASE_PROJECT_ID`, `FIRESTORE_HOST_URL` and
    /// `FIREBASE_SERVICE_ACCOUNT` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SetupConfig::from_env`], but with a custom lookup. Empty values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            project_id: get("FIREBASE_PROJECT_ID").unwrap_or(defaults.project_id),
            host_url: get("FIRESTORE_HOST_URL").unwrap_or(defaults.host_url),
            service_account_path: get("FIREBASE_SERVICE_ACCOUNT").map(PathBuf::from),
        }
    }

    pub fn build_client(&self) -> Result<FirestoreClient, FirebaseError> {
        let options = FirestoreClientOptions::default().host_url(&self.host_url);
        let client = FirestoreClient::new(&self.project_id, options)?;

        match &self.service_account_path {
            Some(path) => {
                let service_account = ServiceAccount::from_file(path)?;
                tracing::info!(path = %path.display(), "Authenticating with service account");
                Ok(client.with_service_account(service_account))
            }
            None => Ok(client),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_the_hard_coded_project() {
        let config = SetupConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config, SetupConfig::default());
        assert_eq!(config.project_id, "habit-tracker-bc361");
        assert_eq!(config.host_url, "https://firestore.googleapis.com");
        assert_eq!(config.service_account_path, None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = SetupConfig::from_lookup(lookup_from(&[
            ("FIREBASE_PROJECT_ID", "demo-project"),
            ("FIRESTORE_HOST_URL", "http://127.0.0.1:8080"),
            ("FIREBASE_SERVICE_ACCOUNT", "/secrets/account.json"),
        ]));

        assert_eq!(config.project_id, "demo-project");
        assert_eq!(config.host_url, "http://127.0.0.1:8080");
        assert_eq!(
            config.service_account_path,
            Some(PathBuf::from("/secrets/account.json"))
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = SetupConfig::from_lookup(lookup_from(&[
            ("FIREBASE_PROJECT_ID", ""),
            ("FIREBASE_SERVICE_ACCOUNT", "  "),
        ]));

        assert_eq!(config, SetupConfig::default());
    }

    #[test]
    fn unreadable_service_account_fails_client_construction() {
        let config = SetupConfig {
            service_account_path: Some(PathBuf::from("/nonexistent/account.json")),
            ..SetupConfig::default()
        };

        assert!(config.build_client().is_err());
    }
}
