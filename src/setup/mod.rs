//! The one-shot database setup: write a first document so the database
//! exists, then tell the operator what happened.
//!
//! Every line meant for the operator goes to the writer passed to
//! [`DatabaseSetup::run`]; diagnostics go through `tracing`.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::{
    error::FirebaseError,
    firestore::{client::FirestoreClient, collection},
};

pub mod payloads;

/// The collection the initialization document is written to.
pub const TEST_COLLECTION: &str = "test";

const NEXT_STEPS: [&str; 4] = [
    "Run your Flutter app: flutter run",
    "Sign up or sign in to create your first user",
    "Create your first habit",
    "Check Firebase Console to see your data",
];

/// How a setup run ended. The process exits normally in every case; this is
/// only for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Firestore answered `200 OK`. The ID is only known when the response
    /// body could be read back.
    Initialized { document_id: Option<String> },
    /// Firestore answered with something other than `200 OK`.
    Rejected { status: u16 },
    /// The request never got a usable answer.
    Failed,
}

pub struct DatabaseSetup {
    client: FirestoreClient,
}

impl DatabaseSetup {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }

    /// Sends the initialization document, stamped with `now`, and reports the
    /// outcome to `out`. Only failures to write to `out` are returned as
    /// errors.
    pub async fn run<W: Write>(
        &mut self,
        out: &mut W,
        now: DateTime<Utc>,
    ) -> io::Result<SetupOutcome> {
        writeln!(out, "🔥 Setting up Firebase Firestore Database...")?;
        writeln!(out, "Project ID: {}", self.client.project_id())?;

        let document = payloads::test_document(now);
        let result = self
            .client
            .create_document(&collection(TEST_COLLECTION), &document)
            .await;

        let outcome = match result {
            Ok(document_id) => {
                self.report_success(out, now)?;
                SetupOutcome::Initialized { document_id }
            }
            Err(FirebaseError::UnexpectedStatus { status, body }) => {
                writeln!(out, "❌ Error initializing database: {status}")?;
                writeln!(out, "Response: {body}")?;
                SetupOutcome::Rejected { status }
            }
            Err(err) => {
                tracing::debug!(error = ?err, "Database setup failed");
                writeln!(out, "❌ Error: {err}")?;
                print_manual_setup(out, self.client.project_id())?;
                SetupOutcome::Failed
            }
        };

        out.flush()?;
        Ok(outcome)
    }

    fn report_success<W: Write>(&self, out: &mut W, now: DateTime<Utc>) -> io::Result<()> {
        writeln!(out, "✅ Database initialized successfully!")?;
        writeln!(out, "📊 You can now use your habit tracker app with Firebase.")?;

        // These only illustrate the record layout; the app creates the real
        // ones when users sign up and add habits.
        let user = payloads::sample_user(now);
        let habit = payloads::sample_habit(now);
        tracing::debug!(
            user_fields = user.len(),
            habit_fields = habit.len(),
            "Built sample data structure"
        );

        writeln!(out, "📝 Creating sample data structure...")?;
        writeln!(out, "✅ Database setup complete!")?;
        writeln!(out, "\n🎯 Next steps:")?;
        for (i, step) in NEXT_STEPS.iter().enumerate() {
            writeln!(out, "{}. {step}", i + 1)?;
        }

        Ok(())
    }
}

/// Walks the operator through creating the database by hand in the Firebase
/// console.
pub fn print_manual_setup<W: Write>(out: &mut W, project_id: &str) -> io::Result<()> {
    writeln!(out, "\n💡 Manual Setup Required:")?;
    writeln!(out, "1. Go to https://console.firebase.google.com/")?;
    writeln!(out, "2. Select project: {project_id}")?;
    writeln!(out, "3. Go to Firestore Database")?;
    writeln!(out, "4. Click 'Create database'")?;
    writeln!(out, "5. Choose 'Start in test mode'")?;
    writeln!(out, "6. Select a location and click 'Done'")?;
    Ok(())
}
