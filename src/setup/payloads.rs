use chrono::{DateTime, Utc};

use crate::firestore::value::Document;

/// The document written to the `test` collection to bring the database into
/// existence.
pub fn test_document(now: DateTime<Utc>) -> Document {
    Document::new()
        .string("message", "Database initialized successfully")
        .timestamp("timestamp", now)
        .string("status", "active")
}

/// The shape of a user record as the habit tracker app stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleUser {
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// The shape of a habit record as the habit tracker app stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleHabit {
    pub title: String,
    pub description: String,
    pub frequency: String,
    pub created_at: DateTime<Utc>,
    pub streak_count: i64,
    pub is_active: bool,
}

impl SampleUser {
    pub fn example(now: DateTime<Utc>) -> Self {
        Self {
            email: "test@example.com".to_string(),
            display_name: "Test User".to_string(),
            created_at: now,
        }
    }
}

impl SampleHabit {
    pub fn example(now: DateTime<Utc>) -> Self {
        Self {
            title: "Morning Exercise".to_string(),
            description: "Daily morning workout routine".to_string(),
            frequency: "daily".to_string(),
            created_at: now,
            streak_count: 0,
            is_active: true,
        }
    }
}

impl From<&SampleUser> for Document {
    fn from(user: &SampleUser) -> Self {
        Document::new()
            .string("email", &user.email)
            .string("displayName", &user.display_name)
            .timestamp("createdAt", user.created_at)
    }
}

impl From<&SampleHabit> for Document {
    fn from(habit: &SampleHabit) -> Self {
        Document::new()
            .string("title", &habit.title)
            .string("description", &habit.description)
            .string("frequency", &habit.frequency)
            .timestamp("createdAt", habit.created_at)
            .integer("streakCount", habit.streak_count)
            .boolean("isActive", habit.is_active)
    }
}

pub fn sample_user(now: DateTime<Utc>) -> Document {
    Document::from(&SampleUser::example(now))
}

pub fn sample_habit(now: DateTime<Utc>) -> Document {
    Document::from(&SampleHabit::example(now))
}
