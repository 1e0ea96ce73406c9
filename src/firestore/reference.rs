use std::fmt;

/// Shorthand for [`CollectionReference::new`].
pub fn collection(name: impl Into<String>) -> CollectionReference {
    CollectionReference::new(name)
}

/// Path to a collection, relative to the `documents` root of a database.
///
/// Paths alternate between collection and document segments, so a
/// collection path always has an odd number of segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReference {
    segments: Vec<String>,
}

/// Path to a single document, relative to the `documents` root of a
/// database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReference {
    segments: Vec<String>,
}

impl CollectionReference {
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            segments: vec![collection_name.into()],
        }
    }

    pub fn doc(&self, id: impl Into<String>) -> DocumentReference {
        let mut segments = self.segments.clone();
        segments.push(id.into());
        DocumentReference { segments }
    }
}

impl DocumentReference {
    pub fn collection(&self, name: impl Into<String>) -> CollectionReference {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        CollectionReference { segments }
    }

    pub fn parent(&self) -> CollectionReference {
        CollectionReference {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        }
    }

    pub fn id(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for CollectionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_reference() {
        assert_eq!(collection("test").to_string(), "test");
    }

    #[test]
    fn document_reference() {
        let doc = collection("users").doc("alice");

        assert_eq!(doc.to_string(), "users/alice");
        assert_eq!(doc.id(), "alice");
        assert_eq!(doc.parent(), collection("users"));
    }

    #[test]
    fn nested_habits_under_a_user() {
        let habits = collection("users").doc("alice").collection("habits");

        assert_eq!(habits.to_string(), "users/alice/habits");
        assert_eq!(
            habits.doc("morning-exercise").to_string(),
            "users/alice/habits/morning-exercise"
        );
    }
}
