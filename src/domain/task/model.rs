use serde::{Deserialize, Serialize};

/// A single entry of a user's task document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub file_url: Option<String>,
    pub completed: bool,
}

impl Task {
    /// Builds the task an append adds to `existing`: ids are 1-based and
    /// assigned as current count + 1, never reused or renumbered. Under
    /// concurrent appends two callers can observe the same count; whichever
    /// whole-document write lands last wins (see the repository).
    pub fn next(existing: &[Task], text: impl Into<String>, file_url: Option<String>) -> Self {
        Task {
            id: existing.len() as u64 + 1,
            text: text.into(),
            file_url,
            completed: false,
        }
    }
}

/// Decodes a stored document, a JSON array of task objects.
pub fn decode(bytes: &[u8]) -> Result<Vec<Task>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Encodes a document for storage. Total for in-memory documents.
pub fn encode(tasks: &[Task]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_assigned_as_count_plus_one() {
        let mut tasks = Vec::new();
        let first = Task::next(&tasks, "buy milk", None);
        assert_eq!(first.id, 1);
        assert!(!first.completed);
        tasks.push(first);

        let second = Task::next(&tasks, "walk the dog", None);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn documents_round_trip_through_the_codec() {
        let raw = br#"[{"id":1,"text":"buy milk","file_url":null,"completed":false}]"#;
        let tasks = decode(raw).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "buy milk");
        assert_eq!(tasks[0].file_url, None);

        let reencoded = encode(&tasks).unwrap();
        assert_eq!(decode(&reencoded).unwrap(), tasks);
    }

    #[test]
    fn absent_file_url_serializes_as_null() {
        let encoded = encode(&[Task::next(&[], "buy milk", None)]).unwrap();
        let json = String::from_utf8(encoded).unwrap();
        assert!(json.contains(r#""file_url":null"#));
    }

    #[test]
    fn non_array_documents_fail_to_decode() {
        assert!(decode(b"{}").is_err());
        assert!(decode(b"not json").is_err());
        assert!(decode(br#"["untyped"]"#).is_err());
    }
}
