//! Raw notification data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Issue,
    PullRequest,
    Commit,
    Release,
    Other,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Issue => "issue",
            SubjectKind::PullRequest => "pull_request",
            SubjectKind::Commit => "commit",
            SubjectKind::Release => "release",
            SubjectKind::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "issue" => Some(SubjectKind::Issue),
            "pull_request" => Some(SubjectKind::PullRequest),
            "commit" => Some(SubjectKind::Commit),
            "release" => Some(SubjectKind::Release),
            "other" => Some(SubjectKind::Other),
            _ => None,
        }
    }
}

/// A raw notification as delivered by the API client.
///
/// The cache only interprets `id` and `read`; everything else is display
/// payload carried through to the view model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: String,
    pub read: bool,
    pub title: String,
    /// Repository full name, e.g. "rust-lang/rust".
    pub repo: String,
    pub subject: SubjectKind,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> NotificationRecord {
        NotificationRecord {
            id: "notif-123".to_string(),
            read: false,
            title: "Fix tokenizer panic on empty input".to_string(),
            repo: "octocat/hello-world".to_string(),
            subject: SubjectKind::Issue,
            updated_at: Utc.timestamp_opt(1700000000, 0).unwrap(),
        }
    }

    #[test]
    fn test_subject_kind_serialization() {
        let pr = SubjectKind::PullRequest;
        let serialized = serde_json::to_string(&pr).unwrap();
        assert_eq!(serialized, "\"pull_request\"");

        let deserialized: SubjectKind = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, SubjectKind::PullRequest);
    }

    #[test]
    fn test_subject_kind_str_round_trip() {
        for kind in [
            SubjectKind::Issue,
            SubjectKind::PullRequest,
            SubjectKind::Commit,
            SubjectKind::Release,
            SubjectKind::Other,
        ] {
            assert_eq!(SubjectKind::from_str(kind.as_str()), Some(kind));
        }
        assert!(SubjectKind::from_str("invalid").is_none());
    }

    #[test]
    fn test_record_serialization() {
        let record = sample_record();

        let serialized = serde_json::to_string(&record).unwrap();
        let deserialized: NotificationRecord = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.id, "notif-123");
        assert!(!deserialized.read);
        assert_eq!(deserialized.title, "Fix tokenizer panic on empty input");
        assert_eq!(deserialized.repo, "octocat/hello-world");
        assert_eq!(deserialized.subject, SubjectKind::Issue);
        assert_eq!(deserialized.updated_at.timestamp(), 1700000000);
    }

    #[test]
    fn test_record_collection_round_trip() {
        let records = vec![
            sample_record(),
            NotificationRecord {
                id: "notif-456".to_string(),
                read: true,
                ..sample_record()
            },
        ];

        let serialized = serde_json::to_string(&records).unwrap();
        let deserialized: Vec<NotificationRecord> = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, records);
    }
}
