//! Common test infrastructure
//!
//! Fixture builders shared by the end-to-end pipeline tests.

use chrono::{TimeZone, Utc};
use hubcap::notifications::{NotificationRecord, SubjectKind};

pub fn record(id: &str, read: bool) -> NotificationRecord {
    NotificationRecord {
        id: id.to_string(),
        read,
        title: format!("notification {}", id),
        repo: "octocat/hello-world".to_string(),
        subject: SubjectKind::Issue,
        updated_at: Utc.timestamp_opt(1700000000, 0).unwrap(),
    }
}

pub fn record_with_title(id: &str, read: bool, title: &str) -> NotificationRecord {
    NotificationRecord {
        title: title.to_string(),
        ..record(id, read)
    }
}
