//! Hubcap Library
//!
//! Cache and view-model pipeline for GitHub notifications: raw records in,
//! width-sized render-ready rows out, with a disk archive for warm starts.

pub mod config;
pub mod notifications;

// Re-export commonly used types for convenience
pub use notifications::{
    ArchiveStore, CacheEvent, NotificationCache, NotificationRecord, NotificationViewModel,
};
