//! GitHub notification cache and view-model pipeline.

mod archive;
mod cache;
mod layout;
mod models;
mod view_model;

pub use archive::{ArchiveError, ArchiveStore};
pub use cache::{CacheError, CacheEvent, NotificationCache, OperationId};
pub use models::{NotificationRecord, SubjectKind};
pub use view_model::{build_view_models, BuildError, NotificationViewModel, RowLayout};
