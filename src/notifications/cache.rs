//! In-memory notification cache with off-thread rebuilds.
//!
//! The cache is owned by a single task (the render loop); all reads and all
//! state mutation happen there, so no locking is needed. `submit_update` and
//! `submit_append` hand the heavy work (view-model build, archive write) to
//! the blocking pool and queue a completion; the owning task drains the
//! queue through [`NotificationCache::next_event`], which applies each
//! completion before returning it.
//!
//! Every submission gets a monotonically increasing [`OperationId`]. A
//! completion older than the latest submitted replacement is superseded and
//! silently discarded, so rapid successive refreshes can never resurrect
//! stale state.

use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error};

use super::archive::{ArchiveError, ArchiveStore};
use super::models::NotificationRecord;
use super::view_model::{build_view_models, BuildError, NotificationViewModel};

/// Identifier of a submitted cache operation, increasing in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OperationId(u64);

/// Errors from cache entry points.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// What a drained completion did to the cache.
#[derive(Debug)]
pub enum CacheEvent {
    /// The view-model list was replaced wholesale.
    Replaced {
        op: OperationId,
        total: usize,
        /// Outcome of archiving the raw records; `Some` means the write
        /// failed and the caller may want to log or retry.
        persist_error: Option<ArchiveError>,
    },
    /// New rows were appended to the end of the list.
    Appended {
        op: OperationId,
        added: usize,
        total: usize,
    },
}

enum CompletionPayload {
    Replace {
        view_models: Vec<NotificationViewModel>,
        persist_result: Result<(), ArchiveError>,
    },
    Append {
        view_models: Vec<NotificationViewModel>,
    },
}

struct Completion {
    op: OperationId,
    payload: CompletionPayload,
}

/// Holder of the current notification view models and the locally-applied
/// "optimistic read" id set.
pub struct NotificationCache {
    view_models: Vec<NotificationViewModel>,
    optimistic_read_ids: HashSet<String>,
    store: Arc<ArchiveStore>,
    next_op: u64,
    latest_replace: Option<OperationId>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl NotificationCache {
    pub fn new(store: ArchiveStore) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            view_models: Vec::new(),
            optimistic_read_ids: HashSet::new(),
            store: Arc::new(store),
            next_op: 0,
            latest_replace: None,
            completion_tx,
            completion_rx,
        }
    }

    /// Populate the cache from the archive, synchronously.
    ///
    /// Intended to run once at session start, before any network result is
    /// available, so stale rows can be shown immediately. Leaves the cache
    /// empty when nothing usable is archived. Returns the number of rows
    /// warmed.
    pub fn warm(&mut self, width: usize) -> Result<usize, CacheError> {
        if width == 0 {
            return Err(BuildError::InvalidWidth(width).into());
        }
        let records = self.store.load();
        if records.is_empty() {
            return Ok(0);
        }
        self.view_models = build_view_models(&records, width)?;
        Ok(self.view_models.len())
    }

    /// Submit a full replacement of the cache with `records`.
    ///
    /// View models are built and the raw records archived on the blocking
    /// pool; the in-memory list changes only when the owning task drains the
    /// completion via [`next_event`](Self::next_event). The optimistic-read
    /// set is untouched. Must be called within a tokio runtime.
    pub fn submit_update(
        &mut self,
        width: usize,
        records: Vec<NotificationRecord>,
    ) -> Result<OperationId, CacheError> {
        if width == 0 {
            return Err(BuildError::InvalidWidth(width).into());
        }
        let op = self.next_operation_id();
        self.latest_replace = Some(op);

        let store = Arc::clone(&self.store);
        let tx = self.completion_tx.clone();
        tokio::task::spawn_blocking(move || {
            let view_models = match build_view_models(&records, width) {
                Ok(view_models) => view_models,
                Err(err) => {
                    error!(%err, "view-model build failed");
                    return;
                }
            };
            let persist_result = store.save(&records);
            // a closed receiver means the cache itself is gone
            let _ = tx.send(Completion {
                op,
                payload: CompletionPayload::Replace {
                    view_models,
                    persist_result,
                },
            });
        });
        Ok(op)
    }

    /// Submit an incremental batch to append after the current rows.
    ///
    /// Only the new records are built, off-thread. Append batches are
    /// pagination tails and are not archived; the archive always holds the
    /// most recent full refresh (see DESIGN.md).
    pub fn submit_append(
        &mut self,
        width: usize,
        records: Vec<NotificationRecord>,
    ) -> Result<OperationId, CacheError> {
        if width == 0 {
            return Err(BuildError::InvalidWidth(width).into());
        }
        let op = self.next_operation_id();

        let tx = self.completion_tx.clone();
        tokio::task::spawn_blocking(move || {
            let view_models = match build_view_models(&records, width) {
                Ok(view_models) => view_models,
                Err(err) => {
                    error!(%err, "view-model build failed");
                    return;
                }
            };
            let _ = tx.send(Completion {
                op,
                payload: CompletionPayload::Append { view_models },
            });
        });
        Ok(op)
    }

    /// Apply the next non-superseded completion and describe it.
    ///
    /// Resolves once a submitted operation finishes; with nothing in flight
    /// it waits until one is submitted. Completions superseded by a later
    /// `submit_update` are discarded with a debug log and never surface.
    pub async fn next_event(&mut self) -> Option<CacheEvent> {
        while let Some(completion) = self.completion_rx.recv().await {
            if let Some(event) = self.apply(completion) {
                return Some(event);
            }
        }
        // unreachable in practice: the cache holds a sender for its lifetime
        None
    }

    fn apply(&mut self, completion: Completion) -> Option<CacheEvent> {
        if let Some(latest) = self.latest_replace {
            if completion.op < latest {
                debug!(op = completion.op.0, latest = latest.0, "discarding superseded completion");
                return None;
            }
        }
        match completion.payload {
            CompletionPayload::Replace {
                view_models,
                persist_result,
            } => {
                self.view_models = view_models;
                Some(CacheEvent::Replaced {
                    op: completion.op,
                    total: self.view_models.len(),
                    persist_error: persist_result.err(),
                })
            }
            CompletionPayload::Append { view_models } => {
                let added = view_models.len();
                self.view_models.extend(view_models);
                Some(CacheEvent::Appended {
                    op: completion.op,
                    added,
                    total: self.view_models.len(),
                })
            }
        }
    }

    fn next_operation_id(&mut self) -> OperationId {
        self.next_op += 1;
        OperationId(self.next_op)
    }

    // Read accessors. The owning task is the only caller, so plain borrows
    // are enough.

    /// Every current row, insertion order preserved.
    pub fn all(&self) -> &[NotificationViewModel] {
        &self.view_models
    }

    /// Rows that are neither read-flagged nor optimistically marked read.
    pub fn unread(&self) -> Vec<&NotificationViewModel> {
        self.view_models
            .iter()
            .filter(|vm| !self.is_read(vm))
            .collect()
    }

    pub fn has_unread(&self) -> bool {
        self.view_models.iter().any(|vm| !self.is_read(vm))
    }

    pub fn is_read(&self, view_model: &NotificationViewModel) -> bool {
        view_model.read || self.optimistic_read_ids.contains(&view_model.id)
    }

    /// Mark `id` read locally before server confirmation. No check that the
    /// id corresponds to a current row.
    pub fn set_optimistic_read(&mut self, id: impl Into<String>) {
        self.optimistic_read_ids.insert(id.into());
    }

    pub fn remove_optimistic_read(&mut self, id: &str) {
        self.optimistic_read_ids.remove(id);
    }
}
