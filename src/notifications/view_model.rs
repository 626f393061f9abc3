//! Display-ready notification view models.
//!
//! A view model is a pure projection of a raw record at a fixed render
//! width: same record and width always produce an equal view model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layout;
use super::models::{NotificationRecord, SubjectKind};

/// Errors from view-model construction.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("render width must be positive, got {0}")]
    InvalidWidth(usize),
}

/// Precomputed row layout at a fixed width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowLayout {
    /// Width in columns the row was laid out for.
    pub width: usize,
    /// Title wrapped to `width`, at least one line.
    pub title_lines: Vec<String>,
    /// Total row height in lines, including the metadata line.
    pub height: usize,
}

/// A render-ready notification row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationViewModel {
    pub id: String,
    pub read: bool,
    pub repo: String,
    pub subject: SubjectKind,
    /// Short date string derived from the record's `updated_at`.
    pub date_line: String,
    pub layout: RowLayout,
}

/// Build view models for `records` at `width` columns.
///
/// Output has the same length and order as the input. Pure and
/// deterministic; does not touch the filesystem or the clock.
pub fn build_view_models(
    records: &[NotificationRecord],
    width: usize,
) -> Result<Vec<NotificationViewModel>, BuildError> {
    if width == 0 {
        return Err(BuildError::InvalidWidth(width));
    }

    let view_models = records
        .iter()
        .map(|record| {
            let title_lines = layout::wrap(&record.title, width);
            let height = title_lines.len() + 1;
            NotificationViewModel {
                id: record.id.clone(),
                read: record.read,
                repo: record.repo.clone(),
                subject: record.subject,
                date_line: record.updated_at.format("%b %d").to_string(),
                layout: RowLayout {
                    width,
                    title_lines,
                    height,
                },
            }
        })
        .collect();
    Ok(view_models)
}
