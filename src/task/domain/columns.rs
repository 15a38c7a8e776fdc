//! Tag-indexed access to task summary columns.

use super::{TaskColumn, TaskSummaryRecord};
use std::collections::HashMap;

/// Column-type labels the crate reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnTag {
    /// User-facing task number.
    TaskNumber,
    /// Task name.
    TaskName,
    /// Status code.
    Status,
    /// Due date.
    EndDate,
    /// Last edit timestamp.
    EditedAt,
    /// Assignees, one cell per worker.
    Workers,
}

impl ColumnTag {
    /// Returns the platform label for this tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskNumber => "TASK_NUM",
            Self::TaskName => "TASK_NM",
            Self::Status => "STTS",
            Self::EndDate => "END_DT",
            Self::EditedAt => "EDTR_DTTM",
            Self::Workers => "WORKER_ID",
        }
    }
}

/// One-pass index from column tag to column, built per summary record.
///
/// When several columns carry the same tag the first one wins.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex<'a> {
    by_tag: HashMap<&'a str, &'a TaskColumn>,
}

impl<'a> ColumnIndex<'a> {
    /// Indexes the columns of a summary record.
    #[must_use]
    pub fn new(summary: &'a TaskSummaryRecord) -> Self {
        Self::from_columns(&summary.columns)
    }

    /// Indexes a column slice.
    #[must_use]
    pub fn from_columns(columns: &'a [TaskColumn]) -> Self {
        let mut by_tag = HashMap::with_capacity(columns.len());
        for column in columns {
            by_tag.entry(column.tag.as_str()).or_insert(column);
        }
        Self { by_tag }
    }

    /// Returns the first cell value of the tagged column, or `""`.
    #[must_use]
    pub fn value(&self, tag: ColumnTag) -> &'a str {
        self.by_tag
            .get(tag.as_str())
            .and_then(|column| column.cells.first())
            .map_or("", |cell| cell.value.as_str())
    }

    /// Returns the non-blank user names of every cell in the tagged column.
    #[must_use]
    pub fn user_names(&self, tag: ColumnTag) -> Vec<String> {
        self.by_tag
            .get(tag.as_str())
            .map(|column| {
                column
                    .cells
                    .iter()
                    .map(|cell| cell.user_name.trim())
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}
