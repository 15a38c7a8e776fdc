//! Pipeline variants and remark policies.

use serde::{Deserialize, Serialize};

/// How much of the remark thread the pipeline assembles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentStrategy {
    /// Backfill older remarks and expand nested replies.
    FullEnrichment,
    /// Use the embedded remark page only; no backfill, no reply fetches.
    DetailOnly,
}

/// What to do with remarks whose delete flag is set.
///
/// The flag's meaning on the platform is not confirmed, so callers choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletedRemarkPolicy {
    /// Keep every remark and expose the flag on the comment.
    Retain,
    /// Drop delete-flagged remarks from the view.
    Hide,
}

impl DeletedRemarkPolicy {
    /// Returns whether a remark with the given flag is kept.
    #[must_use]
    pub const fn keeps(self, delete_flagged: bool) -> bool {
        match self {
            Self::Retain => true,
            Self::Hide => !delete_flagged,
        }
    }
}

/// Options for one pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Enrichment variant.
    pub strategy: EnrichmentStrategy,
    /// Delete-flag handling.
    pub deleted_remarks: DeletedRemarkPolicy,
}

impl PipelineOptions {
    /// Backfill and reply expansion, keeping delete-flagged remarks.
    #[must_use]
    pub const fn full_enrichment() -> Self {
        Self {
            strategy: EnrichmentStrategy::FullEnrichment,
            deleted_remarks: DeletedRemarkPolicy::Retain,
        }
    }

    /// Embedded remark page only, hiding delete-flagged remarks.
    #[must_use]
    pub const fn detail_only() -> Self {
        Self {
            strategy: EnrichmentStrategy::DetailOnly,
            deleted_remarks: DeletedRemarkPolicy::Hide,
        }
    }

    /// Overrides the delete-flag policy.
    #[must_use]
    pub const fn with_deleted_remarks(mut self, policy: DeletedRemarkPolicy) -> Self {
        self.deleted_remarks = policy;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::full_enrichment()
    }
}
