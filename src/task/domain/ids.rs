//! Identifier types for the task domain.
//!
//! Platform identifiers are opaque serial strings. Only the user-facing task
//! number is validated; internal ids are carried exactly as the platform
//! reports them.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! platform_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

platform_id!(
    /// Project (collaboration room) identifier, `COLABO_SRNO`.
    ProjectId
);
platform_id!(
    /// Post identifier within a project, `COLABO_COMMT_SRNO`.
    PostId
);
platform_id!(
    /// Remark identifier within a post, `COLABO_REMARK_SRNO`.
    RemarkId
);
platform_id!(
    /// Tenant-scoping organization identifier, `USE_INTT_ID`.
    OrgId
);

/// User-facing task number, distinct from any internal id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskNumber(String);

impl TaskNumber {
    /// Creates a validated task number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskNumber`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTaskNumber);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the task number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
