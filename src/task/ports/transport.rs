//! Transport port for the Flow request/response endpoints.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for transport operations.
pub type FlowTransportResult<T> = Result<T, FlowTransportError>;

/// Remote endpoints the crate consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowEndpoint {
    /// Task grid list, filtered and paged.
    TaskList,
    /// Post detail with an embedded remark page.
    PostDetail,
    /// Nested replies of one remark.
    ReplyList,
    /// Remarks older than an anchor remark.
    PreviousRemarks,
}

impl FlowEndpoint {
    /// Returns the path, including any fixed query, relative to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::TaskList => "/ACT_GRID_TASK_LIST_R001.jct",
            Self::PostDetail => "/COLABO2_R104.jct?mode=DETAIL",
            Self::ReplyList => "/ACT_FETCH_REPLY_LIST.jct",
            Self::PreviousRemarks => "/COLABO2_REMARK_R101.jct?mode=M",
        }
    }

    /// Returns a short operation name for logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskList => "task_list",
            Self::PostDetail => "post_detail",
            Self::ReplyList => "reply_list",
            Self::PreviousRemarks => "previous_remarks",
        }
    }
}

impl fmt::Display for FlowEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request/response caller against the Flow platform.
///
/// Implementations send `payload` as the request document and return the
/// parsed response body once its envelope has been checked with
/// [`check_envelope`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlowTransport: Send + Sync {
    /// Sends one request and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`FlowTransportError::Remote`] when the envelope reports an
    /// error and a transport-class variant for HTTP or decoding failures.
    async fn send(&self, endpoint: FlowEndpoint, payload: Value) -> FlowTransportResult<Value>;
}

/// Errors returned by transport adapters.
#[derive(Debug, Clone, Error)]
pub enum FlowTransportError {
    /// The platform answered with a non-success HTTP status.
    #[error("{endpoint} failed with HTTP status {status}")]
    Status {
        /// Endpoint called.
        endpoint: FlowEndpoint,
        /// HTTP status code.
        status: u16,
    },

    /// The call did not complete within the configured timeout.
    #[error("{0} timed out")]
    Timeout(FlowEndpoint),

    /// The request could not be sent or the body could not be read.
    #[error("connection error: {0}")]
    Connection(Arc<dyn std::error::Error + Send + Sync>),

    /// The body was not valid JSON.
    #[error("response decode error: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),

    /// The response envelope carried an error flag.
    #[error("remote error {code}: {message}")]
    Remote {
        /// Envelope code.
        code: String,
        /// Envelope message.
        message: String,
    },
}

impl FlowTransportError {
    /// Wraps a connection-level error.
    pub fn connection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connection(Arc::new(err))
    }

    /// Wraps a body decoding error.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }

    /// Returns whether the failure came from the envelope rather than the
    /// transport.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

/// Checks the `COMMON_HEAD` envelope of a response body.
///
/// Bodies without an envelope pass through unchanged.
///
/// # Errors
///
/// Returns [`FlowTransportError::Remote`] when the envelope's error flag is
/// set.
pub fn check_envelope(body: Value) -> FlowTransportResult<Value> {
    let Some(head) = body.get("COMMON_HEAD") else {
        return Ok(body);
    };
    let flagged = match head.get("ERROR") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true") || flag == "Y",
        _ => false,
    };
    if !flagged {
        return Ok(body);
    }

    let text = |key: &str| match head.get(key) {
        Some(Value::String(value)) => value.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    Err(FlowTransportError::Remote {
        code: text("CODE"),
        message: text("MESSAGE"),
    })
}
