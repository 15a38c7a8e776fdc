//! Port contracts for task aggregation.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod attachments;
pub mod transport;

pub use attachments::{AttachmentFetchError, AttachmentFetchResult, AttachmentFetcher};
#[cfg(test)]
pub use transport::MockFlowTransport;
pub use transport::{
    FlowEndpoint, FlowTransport, FlowTransportError, FlowTransportResult, check_envelope,
};
