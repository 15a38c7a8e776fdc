//! Adapter implementations for the task aggregation ports.

pub mod http;
pub mod memory;

pub use http::{HttpAttachmentFetcher, HttpFlowTransport};
pub use memory::{RecordedCall, ScriptedFlowTransport};
