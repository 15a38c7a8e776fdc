//! Scripted in-memory transport for service and integration tests.

use crate::task::ports::{
    FlowEndpoint, FlowTransport, FlowTransportError, FlowTransportResult, check_envelope,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// A request observed by [`ScriptedFlowTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Endpoint called.
    pub endpoint: FlowEndpoint,
    /// Request document.
    pub payload: Value,
}

#[derive(Debug, Clone)]
struct Route {
    endpoint: FlowEndpoint,
    condition: Option<(String, Value)>,
    reply: Result<Value, FlowTransportError>,
}

impl Route {
    fn matches(&self, endpoint: FlowEndpoint, payload: &Value) -> bool {
        self.endpoint == endpoint
            && self
                .condition
                .as_ref()
                .is_none_or(|(field, expected)| payload.get(field) == Some(expected))
    }
}

#[derive(Debug, Default)]
struct ScriptState {
    routes: Vec<Route>,
    calls: Vec<RecordedCall>,
}

/// Transport that answers from a script instead of the network.
///
/// Routes conditioned on a payload field take precedence over unconditioned
/// routes for the same endpoint. Bodies pass through the same envelope check
/// as the HTTP adapter. Unscripted calls fail with HTTP status 404.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFlowTransport {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedFlowTransport {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Script state is plain data, so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("scripted transport lock was poisoned; recovering script state");
            PoisonError::into_inner(poisoned)
        })
    }

    fn push(&self, route: Route) {
        self.lock().routes.push(route);
    }

    /// Answers every call to `endpoint` with `body`.
    pub fn respond(&self, endpoint: FlowEndpoint, body: Value) {
        self.push(Route {
            endpoint,
            condition: None,
            reply: Ok(body),
        });
    }

    /// Answers calls to `endpoint` whose payload has `field == value`.
    pub fn respond_when(
        &self,
        endpoint: FlowEndpoint,
        field: impl Into<String>,
        value: impl Into<Value>,
        body: Value,
    ) {
        self.push(Route {
            endpoint,
            condition: Some((field.into(), value.into())),
            reply: Ok(body),
        });
    }

    /// Fails every call to `endpoint` with `error`.
    pub fn fail(&self, endpoint: FlowEndpoint, error: FlowTransportError) {
        self.push(Route {
            endpoint,
            condition: None,
            reply: Err(error),
        });
    }

    /// Fails calls to `endpoint` whose payload has `field == value`.
    pub fn fail_when(
        &self,
        endpoint: FlowEndpoint,
        field: impl Into<String>,
        value: impl Into<Value>,
        error: FlowTransportError,
    ) {
        self.push(Route {
            endpoint,
            condition: Some((field.into(), value.into())),
            reply: Err(error),
        });
    }

    /// Returns every call observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Returns the calls made to one endpoint, in order.
    #[must_use]
    pub fn calls_to(&self, endpoint: FlowEndpoint) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.endpoint == endpoint)
            .collect()
    }
}

#[async_trait]
impl FlowTransport for ScriptedFlowTransport {
    async fn send(&self, endpoint: FlowEndpoint, payload: Value) -> FlowTransportResult<Value> {
        let reply = {
            let mut state = self.lock();
            let reply = state
                .routes
                .iter()
                .filter(|route| route.condition.is_some())
                .chain(state.routes.iter().filter(|route| route.condition.is_none()))
                .find(|route| route.matches(endpoint, &payload))
                .map(|route| route.reply.clone());
            state.calls.push(RecordedCall { endpoint, payload });
            reply
        };

        match reply {
            Some(Ok(body)) => check_envelope(body),
            Some(Err(error)) => Err(error),
            None => Err(FlowTransportError::Status {
                endpoint,
                status: 404,
            }),
        }
    }
}
