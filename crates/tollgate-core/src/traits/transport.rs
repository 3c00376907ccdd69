//! Transport and middleware traits.

use async_trait::async_trait;

use crate::Result;
use crate::pipeline::Next;
use crate::request::{IncomingResponse, OutgoingRequest};

/// Sends a fully shaped request over the network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch `request` and return the response.
    async fn send(&self, request: OutgoingRequest) -> Result<IncomingResponse>;
}

/// A request-shaping stage in a [`Pipeline`](crate::Pipeline).
///
/// A stage receives the request and a continuation. It forwards by calling
/// [`Next::run`], possibly with a modified request.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Handle `request`, forwarding it through `next`.
    async fn handle(&self, request: OutgoingRequest, next: Next<'_>) -> Result<IncomingResponse>;
}
