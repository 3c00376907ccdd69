//! Request pipeline: middleware stages composed once in front of a transport.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::{instrument, trace};

use crate::Result;
use crate::interceptor::AuthInterceptor;
use crate::request::{IncomingResponse, OutgoingRequest};
use crate::session::SessionService;
use crate::traits::{Middleware, Transport};

/// The continuation handed to a [`Middleware`] stage.
///
/// Calling [`Next::run`] passes the request to the remaining stages and
/// finally to the transport.
pub struct Next<'a> {
    stages: &'a [Arc<dyn Middleware>],
    transport: &'a dyn Transport,
}

impl<'a> Next<'a> {
    /// Forward `request` downstream.
    pub async fn run(self, request: OutgoingRequest) -> Result<IncomingResponse> {
        match self.stages.split_first() {
            Some((stage, rest)) => {
                let next = Next {
                    stages: rest,
                    transport: self.transport,
                };
                stage.handle(request, next).await
            }
            None => {
                trace!(method = %request.method, url = %request.url, "Dispatching request");
                self.transport.send(request).await
            }
        }
    }
}

/// An ordered chain of middleware ending in a transport.
///
/// Built once at start-up with [`Pipeline::builder`]. When session
/// authentication is enabled its stage always runs first and runs exactly
/// once per request.
///
/// Cloning is cheap; clones share stages and transport.
#[derive(Clone)]
pub struct Pipeline {
    stages: Arc<[Arc<dyn Middleware>]>,
    transport: Arc<dyn Transport>,
}

impl Pipeline {
    /// Start building a pipeline that ends in `transport`.
    pub fn builder(transport: Arc<dyn Transport>) -> PipelineBuilder {
        PipelineBuilder {
            transport,
            auth: None,
            stages: Vec::new(),
        }
    }

    /// Number of middleware stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if requests go straight to the transport.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Send `request` through every stage and the transport.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn send(&self, request: OutgoingRequest) -> Result<IncomingResponse> {
        let next = Next {
            stages: &self.stages,
            transport: self.transport.as_ref(),
        };
        next.run(request).await
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}

/// Builder for [`Pipeline`].
pub struct PipelineBuilder {
    transport: Arc<dyn Transport>,
    auth: Option<Arc<dyn Middleware>>,
    stages: Vec<Arc<dyn Middleware>>,
}

impl PipelineBuilder {
    /// Attach session credentials to every request.
    ///
    /// The stage is placed ahead of all others regardless of call order.
    /// Calling this again replaces the previous session.
    pub fn with_session_auth(mut self, session: SessionService) -> Self {
        self.auth = Some(Arc::new(AuthInterceptor::new(session)));
        self
    }

    /// Append a stage. Stages run in the order they are added.
    ///
    /// An [`AuthInterceptor`] passed here is treated like
    /// [`with_session_auth`](Self::with_session_auth): it goes first and
    /// replaces any earlier session stage.
    pub fn with<M: Middleware + 'static>(mut self, stage: M) -> Self {
        if let Some(auth) = (&stage as &dyn Any).downcast_ref::<AuthInterceptor>() {
            self.auth = Some(Arc::new(auth.clone()));
            return self;
        }
        self.stages.push(Arc::new(stage));
        self
    }

    /// Finish the pipeline.
    pub fn build(self) -> Pipeline {
        let stages: Vec<Arc<dyn Middleware>> =
            self.auth.into_iter().chain(self.stages).collect();

        Pipeline {
            stages: stages.into(),
            transport: self.transport,
        }
    }
}
