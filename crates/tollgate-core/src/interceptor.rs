//! Request interceptor attaching the session token to outbound requests.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tracing::{trace, warn};

use crate::Result;
use crate::pipeline::Next;
use crate::request::{IncomingResponse, OutgoingRequest};
use crate::session::SessionService;
use crate::traits::Middleware;

/// Adds `Authorization: Bearer <token>` when the session holds a tokened
/// identity.
///
/// Reads the store on every request. Anything short of a valid, non-empty
/// token (no session, malformed record, empty token, token with bytes that
/// cannot go in a header) forwards the request untouched. Responses pass
/// through unobserved; a 401 is not retried.
#[derive(Debug, Clone)]
pub struct AuthInterceptor {
    session: SessionService,
}

impl AuthInterceptor {
    /// Create an interceptor reading from `session`.
    pub fn new(session: SessionService) -> Self {
        Self { session }
    }

    /// Shape `request` with the current credentials.
    pub fn apply(&self, mut request: OutgoingRequest) -> OutgoingRequest {
        let Some(identity) = self.session.current() else {
            trace!("No session, forwarding without credentials");
            return request;
        };

        let Some(token) = identity.bearer_token() else {
            trace!(username = %identity.username, "Untokened session, forwarding without credentials");
            return request;
        };

        match HeaderValue::from_str(&token.bearer()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                warn!(username = %identity.username, "Stored token is not a valid header value, forwarding without credentials");
            }
        }

        request
    }
}

#[async_trait]
impl Middleware for AuthInterceptor {
    async fn handle(&self, request: OutgoingRequest, next: Next<'_>) -> Result<IncomingResponse> {
        next.run(self.apply(request)).await
    }
}
