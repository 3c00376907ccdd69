//! JSON API client routed through the request pipeline.

use reqwest::header::{ACCEPT, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use tollgate_core::error::InvalidInputError;
use tollgate_core::{ApiUrl, IncomingResponse, OutgoingRequest, Pipeline, Result};

/// HTTP client for the backend API.
///
/// Every call goes through the [`Pipeline`], so session credentials are
/// attached the same way as for any other outbound request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: ApiUrl,
    pipeline: Pipeline,
}

impl ApiClient {
    /// Create a client for `base` that sends through `pipeline`.
    pub fn new(base: ApiUrl, pipeline: Pipeline) -> Self {
        Self { base, pipeline }
    }

    /// Returns the API base URL.
    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Returns the pipeline requests go through.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Absolute URL of `resource` below the base.
    pub fn url(&self, resource: &str) -> Result<Url> {
        let endpoint = self.base.endpoint(resource);
        Url::parse(&endpoint).map_err(|e| {
            InvalidInputError::ApiUrl {
                value: endpoint.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Send a raw request through the pipeline.
    pub async fn send(&self, request: OutgoingRequest) -> Result<IncomingResponse> {
        self.pipeline.send(request).await
    }

    /// GET `resource` and decode the JSON body.
    ///
    /// Non-2xx responses become [`ProtocolError`](tollgate_core::error::ProtocolError).
    #[instrument(skip(self), fields(api = %self.base))]
    pub async fn get_json<R: DeserializeOwned>(&self, resource: &str) -> Result<R> {
        debug!(resource, "API query");
        let request = OutgoingRequest::get(self.url(resource)?)
            .with_header(ACCEPT, HeaderValue::from_static("application/json"));

        self.send(request).await?.error_for_status()?.json()
    }

    /// POST `body` as JSON to `resource` and decode the JSON response.
    #[instrument(skip(self, body), fields(api = %self.base))]
    pub async fn post_json<B, R>(&self, resource: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(resource, "API procedure");
        let request = OutgoingRequest::post(self.url(resource)?)
            .with_header(ACCEPT, HeaderValue::from_static("application/json"))
            .with_json(body)?;

        self.send(request).await?.error_for_status()?.json()
    }
}
