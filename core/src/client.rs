//! Request orchestrator: descriptor in, one round trip, normalized result out.
//!
//! # Design
//! `FetchClient` holds only its configuration and a transport and carries no
//! mutable state between calls, so a single client can be shared across
//! threads. `build_request` and `parse_response` are pure; `fetch` wires them
//! around exactly one `Transport::execute` call and owns the single catch
//! boundary.

use serde::de::DeserializeOwned;

use crate::config::FetchConfig;
use crate::descriptor::RequestDescriptor;
use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::result::FetchResult;
use crate::transport::{Transport, UreqTransport};

pub struct FetchClient<T = UreqTransport> {
    config: FetchConfig,
    transport: T,
}

impl FetchClient<UreqTransport> {
    pub fn new(config: FetchConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    /// Client configured from `BACKEND_URL` (and `.env`).
    pub fn from_env() -> Self {
        Self::new(FetchConfig::from_env())
    }
}

impl<T: Transport> FetchClient<T> {
    pub fn with_transport(config: FetchConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve base URL, path, query, headers and body into a wire request.
    pub fn build_request<D>(&self, descriptor: &RequestDescriptor<D>) -> Result<HttpRequest, FetchError> {
        let base_url = self.config.resolve_base_url(descriptor.base_url.as_deref())?;
        Ok(HttpRequest {
            method: descriptor.method,
            url: join_url(base_url, descriptor),
            headers: descriptor.merged_headers(),
            body: descriptor.encoded_body()?,
        })
    }

    /// Decode the response body as JSON, passing the status through as is.
    pub fn parse_response<D: DeserializeOwned>(&self, response: HttpResponse) -> Result<(u16, D), FetchError> {
        let data = serde_json::from_str(&response.body).map_err(FetchError::Parse)?;
        Ok((response.status, data))
    }

    /// Issue `descriptor` once and normalize the outcome.
    ///
    /// Returns `Err` when no base URL can be resolved (before any network
    /// call) or, with `throw_on_error`, with the caught error unchanged.
    /// Every other failure becomes `FetchResult::Failure`.
    pub fn fetch<D>(&self, descriptor: &RequestDescriptor<D>) -> Result<FetchResult<D>, FetchError>
    where
        D: DeserializeOwned + Clone,
    {
        self.config.resolve_base_url(descriptor.base_url.as_deref())?;

        match self.round_trip(descriptor) {
            Ok((status, data)) => Ok(FetchResult::Success { status, data }),
            Err(error) => {
                if descriptor.throw_on_error {
                    return Err(error);
                }
                if let Some(observer) = &descriptor.on_error {
                    observer(&error);
                }
                tracing::warn!(
                    method = %descriptor.method,
                    path = %descriptor.path,
                    error = %error,
                    "request failed"
                );
                Ok(FetchResult::Failure {
                    data: descriptor.default_data.clone(),
                    error,
                })
            }
        }
    }

    fn round_trip<D: DeserializeOwned>(&self, descriptor: &RequestDescriptor<D>) -> Result<(u16, D), FetchError> {
        let request = self.build_request(descriptor)?;
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(&request)?;
        tracing::debug!(status = response.status, url = %request.url, "received response");
        self.parse_response(response)
    }
}

fn join_url<D>(base_url: &str, descriptor: &RequestDescriptor<D>) -> String {
    let path = descriptor.resolved_path();
    let mut url = if path.starts_with('/') {
        format!("{}{path}", base_url.trim_end_matches('/'))
    } else {
        format!("{base_url}{path}")
    };
    let query = descriptor.query_string();
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}
