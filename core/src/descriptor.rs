//! Declarative description of one outbound call.
//!
//! # Design
//! A `RequestDescriptor` is built once with chained setters and then only
//! borrowed by `FetchClient::fetch`, so the same descriptor can be issued
//! any number of times. Path and query mappings keep insertion order.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::FetchError;
use crate::http::HttpMethod;

/// Observer invoked with a caught error before the failure result is built.
pub type ErrorObserver = Arc<dyn Fn(&FetchError) + Send + Sync>;

/// One outbound HTTP call. `D` is the type the response body decodes into.
#[derive(Clone)]
pub struct RequestDescriptor<D = Value> {
    pub(crate) method: HttpMethod,
    pub(crate) path: String,
    pub(crate) base_url: Option<String>,
    pub(crate) url_params: Vec<(String, String)>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Result<Value, String>>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) token: Option<String>,
    pub(crate) default_data: Option<D>,
    pub(crate) on_error: Option<ErrorObserver>,
    pub(crate) throw_on_error: bool,
}

impl<D> RequestDescriptor<D> {
    pub fn new(method: HttpMethod, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            base_url: None,
            url_params: Vec::new(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            token: None,
            default_data: None,
            on_error: None,
            throw_on_error: false,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: &str) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// Substitute `value` for `:key` and `[key]` in the path template.
    pub fn url_param(mut self, key: &str, value: impl ToString) -> Self {
        self.url_params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Capture `body` as JSON. A serialization failure is kept and reported
    /// when the descriptor is issued.
    pub fn body<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_value(body).map_err(|e| e.to_string()));
        self
    }

    /// Override or add a header. Later calls win over earlier ones and over
    /// the defaults.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Value returned as `data` when the call fails.
    pub fn default_data(mut self, data: D) -> Self {
        self.default_data = Some(data);
        self
    }

    pub fn on_error<F>(mut self, observer: F) -> Self
    where
        F: Fn(&FetchError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(observer));
        self
    }

    /// Return caught errors as `Err` instead of a failure result.
    pub fn throw_on_error(mut self, throw: bool) -> Self {
        self.throw_on_error = throw;
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn has_base_url(&self) -> bool {
        self.base_url.is_some()
    }

    /// Path template with every mapped placeholder substituted.
    ///
    /// Placeholders without a mapping are left as they are. Empty keys are
    /// skipped, since `:` alone would match every colon in the path.
    pub fn resolved_path(&self) -> String {
        let mut path = self.path.clone();
        for (key, value) in self.url_params.iter().filter(|(key, _)| !key.is_empty()) {
            path = path
                .replace(&format!(":{key}"), value)
                .replace(&format!("[{key}]"), value);
        }
        path
    }

    /// Form-encoded query string, empty when there are no entries.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }

    /// JSON text for the wire, or `None` when the method drops the body.
    pub(crate) fn encoded_body(&self) -> Result<Option<String>, FetchError> {
        if !self.method.allows_body() {
            return Ok(None);
        }
        // An unset body is sent as `{}`.
        let value = match &self.body {
            Some(Ok(value)) => value.clone(),
            Some(Err(msg)) => return Err(FetchError::Serialization(msg.clone())),
            None => Value::Object(Default::default()),
        };
        serde_json::to_string(&value)
            .map(Some)
            .map_err(|e| FetchError::Serialization(e.to_string()))
    }

    /// Default headers followed by the caller's overrides, with overrides
    /// replacing defaults of the same name (case-insensitive).
    pub(crate) fn merged_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("content-type".to_string(), "application/json".to_string()),
            ("token".to_string(), self.token.clone().unwrap_or_default()),
        ];
        for (name, value) in &self.headers {
            match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                Some(slot) => *slot = (name.clone(), value.clone()),
                None => headers.push((name.clone(), value.clone())),
            }
        }
        headers
    }
}

impl<D> fmt::Debug for RequestDescriptor<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("base_url", &self.base_url)
            .field("url_params", &self.url_params)
            .field("query", &self.query)
            .field("has_body", &self.body.is_some())
            .field("headers", &self.headers)
            .field("has_token", &self.token.is_some())
            .field("has_default_data", &self.default_data.is_some())
            .field("has_on_error", &self.on_error.is_some())
            .field("throw_on_error", &self.throw_on_error)
            .finish()
    }
}
