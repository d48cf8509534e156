//! Vendor-agnostic capabilities layered over the orchestrator.
//!
//! Callers depend on `TextGenerator` / `JobSubmitter`; which backend serves
//! them is decided where the `Remote*` value is constructed.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::client::FetchClient;
use crate::descriptor::RequestDescriptor;
use crate::error::FetchError;
use crate::transport::Transport;

pub trait TextGenerator {
    fn generate_text(&self, prompt: &str) -> Result<String, FetchError>;
}

pub trait JobSubmitter {
    /// Submit `payload` and return the backend's job id.
    fn submit_job(&self, payload: &Value) -> Result<String, FetchError>;
}

/// Text generation over an HTTP endpoint taking `{"prompt"}` and answering
/// `{"text"}`.
pub struct RemoteTextGenerator<T: Transport> {
    client: Arc<FetchClient<T>>,
    path: String,
    token: Option<String>,
}

impl<T: Transport> RemoteTextGenerator<T> {
    pub fn new(client: Arc<FetchClient<T>>, path: &str) -> Self {
        Self {
            client,
            path: path.to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

impl<T: Transport> TextGenerator for RemoteTextGenerator<T> {
    fn generate_text(&self, prompt: &str) -> Result<String, FetchError> {
        let descriptor = authorized(
            RequestDescriptor::post(&self.path).body(&json!({ "prompt": prompt })),
            self.token.as_deref(),
        );
        let reply = call(&self.client, descriptor)?;
        reply
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| FetchError::MissingField("text".to_string()))
    }
}

/// Job submission over an HTTP endpoint answering with a job id field.
pub struct RemoteJobSubmitter<T: Transport> {
    client: Arc<FetchClient<T>>,
    path: String,
    id_field: String,
    token: Option<String>,
}

impl<T: Transport> RemoteJobSubmitter<T> {
    pub fn new(client: Arc<FetchClient<T>>, path: &str) -> Self {
        Self {
            client,
            path: path.to_string(),
            id_field: "id".to_string(),
            token: None,
        }
    }

    /// Read the job id from `field` instead of `id`.
    pub fn id_field(mut self, field: &str) -> Self {
        self.id_field = field.to_string();
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

impl<T: Transport> JobSubmitter for RemoteJobSubmitter<T> {
    fn submit_job(&self, payload: &Value) -> Result<String, FetchError> {
        let descriptor = authorized(RequestDescriptor::post(&self.path).body(payload), self.token.as_deref());
        let reply = call(&self.client, descriptor)?;
        match reply.get(&self.id_field) {
            Some(Value::String(id)) => Ok(id.clone()),
            Some(Value::Number(id)) => Ok(id.to_string()),
            _ => Err(FetchError::MissingField(self.id_field.clone())),
        }
    }
}

fn authorized(descriptor: RequestDescriptor, token: Option<&str>) -> RequestDescriptor {
    match token {
        Some(token) => descriptor.token(token),
        None => descriptor,
    }
}

/// Issue in re-raise mode and treat any non-2xx status as an error.
fn call<T: Transport>(client: &FetchClient<T>, descriptor: RequestDescriptor) -> Result<Value, FetchError> {
    let descriptor = descriptor.throw_on_error(true);
    let result = client.fetch(&descriptor)?;
    let status = result.status();
    if !(200..300).contains(&status) {
        return Err(FetchError::UnexpectedStatus { status });
    }
    Ok(result.into_data().unwrap_or(Value::Null))
}
