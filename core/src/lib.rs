//! Single-attempt HTTP request orchestration.
//!
//! # Overview
//! A `RequestDescriptor` declares one outbound call: method, path template
//! with `:key` / `[key]` placeholders, query, JSON body, headers, token,
//! fallback data, error observer and re-raise flag. `FetchClient::fetch`
//! turns it into exactly one round trip and a `FetchResult`, which is either
//! the decoded body with its raw status or the caught error with the fallback
//! data and status 0.
//!
//! # Design
//! - `FetchClient` is stateless apart from its `FetchConfig` and transport.
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`);
//!   the `Transport` trait is the only place that touches the network.
//! - `TextGenerator` and `JobSubmitter` keep callers independent of the
//!   backing vendor; `Session` replaces process-wide state with a value the
//!   caller owns.

pub mod capability;
pub mod client;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod http;
pub mod result;
pub mod session;
pub mod transport;

pub use capability::{JobSubmitter, RemoteJobSubmitter, RemoteTextGenerator, TextGenerator};
pub use client::FetchClient;
pub use config::FetchConfig;
pub use descriptor::RequestDescriptor;
pub use error::FetchError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use result::FetchResult;
pub use session::Session;
pub use transport::{Transport, UreqTransport};
