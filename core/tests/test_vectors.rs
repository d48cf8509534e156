//! Verify `build_request` against JSON test vectors stored in `test-vectors/`.
//!
//! Each case describes a descriptor and the wire request it must produce.
//! Bodies are compared as parsed JSON so field order does not matter.

use fetch_core::{FetchClient, FetchConfig, HttpMethod, HttpRequest, RequestDescriptor, Transport};
use serde_json::Value;

/// Never called: `build_request` does not touch the transport.
struct Unreachable;

impl Transport for Unreachable {
    fn execute(&self, _request: &HttpRequest) -> Result<fetch_core::HttpResponse, fetch_core::FetchError> {
        panic!("build_request must not perform I/O");
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|pair| {
                    let arr = pair.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

fn descriptor_from(case: &Value) -> RequestDescriptor {
    let method: HttpMethod = case["method"].as_str().unwrap().parse().unwrap();
    let mut d = RequestDescriptor::new(method, case["path"].as_str().unwrap());
    if let Some(base_url) = case["base_url"].as_str() {
        d = d.base_url(base_url);
    }
    for (key, value) in pairs(&case["url_params"]) {
        d = d.url_param(&key, value);
    }
    for (key, value) in pairs(&case["query"]) {
        d = d.query(&key, value);
    }
    for (name, value) in pairs(&case["headers"]) {
        d = d.header(&name, &value);
    }
    if let Some(token) = case["token"].as_str() {
        d = d.token(token);
    }
    if let Some(body) = case.get("body") {
        d = d.body(body);
    }
    d
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let client = FetchClient::with_transport(FetchConfig::new(vectors["base_url"].as_str().unwrap()), Unreachable);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_request"];

        let req = client.build_request(&descriptor_from(&case["descriptor"])).unwrap();

        let method: HttpMethod = serde_json::from_value(expected["method"].clone()).unwrap();
        assert_eq!(req.method, method, "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");

        let body = req
            .body
            .as_deref()
            .map(|b| serde_json::from_str::<Value>(b).unwrap())
            .unwrap_or(Value::Null);
        assert_eq!(body, expected["body"], "{name}: body");
    }
}
