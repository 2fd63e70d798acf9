use crate::errors::RelayerApiException;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(30);
const RPC_TIMEOUT: Duration = Duration::from_secs(10);

pub const GET: &str = "GET";
pub const POST: &str = "POST";

fn client(timeout: Duration) -> Result<Client, RelayerApiException> {
    Client::builder().timeout(timeout).build().map_err(|e| {
        RelayerApiException::from_request_error(format!("Failed to create client: {}", e))
    })
}

pub fn request(
    endpoint: &str,
    method: &str,
    headers: Option<HeaderMap>,
    body: Option<String>,
) -> Result<Value, RelayerApiException> {
    let client = client(TIMEOUT)?;

    let mut req = match method {
        GET => client.get(endpoint),
        POST => client.post(endpoint),
        _ => {
            return Err(RelayerApiException::from_request_error(format!(
                "Unsupported method: {}",
                method
            )));
        }
    };

    if let Some(h) = headers {
        req = req.headers(h);
    }

    // Sent byte-for-byte: the builder signature covers this exact body.
    if let Some(body) = body {
        req = req
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body);
    }

    log::debug!("{} {}", method, endpoint);
    let resp = req
        .send()
        .map_err(|e| RelayerApiException::from_request_error(format!("Request failed: {}", e)))?;

    let status = resp.status();
    if !status.is_success() {
        let error_msg = resp.text().unwrap_or_else(|_| "Unknown error".to_string());
        return Err(RelayerApiException::new(Some(status.as_u16()), error_msg));
    }

    resp.json::<Value>().map_err(|e| {
        RelayerApiException::from_request_error(format!("Failed to parse JSON: {}", e))
    })
}

pub fn post(
    endpoint: &str,
    headers: Option<HeaderMap>,
    body: Option<String>,
) -> Result<Value, RelayerApiException> {
    request(endpoint, POST, headers, body)
}

pub fn get(endpoint: &str, headers: Option<HeaderMap>) -> Result<Value, RelayerApiException> {
    request(endpoint, GET, headers, None)
}

/// Single JSON-RPC 2.0 call; returns the `result` member.
pub fn rpc_request(rpc_url: &str, method: &str, params: Value) -> Result<Value, RelayerApiException> {
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });

    let resp = client(RPC_TIMEOUT)?
        .post(rpc_url)
        .json(&body)
        .send()
        .map_err(|e| RelayerApiException::from_request_error(format!("RPC request failed: {}", e)))?;

    let status = resp.status();
    if !status.is_success() {
        let error_msg = resp.text().unwrap_or_else(|_| "Unknown error".to_string());
        return Err(RelayerApiException::new(Some(status.as_u16()), error_msg));
    }

    let mut payload = resp.json::<Value>().map_err(|e| {
        RelayerApiException::from_request_error(format!("Failed to parse RPC response: {}", e))
    })?;

    if let Some(error) = payload.get("error") {
        return Err(RelayerApiException::from_request_error(format!(
            "{} returned error: {}",
            method, error
        )));
    }

    match payload.get_mut("result").map(Value::take) {
        Some(result) if !result.is_null() => Ok(result),
        _ => Err(RelayerApiException::from_request_error(format!(
            "{} returned no result",
            method
        ))),
    }
}
