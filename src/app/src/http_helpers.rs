//! HTTP helper functions for Crux Core
//!
//! Response handling shared by the command dispatcher and the status poller.

use crux_http::Response;

/// Base URL for endpoints served by the same origin as the UI.
///
/// NOTE: `crux_http` requires absolute URLs and rejects relative paths
/// (`RelativeUrlWithoutBase` error). The web shell strips this prefix before
/// calling `fetch()`, so requests stay relative to the page origin.
pub const BASE_URL: &str = "https://relative";

/// Path on the controller that accepts motor commands
pub const MOTOR_PATH: &str = "/motor";

/// Coordinator endpoint polled for the status snapshot
pub const COORDINATES_PATH: &str = "/coordinates";

/// Constructs the full address from a given endpoint.
///
/// # Example
/// ```
/// use smart_fan_core::http_helpers::build_url;
/// let url = build_url("/coordinates");
/// assert_eq!(url, "https://relative/coordinates");
/// ```
pub fn build_url(endpoint: &str) -> String {
    format!("{BASE_URL}{endpoint}")
}

/// Constructs the controller URL for an endpoint.
///
/// The address is used verbatim. It is only rejected if the resulting
/// string is not a URL at all, since `crux_http` cannot send such a request.
///
/// # Example
/// ```
/// use smart_fan_core::http_helpers::controller_url;
/// let url = controller_url("192.168.1.100", "/motor").unwrap();
/// assert_eq!(url, "http://192.168.1.100/motor");
/// ```
pub fn controller_url(address: &str, endpoint: &str) -> Result<String, String> {
    let url = format!("http://{address}{endpoint}");

    match url::Url::parse(&url) {
        Ok(_) => Ok(url),
        Err(e) => Err(format!("invalid controller address '{address}': {e}")),
    }
}

/// Validates HTTP response.
///
/// Returns `true` if the response status is 2xx.
pub fn is_response_success(response: &Response<Vec<u8>>) -> bool {
    response.status().is_success()
}

/// Parse JSON from response body.
///
/// Returns error if response is not successful or JSON parsing fails.
pub fn parse_json_response<T: serde::de::DeserializeOwned>(
    action: &str,
    response: &mut Response<Vec<u8>>,
) -> Result<T, String> {
    if !is_response_success(response) {
        return Err(format!("{action} failed: HTTP {}", response.status()));
    }

    match response.take_body() {
        Some(body) => {
            serde_json::from_slice(&body).map_err(|e| format!("{action}: JSON parse error: {e}"))
        }
        None => Err(format!("{action}: Empty response body")),
    }
}

/// Process the result of a motor command.
///
/// The controller has no response contract: any HTTP response counts as
/// delivered, only transport errors fail. `crux_http` reports 4xx/5xx as
/// `HttpError::Http`, those are logged and accepted.
pub fn process_dispatch_response(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<(), String> {
    match result {
        Ok(_) => Ok(()),
        Err(crux_http::HttpError::Http { code, .. }) => {
            log::warn!("{action}: controller answered HTTP {code}");
            Ok(())
        }
        Err(e) => Err(format!("{action} failed: {e}")),
    }
}

/// Process HTTP response result and parse JSON
pub fn process_json_response<T: serde::de::DeserializeOwned>(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<T, String> {
    match result {
        Ok(mut response) => parse_json_response(action, &mut response),
        Err(e) => Err(e.to_string()),
    }
}
