//! Blocking HTTP transport shared by the vendor clients.
//!
//! One request per call, no retries. Status interpretation is left to the
//! caller through [`ApiResponse`], since each vendor decides which non-2xx
//! shapes are benign.

use std::fmt;

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::domain::{AppError, HttpConfig};

/// Credentials attached to a single request.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    Bearer(String),
    Basic { user: String, password: String },
    None,
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Bearer(_) => f.write_str("Bearer([REDACTED])"),
            Auth::Basic { user, .. } => write!(f, "Basic({user}:[REDACTED])"),
            Auth::None => f.write_str("None"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Body<'a> {
    Empty,
    Json(&'a Value),
    Form(&'a [(&'a str, &'a str)]),
}

/// Status plus the decoded body (`Value::Null` when empty, `Value::String` when not JSON).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Map non-2xx statuses onto the error taxonomy: 404 not found, 401/403 unauthorized.
    pub fn expect_success(self, what: &str) -> Result<Value, AppError> {
        if self.is_success() {
            return Ok(self.body);
        }
        Err(self.into_error(what))
    }

    /// Existence probe: 2xx true, 404 false, anything else propagates.
    pub fn exists(self, what: &str) -> Result<bool, AppError> {
        match self.status {
            404 => Ok(false),
            _ if self.is_success() => Ok(true),
            _ => Err(self.into_error(what)),
        }
    }

    pub fn into_error(self, what: &str) -> AppError {
        match self.status {
            404 => AppError::NotFound { what: what.to_string() },
            401 | 403 => AppError::Unauthorized { what: what.to_string(), status: self.status },
            status => AppError::Http {
                what: what.to_string(),
                status,
                message: extract_error_message(&self.body),
            },
        }
    }
}

fn extract_error_message(body: &Value) -> String {
    let message = match body {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => other
            .get("error")
            .and_then(|error| error.get("message").or(Some(error)))
            .or_else(|| other.get("message"))
            .map(|value| match value {
                Value::String(text) => text.clone(),
                value => value.to_string(),
            })
            .or_else(|| Some(other.to_string())),
    };
    message.unwrap_or_else(|| "empty response body".to_string())
}

/// Shared reqwest client with vendor default headers.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient").finish_non_exhaustive()
    }
}

impl HttpClient {
    pub fn new(config: &HttpConfig, headers: &[(&'static str, &'static str)]) -> Result<Self, AppError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in headers {
            default_headers
                .insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("scm-setup/", env!("CARGO_PKG_VERSION")))
            .default_headers(default_headers)
            .build()
            .map_err(|e| AppError::Transport {
                what: "HTTP client".to_string(),
                details: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }

    pub fn get(&self, what: &str, url: Url, auth: &Auth) -> Result<ApiResponse, AppError> {
        self.send(what, Method::GET, url, auth, Body::Empty)
    }

    pub fn post(&self, what: &str, url: Url, auth: &Auth, body: &Value) -> Result<ApiResponse, AppError> {
        self.send(what, Method::POST, url, auth, Body::Json(body))
    }

    pub fn put(&self, what: &str, url: Url, auth: &Auth, body: &Value) -> Result<ApiResponse, AppError> {
        self.send(what, Method::PUT, url, auth, Body::Json(body))
    }

    pub fn patch(&self, what: &str, url: Url, auth: &Auth, body: &Value) -> Result<ApiResponse, AppError> {
        self.send(what, Method::PATCH, url, auth, Body::Json(body))
    }

    pub fn send(
        &self,
        what: &str,
        method: Method,
        url: Url,
        auth: &Auth,
        body: Body<'_>,
    ) -> Result<ApiResponse, AppError> {
        tracing::debug!(%method, %url, what, "Sending request");

        let mut request = authorize(self.client.request(method, url), auth);
        request = match body {
            Body::Empty => request,
            Body::Json(value) => request.json(value),
            Body::Form(pairs) => request.form(pairs),
        };

        let response = request
            .send()
            .map_err(|e| AppError::Transport { what: what.to_string(), details: e.to_string() })?;

        let status = response.status().as_u16();
        let text = response.text().unwrap_or_default();
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        tracing::debug!(status, what, "Received response");
        Ok(ApiResponse { status, body })
    }
}

fn authorize(request: RequestBuilder, auth: &Auth) -> RequestBuilder {
    match auth {
        Auth::Bearer(token) => request.bearer_auth(token),
        Auth::Basic { user, password } => request.basic_auth(user, Some(password)),
        Auth::None => request,
    }
}

/// Read `key` from a response body as a string; numeric ids are rendered.
pub fn field_str(body: &Value, key: &str, what: &str) -> Result<String, AppError> {
    match body.get(key) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        _ => Err(AppError::parse_error(what, format!("missing '{key}' in response"))),
    }
}

/// Append path segments to a base URL. Each segment is percent-encoded, so a
/// segment containing `/` stays a single segment.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, AppError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AppError::InvalidConfig(format!("'{base}' cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// [`endpoint`] plus query parameters.
pub fn endpoint_with_query(
    base: &Url,
    segments: &[&str],
    query: &[(&str, &str)],
) -> Result<Url, AppError> {
    let mut url = endpoint(base, segments)?;
    url.query_pairs_mut().extend_pairs(query);
    Ok(url)
}
