//! # REST client and transport seam
//!
//! [`ApiClient`] is what every service method is implemented on. It resolves the
//! bearer credential from [`store::CredentialStore`] on **every** request (the
//! stored token can change between calls), hands a plain [`Request`] to its
//! [`Transport`], and turns the [`Response`] into a typed value or an
//! [`ApiError`] carrying the operation's fallback message.
//!
//! Two transports exist: [`HttpTransport`] (reqwest, native and WASM) and
//! [`crate::mock::MockTransport`] for tests.

use std::future::Future;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::config::ApiConfig;
use store::CredentialStore;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// One field of a multipart form.
#[derive(Clone, Debug, PartialEq)]
pub enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<Part>),
}

impl Body {
    pub fn json<B: Serialize>(payload: &B) -> Result<Self, ApiError> {
        serde_json::to_value(payload)
            .map(Body::Json)
            .map_err(|e| ApiError::Invalid(format!("Invalid request payload: {e}")))
    }
}

/// Bytes escaped inside one path segment: the URL path-segment set plus `%` and `\`.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a caller-supplied value for use as a single path segment.
///
/// Empty and dot-only values are refused: URL normalisation would resolve them
/// (escaped or not) against the parent path.
pub fn segment(value: &str, fallback: &str) -> Result<String, ApiError> {
    if value.is_empty() || value.chars().all(|c| c == '.') {
        tracing::warn!(value, "refusing unusable path segment");
        return Err(ApiError::Invalid(fallback.to_string()));
    }
    Ok(utf8_percent_encode(value, SEGMENT).to_string())
}

/// A request as handed to a [`Transport`]. `path` is relative to the API base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Body,
    pub bearer: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body. An empty body decodes as JSON `null`.
    pub fn json<R: DeserializeOwned>(&self) -> Result<R, serde_json::Error> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_slice(b"null")
        } else {
            serde_json::from_slice(&self.body)
        }
    }
}

/// Executes one HTTP exchange.
///
/// Implementations return [`ApiError::Network`] only when no response was
/// received; any HTTP status, including errors, is a successful `Response`.
pub trait Transport {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, ApiError>>;
}

/// reqwest-backed transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Self {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(config.timeout_secs));
        let client = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to a default HTTP client");
            reqwest::Client::new()
        });
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn multipart_form(parts: Vec<Part>) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            Part::Text { name, value } => form.text(name, value),
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let file = reqwest::multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| ApiError::Network(e.to_string()))?;
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?
            .to_vec();
        Ok(Response { status, body })
    }
}

/// Typed REST client over a [`Transport`].
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
    credentials: CredentialStore,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, credentials: CredentialStore) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Send a request and return the raw response if its status is 2xx.
    ///
    /// A 401 clears the persisted credential and cached user before the error
    /// is returned, so the next navigation sees an anonymous session.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: String,
        body: Body,
        fallback: &str,
    ) -> Result<Response, ApiError> {
        let request = Request {
            method,
            path,
            body,
            bearer: self.credentials.credential().map(|c| c.as_str().to_string()),
        };
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            authenticated = request.bearer.is_some(),
            "api request"
        );
        let path = request.path.clone();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(ApiError::Network(detail)) => {
                tracing::warn!(%path, %detail, "transport failure");
                return Err(ApiError::Network(fallback.to_string()));
            }
            Err(other) => return Err(other),
        };

        if response.is_success() {
            return Ok(response);
        }

        let err = ApiError::from_response(response.status, &response.body, fallback);
        if err.is_unauthorized() {
            tracing::info!(%path, "credential rejected by server, clearing session");
            self.credentials.clear();
        } else {
            tracing::warn!(%path, status = response.status, message = %err, "api error");
        }
        Err(err)
    }

    /// Send a request whose response body is not needed.
    pub(crate) async fn submit(
        &self,
        method: Method,
        path: String,
        body: Body,
        fallback: &str,
    ) -> Result<(), ApiError> {
        self.execute(method, path, body, fallback).await.map(|_| ())
    }

    /// Send a request and decode the 2xx body into `R`.
    pub(crate) async fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        path: String,
        body: Body,
        fallback: &str,
    ) -> Result<R, ApiError> {
        let response = self.execute(method, path, body, fallback).await?;
        response.json().map_err(|e| {
            tracing::warn!(error = %e, "unexpected response shape");
            ApiError::Decode(fallback.to_string())
        })
    }
}
