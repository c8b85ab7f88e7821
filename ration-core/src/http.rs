//! Generic JSON request helper.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use std::fmt;

use crate::error::RequestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_reqwest().as_str())
    }
}

/// Method, extra headers and an optional JSON body.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, RequestError> {
        self.body = Some(serde_json::to_value(body).map_err(RequestError::Body)?);
        Ok(self)
    }

    /// Default headers with the caller's headers applied over them.
    fn header_map(&self) -> Result<HeaderMap, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| RequestError::Header(name.clone()))?;
            let value =
                HeaderValue::from_str(value).map_err(|_| RequestError::Header(name.to_string()))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

/// A parsed response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => match serde_json::to_string_pretty(value) {
                Ok(pretty) => f.write_str(&pretty),
                Err(_) => write!(f, "{}", value),
            },
            ResponseBody::Text(text) => f.write_str(text),
        }
    }
}

/// Send a request and parse the body as JSON when the response says it is JSON.
///
/// Any status outside 2xx is an error.
pub async fn request(url: &str, options: RequestOptions) -> Result<ResponseBody, RequestError> {
    let result = send(url, &options).await;
    if let Err(e) = &result {
        tracing::error!("Request {} {} failed: {}", options.method, url, e);
    }
    result
}

async fn send(url: &str, options: &RequestOptions) -> Result<ResponseBody, RequestError> {
    let client = reqwest::Client::new();
    let mut builder = client
        .request(options.method.to_reqwest(), url)
        .headers(options.header_map()?);

    if let Some(body) = &options.body {
        builder = builder.json(body);
    }

    let response = builder.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(RequestError::Status(status.as_u16()));
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);

    if is_json {
        Ok(ResponseBody::Json(response.json().await?))
    } else {
        Ok(ResponseBody::Text(response.text().await?))
    }
}
