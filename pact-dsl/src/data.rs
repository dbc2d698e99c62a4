use serde_json::Value;
use std::collections::HashMap;

/// One declared request/response exchange. Immutable once committed by the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub(crate) provider_state: Option<String>,
    pub(crate) description: String,
    pub(crate) request: RequestSpec,
    pub(crate) response: ResponseSpec,
}

impl Interaction {
    pub fn provider_state(&self) -> Option<&str> {
        self.provider_state.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn request(&self) -> &RequestSpec {
        &self.request
    }

    pub fn response(&self) -> &ResponseSpec {
        &self.response
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// Always upper case.
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSpec {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

impl ResponseSpec {
    pub fn to_response_data(&self) -> Result<ResponseData, serde_json::Error> {
        let body = match &self.body {
            Some(value) => serde_json::to_string(value)?,
            None => String::new(),
        };

        Ok(ResponseData {
            status_code: self.status_code,
            headers: self.headers.clone(),
            body,
        })
    }
}

/// A request as observed by the mock server.
#[derive(Debug, Clone)]
pub struct RequestData {
    pub uri: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RequestData {
    /// Path without the query string.
    pub fn path(&self) -> &str {
        self.uri.split('?').next().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ResponseData {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}
