use crate::{
    data::{Interaction, RequestSpec, ResponseSpec},
    error::{ConfigurationError, Error},
    interaction_registry::InteractionRegistry,
};
use hyper::{
    header::{HeaderName, HeaderValue},
    StatusCode,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

lazy_static! {
    static ref METHOD_REGEX: Regex = Regex::new(r"^[A-Za-z]+$").unwrap();
    static ref PATH_REGEX: Regex = Regex::new(r"^/\S*$").unwrap();
}

#[derive(Debug)]
struct PendingRequest {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: Option<Value>,
}

/// Fluent builder for one interaction.
///
/// Fields accumulate on the builder itself; nothing reaches the registry until
/// [`InteractionBuilder::will_respond_with`] commits a finished [`Interaction`].
#[derive(Debug)]
pub struct InteractionBuilder<'a> {
    registry: &'a mut InteractionRegistry,
    provider_state: Option<String>,
    description: Option<String>,
    request: Option<PendingRequest>,
}

impl<'a> InteractionBuilder<'a> {
    pub(crate) fn new(registry: &'a mut InteractionRegistry) -> Self {
        Self {
            registry,
            provider_state: None,
            description: None,
            request: None,
        }
    }

    /// Set the provider state the interaction assumes.
    pub fn given<S: Into<String>>(mut self, provider_state: S) -> Self {
        self.provider_state = Some(provider_state.into());
        self
    }

    /// Set the description of the interaction. Required.
    pub fn upon_receiving<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Describe the expected request.
    ///
    /// # Arguments
    /// `method` - HTTP method, case-insensitive.
    /// `path` - request path, it should start with `/`.
    /// `body` - expected JSON body, `None` if any body is accepted.
    /// `headers` - headers the request should carry.
    pub fn with_request<M: AsRef<str>, P: Into<String>>(
        mut self,
        method: M,
        path: P,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Self {
        self.request = Some(PendingRequest {
            method: method.as_ref().to_string(),
            path: path.into(),
            headers: to_header_map(headers),
            body,
        });
        self
    }

    /// Describe the response and commit the interaction to the session.
    pub fn will_respond_with(
        self,
        status_code: u16,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<(), Error> {
        let request = self.request.ok_or(ConfigurationError::MissingRequest)?;
        let description = self
            .description
            .ok_or(ConfigurationError::MissingDescription)?;

        if !METHOD_REGEX.is_match(&request.method) {
            return Err(ConfigurationError::InvalidMethod(request.method).into());
        }

        if !PATH_REGEX.is_match(&request.path) {
            return Err(ConfigurationError::InvalidPath(request.path).into());
        }

        if StatusCode::from_u16(status_code).is_err() {
            return Err(ConfigurationError::InvalidStatus(status_code).into());
        }

        check_headers(request.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        check_headers(headers.iter().copied())?;

        self.registry.register(Interaction {
            provider_state: self.provider_state,
            description,
            request: RequestSpec {
                method: request.method.to_uppercase(),
                path: request.path,
                headers: request.headers,
                body: request.body,
            },
            response: ResponseSpec {
                status_code,
                headers: to_header_map(headers),
                body,
            },
        });

        Ok(())
    }
}

// The mock server has to be able to put these on the wire.
fn check_headers<'h, I>(headers: I) -> Result<(), ConfigurationError>
where
    I: Iterator<Item = (&'h str, &'h str)>,
{
    for (key, value) in headers {
        if HeaderName::from_bytes(key.as_bytes()).is_err() || HeaderValue::from_str(value).is_err()
        {
            return Err(ConfigurationError::InvalidHeader(format!("{}: {}", key, value)));
        }
    }

    Ok(())
}

fn to_header_map(headers: &[(&str, &str)]) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
