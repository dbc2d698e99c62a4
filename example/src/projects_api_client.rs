use crate::{data::project::Project, error::Error};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT},
    Method, RequestBuilder, StatusCode,
};

type ReqwestClient = reqwest::Client;

const DEFAULT_DOMAIN_NAME: &str = "http://localhost:9000";

/// Builder used to build a ProjectsApiClient instance
#[derive(Debug, Clone, Default)]
pub struct ProjectsApiClientBuilder {
    domain_name: Option<String>,
    http_client: Option<ReqwestClient>,
    default_headers: HeaderMap,
}

impl ProjectsApiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base url of the Projects API, `http://localhost:9000` if not set.
    pub fn with_domain_name<T: Into<String>>(mut self, domain_name: T) -> Self {
        self.domain_name = Some(domain_name.into());
        self
    }

    pub fn with_http_client(mut self, client: ReqwestClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Send the header with every request, e.g. an API key.
    ///
    /// Setting the same header twice keeps the last value.
    pub fn with_default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn build(self) -> ProjectsApiClient {
        ProjectsApiClient {
            http: self.http_client.unwrap_or_default(),
            domain_name: self
                .domain_name
                .unwrap_or_else(|| String::from(DEFAULT_DOMAIN_NAME)),
            default_headers: self.default_headers,
        }
    }
}

/// Client of the Projects API.
#[derive(Default, Debug, Clone)]
pub struct ProjectsApiClient {
    http: ReqwestClient,
    domain_name: String,
    default_headers: HeaderMap,
}

impl ProjectsApiClient {
    pub fn new() -> Self {
        ProjectsApiClientBuilder::new().build()
    }

    /// Gets every project.
    pub async fn get_projects(&self) -> Result<Vec<Project>, Error> {
        let response = self
            .request(Method::GET, "/projects")
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let text = Self::check_status(response)?.text().await?;

        Ok(serde_json::from_str(&text)?)
    }

    /// Gets a single project.
    ///
    /// # Returns
    /// `None` if the provider doesn't know the project.
    pub async fn get_project(&self, id: u32) -> Result<Option<Project>, Error> {
        let response = self
            .request(Method::GET, &format!("/projects/{}", id))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let text = Self::check_status(response)?.text().await?;

        Ok(Some(serde_json::from_str(&text)?))
    }

    pub async fn delete_project(&self, id: u32) -> Result<(), Error> {
        let response = self
            .request(Method::DELETE, &format!("/projects/{}", id))
            .send()
            .await?;

        Self::check_status(response)?;

        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, &format!("{}{}", self.domain_name, path))
            .headers(self.default_headers.clone())
    }

    fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Error::UnexpectedStatus(response.status().as_u16()))
        }
    }
}
