pub mod data;
pub mod error;
mod projects_api_client;

pub use projects_api_client::{ProjectsApiClient, ProjectsApiClientBuilder};
