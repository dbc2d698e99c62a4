use crate::{
    data::{Interaction, RequestData, ResponseData},
    error::{ConfigurationError, Error},
    interaction_matcher::InteractionMatcher,
    mock_transport::MockTransport,
    util, MockServerConfiguration,
};
use async_trait::async_trait;
use hyper::{
    body,
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server, StatusCode,
};
use serde_json::json;
use std::{
    collections::HashMap,
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::{sync::oneshot, task::JoinHandle};
use tracing::{debug, error, info, warn};

#[derive(Debug, Default)]
struct ServerState {
    matcher: InteractionMatcher,
    mismatches: Vec<String>,
    error: Option<Error>,
}

impl ServerState {
    /// Keeps the first internal error, later ones are only logged.
    fn record_error(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn handle_request(&mut self, request_data: &RequestData) -> Result<ResponseData, Error> {
        match self.matcher.match_request(request_data) {
            Some(interaction) => {
                debug!(
                    description = %interaction.description(),
                    method = %request_data.method,
                    uri = %request_data.uri,
                    "matched interaction"
                );
                Ok(interaction.response().to_response_data()?)
            }
            None => {
                let mismatch = InteractionMatcher::unmatched_description(request_data);
                warn!("{}", mismatch);

                let mut headers = HashMap::new();
                headers.insert("content-type".to_string(), "application/json".to_string());
                let body = json!({ "message": mismatch }).to_string();

                self.mismatches.push(mismatch);

                Ok(ResponseData {
                    status_code: 500,
                    headers,
                    body,
                })
            }
        }
    }
}

/// In-process mock provider backed by hyper.
///
/// The server runs as a task on the current tokio runtime, so `start` has to be
/// called from within one.
#[derive(Debug)]
pub struct MockServer {
    configuration: MockServerConfiguration,
    state: Arc<Mutex<ServerState>>,
    address: Option<SocketAddr>,
    shutdown: Option<oneshot::Sender<()>>,
    join_handle: Option<JoinHandle<Result<(), hyper::Error>>>,
}

impl MockServer {
    pub fn new(configuration: MockServerConfiguration) -> Self {
        Self {
            configuration,
            state: Arc::new(Mutex::new(ServerState::default())),
            address: None,
            shutdown: None,
            join_handle: None,
        }
    }

    /// The bound address, available once the server is started.
    pub fn address(&self) -> Result<SocketAddr, Error> {
        self.address
            .ok_or_else(|| ConfigurationError::NotStarted.into())
    }

    /// Base url to point the client under test at.
    pub fn url(&self) -> Result<String, Error> {
        Ok(format!("http://{}", self.address()?))
    }

    pub fn is_running(&self) -> bool {
        self.join_handle.is_some()
    }

    pub fn configuration(&self) -> &MockServerConfiguration {
        &self.configuration
    }
}

#[async_trait]
impl MockTransport for MockServer {
    async fn configure(&self, interactions: &[Interaction]) -> Result<(), Error> {
        for interaction in interactions {
            debug!(
                description = %interaction.description(),
                provider_state = ?interaction.provider_state(),
                "serving interaction"
            );
        }

        let mut state = self.state.lock()?;
        *state = ServerState {
            matcher: InteractionMatcher::new(interactions.to_vec()),
            ..ServerState::default()
        };

        Ok(())
    }

    async fn start(&mut self) -> Result<(), Error> {
        if self.is_running() {
            return Err(ConfigurationError::AlreadyStarted.into());
        }

        let state = self.state.clone();
        let server = Server::try_bind(&self.configuration.address())?.serve(make_service_fn(
            move |_| {
                let state = state.clone();
                async move {
                    Ok::<_, Infallible>(service_fn(move |request| {
                        handle_request(state.clone(), request)
                    }))
                }
            },
        ));

        let address = server.local_addr();
        let (sender, receiver) = oneshot::channel::<()>();
        let server = server.with_graceful_shutdown(async move {
            receiver.await.ok();
        });

        self.join_handle = Some(tokio::spawn(server));
        self.shutdown = Some(sender);
        self.address = Some(address);

        info!(%address, "mock server started");

        Ok(())
    }

    async fn stop(&mut self) -> Result<(), Error> {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }

        if let Some(join_handle) = self.join_handle.take() {
            join_handle.await.map_err(Error::transport)??;
            info!("mock server stopped");
        }

        self.address = None;

        Ok(())
    }

    async fn mismatches(&self) -> Result<Vec<String>, Error> {
        let mut state = self.state.lock()?;

        match state.error.take() {
            Some(error) => Err(error),
            None => Ok(state.mismatches.clone()),
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }
}

async fn handle_request(
    state: Arc<Mutex<ServerState>>,
    mut request: Request<Body>,
) -> Result<Response<Body>, Infallible> {
    match respond(&state, &mut request).await {
        Ok(response) => Ok(response),
        Err(e) => {
            error!("Mock server error: {}", e);
            if let Ok(mut state) = state.lock() {
                state.record_error(e);
            }

            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            Ok(response)
        }
    }
}

async fn respond(
    state: &Mutex<ServerState>,
    request: &mut Request<Body>,
) -> Result<Response<Body>, Error> {
    let request_data = read_request_data(request).await?;
    let response_data = state.lock()?.handle_request(&request_data)?;

    let status_code = response_data.status_code;
    let mut response = Response::new(Body::from(response_data.body));
    *response.status_mut() = StatusCode::from_u16(status_code)
        .map_err(|_| ConfigurationError::InvalidStatus(status_code))?;
    util::put_headers(response.headers_mut(), &response_data.headers)?;

    Ok(response)
}

async fn read_request_data(request: &mut Request<Body>) -> Result<RequestData, Error> {
    let method = request.method().to_string();
    let uri = request.uri().to_string();
    let headers = util::extract_headers(request.headers());

    let body = body::to_bytes(request.body_mut())
        .await
        .map_err(|_| Error::InvalidBody)?;

    Ok(RequestData {
        method,
        uri,
        headers,
        body: String::from_utf8_lossy(&body).into(),
    })
}
