//! Glue used by the `#[pact_test]` attribute: one mock server per test, stopped after
//! the test body even when it panics.

use crate::{mock_transport::MockTransport, MockServer, MockServerConfiguration, Pact};
use futures::FutureExt;
use std::{future::Future, panic::AssertUnwindSafe, thread};
use tokio::runtime::Runtime;

pub fn block_on<F: Future>(future: F) -> F::Output {
    match Runtime::new() {
        Ok(runtime) => runtime.block_on(future),
        Err(e) => panic!("Pact Error: {}", e),
    }
}

pub async fn start_session(consumer: &str, provider: &str) -> Pact {
    let mut server = MockServer::new(MockServerConfiguration::default());

    if let Err(e) = server.start().await {
        panic!("Pact Error: {}", e);
    }

    Pact::new(consumer, provider, server)
}

pub async fn run_guarded<F: Future<Output = ()>>(test_body: F) -> thread::Result<()> {
    AssertUnwindSafe(test_body).catch_unwind().await
}

pub async fn finish_session(pact: Pact, outcome: thread::Result<()>) {
    let mut server = pact.into_mock_server();
    let stopped = server.stop().await;

    if let Err(panic) = outcome {
        std::panic::resume_unwind(panic);
    }

    if let Err(e) = stopped {
        panic!("Pact Error: {}", e);
    }
}
