use crate::{
    error::Error, exchange::ExchangeOutcome, interaction_builder::InteractionBuilder,
    interaction_registry::InteractionRegistry, mock_transport::MockTransport,
    verification::VerificationEngine, MockServer,
};
use std::future::Future;

/// A consumer/provider contract session.
///
/// Declare interactions with [`Pact::interaction`], then check the consumer's calls with
/// [`Pact::verify`]. Every `verify` consumes the interactions declared before it.
#[derive(Debug)]
pub struct Pact<T: MockTransport = MockServer> {
    consumer: String,
    provider: String,
    registry: InteractionRegistry,
    transport: T,
}

impl<T: MockTransport> Pact<T> {
    pub fn new<C: Into<String>, P: Into<String>>(consumer: C, provider: P, transport: T) -> Self {
        Self {
            consumer: consumer.into(),
            provider: provider.into(),
            registry: InteractionRegistry::new(),
            transport,
        }
    }

    pub fn consumer(&self) -> &str {
        &self.consumer
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Start declaring a new interaction.
    pub fn interaction(&mut self) -> InteractionBuilder<'_> {
        InteractionBuilder::new(&mut self.registry)
    }

    /// Interactions declared since the last verification.
    pub fn pending_interactions(&self) -> &InteractionRegistry {
        &self.registry
    }

    /// Exercise the mock provider and verify the declared interactions.
    ///
    /// # Arguments
    /// `exerciser` - issues the consumer's calls, either a single one or several at once
    ///     (`try_join_all`, `try_join!`).
    ///
    /// # Returns
    /// The response bodies in the order the calls were issued.
    pub async fn verify<F, Fut, O, E>(&mut self, exerciser: F) -> Result<Vec<String>, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<O, E>>,
        O: ExchangeOutcome,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        VerificationEngine::new(&self.transport)
            .verify(&mut self.registry, exerciser)
            .await
    }

    pub fn mock_server(&self) -> &T {
        &self.transport
    }

    pub fn mock_server_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_mock_server(self) -> T {
        self.transport
    }
}

impl Pact<MockServer> {
    /// Base url of the running mock server.
    pub fn url(&self) -> Result<String, Error> {
        self.transport.url()
    }
}
