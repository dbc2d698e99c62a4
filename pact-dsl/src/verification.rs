use crate::{
    error::{ConfigurationError, Error},
    exchange::ExchangeOutcome,
    interaction_registry::InteractionRegistry,
    mock_transport::MockTransport,
};
use std::future::Future;
use tracing::{info, warn};

/// Runs one verification: configure the transport, exercise it, collect the verdict.
#[derive(Debug)]
pub struct VerificationEngine<'a, T: MockTransport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: MockTransport + ?Sized> VerificationEngine<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Verify the registered interactions against the calls issued by `exerciser`.
    ///
    /// The registry is emptied once the transport has been configured from it, whatever
    /// the outcome.
    ///
    /// # Returns
    /// The response payloads in the order the exerciser issued the calls, an
    /// [`Error::Mismatch`] listing unexpected requests, or, when every request matched,
    /// the exerciser's own failure as [`Error::Transport`].
    pub async fn verify<F, Fut, O, E>(
        &self,
        registry: &mut InteractionRegistry,
        exerciser: F,
    ) -> Result<Vec<String>, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<O, E>>,
        O: ExchangeOutcome,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if registry.is_empty() {
            return Err(ConfigurationError::NoInteractions.into());
        }

        let interaction_count = registry.len();
        let configured = registry.configure(self.transport).await;
        registry.reset();
        configured?;

        info!(interactions = interaction_count, "verifying interactions");

        let exercised = match exerciser().await {
            Ok(outcome) => outcome.into_payloads().await,
            Err(e) => Err(Error::transport(e)),
        };

        // Clients that reject on error statuses fail on the 500 served for an
        // unmatched request, so mismatches take precedence over exerciser failures.
        let mismatches = self.transport.mismatches().await?;
        if !mismatches.is_empty() {
            warn!(mismatches = mismatches.len(), "verification failed");
            return Err(Error::Mismatch(mismatches));
        }

        let payloads = exercised?;

        info!(responses = payloads.len(), "verification succeeded");

        Ok(payloads)
    }
}
