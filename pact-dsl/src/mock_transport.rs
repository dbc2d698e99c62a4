use crate::{data::Interaction, error::Error};
use async_trait::async_trait;
use std::fmt::Debug;

/// Control surface of the mock provider the interactions are verified against.
///
/// The lifecycle (`start` before verifying, `stop` afterwards) belongs to the test harness.
#[async_trait]
pub trait MockTransport: Debug + Send + Sync {
    /// Replace the served interactions and forget previously recorded mismatches.
    async fn configure(&self, interactions: &[Interaction]) -> Result<(), Error>;
    async fn start(&mut self) -> Result<(), Error>;
    async fn stop(&mut self) -> Result<(), Error>;
    /// Mismatches recorded since the last `configure`, in the order the requests arrived.
    async fn mismatches(&self) -> Result<Vec<String>, Error>;
}
