//! Consumer-side contract testing: declare the interactions a consumer expects from its
//! provider, exercise a mock provider and verify the traffic matched them.

mod data;
mod error;
mod exchange;
mod interaction_builder;
mod interaction_matcher;
mod interaction_registry;
mod mock_server;
mod mock_server_configuration;
mod mock_transport;
mod pact;
pub mod runner;
mod util;
mod verification;

pub use data::{Interaction, RequestData, RequestSpec, ResponseData, ResponseSpec};
pub use error::{ConfigurationError, Error};
pub use exchange::ExchangeOutcome;
pub use interaction_builder::InteractionBuilder;
pub use interaction_matcher::InteractionMatcher;
pub use interaction_registry::InteractionRegistry;
pub use mock_server::MockServer;
pub use mock_server_configuration::MockServerConfiguration;
pub use mock_transport::MockTransport;
pub use pact::Pact;
pub use pact_dsl_codegen::pact_test;
pub use verification::VerificationEngine;
