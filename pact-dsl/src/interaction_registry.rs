use crate::{data::Interaction, error::Error, mock_transport::MockTransport};
use tracing::debug;

/// Interactions declared for the next verification, in declaration order.
#[derive(Debug, Default)]
pub struct InteractionRegistry {
    entries: Vec<Interaction>,
}

impl InteractionRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn register(&mut self, interaction: Interaction) {
        debug!(
            description = %interaction.description,
            method = %interaction.request.method,
            path = %interaction.request.path,
            "registered interaction"
        );
        self.entries.push(interaction);
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Push the current entries to the transport so it can serve them.
    pub async fn configure<T: MockTransport + ?Sized>(&self, transport: &T) -> Result<(), Error> {
        transport.configure(&self.entries).await
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interaction> {
        self.entries.iter()
    }
}
