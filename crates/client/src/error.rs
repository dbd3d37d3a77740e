/// Every failed remote interaction collapses into this one kind.
#[derive(Debug, thiserror::Error)]
#[error("interaction failed: {source}")]
pub struct InteractionFailed {
    #[source]
    source: anyhow::Error,
}

impl InteractionFailed {
    pub fn new(source: anyhow::Error) -> Self {
        Self { source }
    }
}

impl From<anyhow::Error> for InteractionFailed {
    fn from(source: anyhow::Error) -> Self {
        Self::new(source)
    }
}
