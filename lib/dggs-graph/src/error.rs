use dggs_graph_engine::properties::RegistryError;
use dggs_graph_model::IriParseError;
use dggs_graph_storage::StorageError;

/// An error raised while opening an [`ObservationStore`](crate::store::ObservationStore).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The backing store could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The property registry could not be built.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The configuration could not be read.
    #[error("Invalid configuration: {0}")]
    ConfigFormat(#[from] serde_json::Error),
    /// A prefix of the configuration is not an absolute IRI.
    #[error("Invalid prefix '{prefix}': {error}")]
    InvalidConfig {
        /// The prefix itself.
        prefix: String,
        /// The parsing error.
        #[source]
        error: IriParseError,
    },
}

/// A graph pattern that is neither a basic graph pattern nor a filter directly on top of one.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Expected a basic graph pattern, optionally below a filter, found {pattern}")]
pub struct PatternError {
    pattern: String,
}

impl PatternError {
    pub(crate) fn new(pattern: &impl ToString) -> Self {
        Self {
            pattern: pattern.to_string(),
        }
    }
}
