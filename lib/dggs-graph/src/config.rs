//! Configuration of an [`ObservationStore`](crate::store::ObservationStore).

use crate::error::StoreError;
use dggs_graph_model::{Iri, DEFAULT_DATA_PREFIX};
use serde::{Deserialize, Serialize};

/// Where the identifiers of the virtual graph live.
///
/// Missing fields of a serialized configuration fall back to their defaults.
///
/// ```
/// use dggs_graph::config::StoreConfig;
///
/// let config = StoreConfig::from_json(r#"{ "data_prefix": "http://example.com/eo/" }"#)?;
/// assert_eq!(config.data_prefix(), "http://example.com/eo/");
/// assert_eq!(config.dataset_prefix(), "https://anulinkedearth.org/rdf/");
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    data_prefix: String,
    dataset_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_prefix: DEFAULT_DATA_PREFIX.to_owned(),
            dataset_prefix: DEFAULT_DATA_PREFIX.to_owned(),
        }
    }
}

impl StoreConfig {
    /// Reads a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the prefix of the observation identifiers.
    #[must_use]
    pub fn with_data_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.data_prefix = prefix.into();
        self
    }

    /// Sets the prefix of the data set IRIs.
    #[must_use]
    pub fn with_dataset_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.dataset_prefix = prefix.into();
        self
    }

    pub fn data_prefix(&self) -> &str {
        &self.data_prefix
    }

    pub fn dataset_prefix(&self) -> &str {
        &self.dataset_prefix
    }

    /// Checks that both prefixes are absolute IRIs.
    pub fn validate(&self) -> Result<(), StoreError> {
        for prefix in [&self.data_prefix, &self.dataset_prefix] {
            Iri::parse(prefix.as_str()).map_err(|error| StoreError::InvalidConfig {
                prefix: prefix.clone(),
                error,
            })?;
        }
        Ok(())
    }
}
