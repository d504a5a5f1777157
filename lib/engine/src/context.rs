use dggs_graph_model::{NamedNode, ObservationIriScheme, DEFAULT_DATA_PREFIX};
use dggs_graph_storage::{Observation, Product};

/// Holds everything, besides the observation itself, that is needed to turn an observation into
/// RDF terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingContext {
    iri_scheme: ObservationIriScheme,
    dataset_prefix: String,
}

impl Default for MappingContext {
    fn default() -> Self {
        Self::new(ObservationIriScheme::default(), DEFAULT_DATA_PREFIX)
    }
}

impl MappingContext {
    /// Creates a new [MappingContext]. Dataset IRIs are placed below `dataset_prefix`.
    pub fn new(iri_scheme: ObservationIriScheme, dataset_prefix: impl Into<String>) -> Self {
        Self {
            iri_scheme,
            dataset_prefix: dataset_prefix.into(),
        }
    }

    pub fn iri_scheme(&self) -> &ObservationIriScheme {
        &self.iri_scheme
    }

    /// Returns the canonical identifier of `observation`.
    pub fn observation_iri(&self, observation: &Observation<'_>) -> NamedNode {
        self.iri_scheme.format(&observation.meta())
    }

    /// Returns the IRI of the data cube data set of `product`.
    pub fn dataset_iri(&self, product: &Product) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{}-dataset", self.dataset_prefix, product.name()))
    }
}
