//! The entry point of the crate is the [`ObservationStore`] struct.
//!
//! Usage example:
//! ```
//! use dggs_graph::config::StoreConfig;
//! use dggs_graph::model::vocab::{led, rdf};
//! use dggs_graph::store::ObservationStore;
//!
//! let json = std::fs::read_to_string("../../testdata/nbar_2013-05-27.json")?;
//! let store = ObservationStore::from_json_str(StoreConfig::default(), &json)?;
//!
//! // triple lookup
//! let pixels = store.find(None, Some(rdf::TYPE.into()), Some(led::PIXEL.into()));
//! assert_eq!(pixels.count(), 42);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::config::StoreConfig;
use crate::error::{PatternError, StoreError};
use dggs_graph_engine::properties::PropertyRegistry;
use dggs_graph_engine::sparql::{
    FilteredBasicPattern, ObservationStageGenerator, Solution, SolutionIter,
};
use dggs_graph_engine::{MappingContext, ObservationGraph, TripleIter};
use dggs_graph_model::{GraphPattern, ObservationIriScheme, TermRef, TriplePattern};
use dggs_graph_storage::memory::MemoryBackingStore;
use dggs_graph_storage::{BackingStore, Dataset};
use std::iter;
use std::sync::Arc;

/// A read-only store exposing the observations of one capture as a virtual RDF graph.
#[derive(Debug, Clone)]
pub struct ObservationStore {
    config: StoreConfig,
    dataset: Arc<Dataset>,
    graph: ObservationGraph,
}

impl ObservationStore {
    /// Opens the capture stored in `backing`.
    pub fn open(config: StoreConfig, backing: Arc<dyn BackingStore>) -> Result<Self, StoreError> {
        config.validate()?;
        let dataset = Arc::new(Dataset::open(backing)?);
        let registry = Arc::new(PropertyRegistry::standard()?);
        let context = MappingContext::new(
            ObservationIriScheme::new(config.data_prefix()),
            config.dataset_prefix(),
        );
        let graph = ObservationGraph::new(Arc::clone(&dataset), registry, context);
        Ok(Self {
            config,
            dataset,
            graph,
        })
    }

    /// Opens a capture from the JSON snapshot of a [`MemoryBackingStore`].
    pub fn from_json_str(config: StoreConfig, json: &str) -> Result<Self, StoreError> {
        let backing = MemoryBackingStore::from_json_str(json)?;
        Self::open(config, Arc::new(backing))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn graph(&self) -> &ObservationGraph {
        &self.graph
    }

    /// Returns all triples matching the given pattern. `None` matches any term.
    ///
    /// Terms that do not occur in the graph simply do not match anything.
    pub fn find(
        &self,
        subject: Option<TermRef<'_>>,
        predicate: Option<TermRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> TripleIter<'_> {
        self.graph.find(subject, predicate, object)
    }

    /// Returns the solutions of the basic graph pattern `patterns`.
    pub fn evaluate_bgp(&self, patterns: &[TriplePattern]) -> SolutionIter<'_> {
        self.evaluate(&FilteredBasicPattern::new(patterns.to_vec()))
    }

    /// Returns the solutions of the basic graph pattern of `pattern`.
    ///
    /// `pattern` must be a basic graph pattern or a filter directly on top of one. Inequalities of
    /// the filter are used to skip observations early, but the filter itself is not evaluated:
    /// the solutions may still contain bindings that violate it.
    pub fn evaluate_pattern(
        &self,
        pattern: &GraphPattern,
    ) -> Result<SolutionIter<'_>, PatternError> {
        let group = FilteredBasicPattern::from_graph_pattern(pattern)
            .ok_or_else(|| PatternError::new(pattern))?;
        Ok(self.evaluate(&group))
    }

    fn evaluate(&self, group: &FilteredBasicPattern) -> SolutionIter<'_> {
        ObservationStageGenerator::new(&self.graph)
            .execute(group, Box::new(iter::once(Solution::new())))
    }

    /// Releases the store and, if no clone of it is left, the dataset.
    pub fn close(self) {
        let Self { dataset, graph, .. } = self;
        drop(graph);
        match Arc::try_unwrap(dataset) {
            Ok(dataset) => dataset.close(),
            Err(_) => tracing::debug!("Dataset is still shared, keeping it open"),
        }
    }
}
