//! The virtual observation graph.
//!
//! Every fact about an observation is computed on demand from the [Dataset]. The mapping between
//! predicates and observations lives in the [properties] module. An [ObservationFilter] collects
//! the constraints of a query and resolves them against the cell index, and the [ObservationGraph]
//! answers triple pattern lookups on top of that. The [sparql] module contains the hooks a query
//! engine calls to evaluate whole basic graph patterns without matching every pattern on its own.
//!
//! [Dataset]: dggs_graph_storage::Dataset

mod context;
mod filter;
mod graph;
pub mod properties;
pub mod sparql;

pub use context::MappingContext;
pub use filter::ObservationFilter;
pub use graph::{ObservationGraph, TripleIter};
