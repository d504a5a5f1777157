#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use dggs_graph_engine::properties::PropertyRegistry;
use dggs_graph_engine::{MappingContext, ObservationGraph};
use dggs_graph_model::{Literal, NamedNode, NamedNodePattern, NamedNodeRef, TermPattern, TriplePattern, Variable};
use dggs_graph_storage::memory::MemoryBackingStore;
use dggs_graph_storage::Dataset;
use std::error::Error;
use std::sync::Arc;

mod filter;
mod find;
mod stage;

const FIXTURE: &str = include_str!("../../../../testdata/nbar_2013-05-27.json");

const OBSERVATION_PREFIX: &str = "https://anulinkedearth.org/rdf/observation/2013/05/27/23/58/20";

fn open_graph() -> Result<ObservationGraph, Box<dyn Error>> {
    open_graph_from(FIXTURE)
}

fn open_graph_from(fixture: &str) -> Result<ObservationGraph, Box<dyn Error>> {
    let store = MemoryBackingStore::from_json_str(fixture)?;
    let dataset = Dataset::open(Arc::new(store))?;
    Ok(ObservationGraph::new(
        Arc::new(dataset),
        Arc::new(PropertyRegistry::standard()?),
        MappingContext::default(),
    ))
}

fn observation_iri(cell: &str, coarse: u32, fine: u32, band: u32) -> NamedNode {
    NamedNode::new_unchecked(format!(
        "{OBSERVATION_PREFIX}/cell/{cell}/levelSquare-{coarse}/levelPixel-{fine}/band-{band}"
    ))
}

fn var(name: &str) -> TermPattern {
    TermPattern::Variable(Variable::new_unchecked(name))
}

fn pattern(
    subject: TermPattern,
    predicate: NamedNodeRef<'_>,
    object: impl Into<TermPattern>,
) -> TriplePattern {
    TriplePattern {
        subject,
        predicate: NamedNodePattern::NamedNode(predicate.into_owned()),
        object: object.into(),
    }
}

fn integer(value: i64) -> Literal {
    Literal::from(value)
}
