use crate::context::MappingContext;
use crate::filter::ObservationFilter;
use crate::properties::{ObservationProperty, PropertyRegistry};
use dggs_graph_model::{NamedNode, ObservationMeta, Term, TermRef, Triple};
use dggs_graph_storage::{Dataset, Observation, ObservationKind};
use std::iter;
use std::sync::Arc;

/// A lazy sequence of triples.
pub type TripleIter<'graph> = Box<dyn Iterator<Item = Triple> + 'graph>;

/// The virtual graph of all facts about the observations of a dataset.
///
/// No triple is stored. Each lookup resolves the candidate observations and computes the
/// requested facts on demand.
#[derive(Debug, Clone)]
pub struct ObservationGraph {
    dataset: Arc<Dataset>,
    registry: Arc<PropertyRegistry>,
    context: MappingContext,
}

impl ObservationGraph {
    pub fn new(
        dataset: Arc<Dataset>,
        registry: Arc<PropertyRegistry>,
        context: MappingContext,
    ) -> Self {
        Self {
            dataset,
            registry,
            context,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    pub fn context(&self) -> &MappingContext {
        &self.context
    }

    /// Creates a filter that accepts every observation of this graph.
    pub fn filter(&self) -> ObservationFilter<'_> {
        ObservationFilter::new(&self.dataset, &self.registry, &self.context)
    }

    /// Returns the canonical identifier of `observation`.
    pub fn observation_iri(&self, observation: &Observation<'_>) -> NamedNode {
        self.context.observation_iri(observation)
    }

    /// Resolves the observation identified by `meta`.
    pub fn observation_for_meta(&self, meta: &ObservationMeta) -> Option<Observation<'_>> {
        let kind = if meta.fine_level == meta.coarse_level {
            ObservationKind::Pointwise
        } else {
            ObservationKind::Areal
        };
        let mut filter = self.filter();
        filter.constrain_band(meta.band);
        filter.constrain_cell_id(&meta.cell_id);
        filter.constrain_level(meta.coarse_level);
        filter.constrain_kind(kind);

        filter.execute().next().filter(|observation| {
            observation.fine_level() == meta.fine_level
                && observation.timestamp() == meta.timestamp
        })
    }

    /// Resolves the observation whose canonical identifier is `iri`.
    ///
    /// Returns `None` if `iri` is not the canonical identifier of an observation of this graph.
    pub fn observation_for_iri(&self, iri: &str) -> Option<Observation<'_>> {
        let meta = match self.context.iri_scheme().parse(iri) {
            Ok(meta) => meta,
            Err(error) => {
                tracing::trace!(%error, "Not an observation");
                return None;
            }
        };
        self.observation_for_meta(&meta)
            .filter(|observation| self.observation_iri(observation).as_str() == iri)
    }

    /// Returns all triples matching the given pattern. `None` matches any term.
    ///
    /// Terms that cannot occur at a position (e.g., a literal as subject) as well as unknown
    /// predicates and subjects simply do not match anything.
    pub fn find(
        &self,
        subject: Option<TermRef<'_>>,
        predicate: Option<TermRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> TripleIter<'_> {
        let property = match predicate {
            None => None,
            Some(TermRef::NamedNode(predicate)) => match self.registry.lookup(predicate) {
                Some(property) => Some(property),
                None => return Box::new(iter::empty()),
            },
            Some(_) => return Box::new(iter::empty()),
        };

        let candidates: Box<dyn Iterator<Item = Observation<'_>> + '_> = match subject {
            Some(TermRef::NamedNode(subject)) => {
                match self.observation_for_iri(subject.as_str()) {
                    Some(observation) => Box::new(iter::once(observation)),
                    None => return Box::new(iter::empty()),
                }
            }
            Some(_) => return Box::new(iter::empty()),
            None => match (property, object) {
                (Some(property), Some(object)) => {
                    let mut filter = self.filter();
                    property.apply_to_filter(&mut filter, object);
                    filter.execute()
                }
                _ => Box::new(self.dataset.observations()),
            },
        };

        let triples = candidates.flat_map(move |observation| self.triples_for(observation, property));
        match object.map(TermRef::into_owned) {
            Some(object) => Box::new(triples.filter(move |triple| triple.object == object)),
            None => Box::new(triples),
        }
    }

    /// Materializes the triples of `observation`, either for a single property or for all public
    /// properties.
    fn triples_for<'graph>(
        &'graph self,
        observation: Observation<'graph>,
        property: Option<&'graph dyn ObservationProperty>,
    ) -> impl Iterator<Item = Triple> + 'graph {
        let subject = self.observation_iri(&observation);
        let properties: Box<dyn Iterator<Item = &'graph dyn ObservationProperty> + 'graph> =
            match property {
                Some(property) => Box::new(iter::once(property)),
                None => Box::new(self.registry.properties()),
            };
        properties.flat_map(move |property| {
            let subject = subject.clone();
            let predicate = property.predicate().into_owned();
            property
                .values_for(&observation, &self.context)
                .into_iter()
                .map(move |value: Term| Triple::new(subject.clone(), predicate.clone(), value))
        })
    }
}
