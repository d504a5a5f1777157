use crate::context::MappingContext;
use crate::properties::PropertyRegistry;
use dggs_graph_model::{NamedNode, NamedNodeRef, Term, TermRef};
use dggs_graph_storage::{BoundingBox, Dataset, Observation, ObservationKind};
use std::iter;

/// Collects constraints on observations and resolves them against the cell index.
///
/// Structured constraints (cell, level, band, kind, and the extent of the cell) are resolved
/// through the index. Opaque constraints are checked for every remaining candidate by computing
/// the values of the constrained property.
///
/// Conflicting structured constraints never raise an error. Instead, the filter becomes
/// impossible and [Self::execute] does not produce any observation, no matter which constraints
/// are added afterward.
#[derive(Debug, Clone)]
pub struct ObservationFilter<'graph> {
    dataset: &'graph Dataset,
    registry: &'graph PropertyRegistry,
    context: &'graph MappingContext,
    cell_id: Option<String>,
    level: Option<u32>,
    band: Option<u32>,
    kind: Option<ObservationKind>,
    bbox: BoundingBox,
    impossible: bool,
    naive_constraints: Vec<(NamedNode, Term)>,
}

impl<'graph> ObservationFilter<'graph> {
    /// Creates a filter that accepts every observation of `dataset`.
    pub fn new(
        dataset: &'graph Dataset,
        registry: &'graph PropertyRegistry,
        context: &'graph MappingContext,
    ) -> Self {
        Self {
            dataset,
            registry,
            context,
            cell_id: None,
            level: None,
            band: None,
            kind: None,
            bbox: BoundingBox::default(),
            impossible: false,
            naive_constraints: Vec::new(),
        }
    }

    pub fn constrain_cell_id(&mut self, cell_id: &str) {
        match &self.cell_id {
            None => self.cell_id = Some(cell_id.to_owned()),
            Some(existing) if existing == cell_id => {}
            Some(_) => self.constrain_impossibly(),
        }
    }

    pub fn constrain_level(&mut self, level: u32) {
        self.impossible |= !constrain(&mut self.level, level);
    }

    pub fn constrain_band(&mut self, band: u32) {
        self.impossible |= !constrain(&mut self.band, band);
    }

    pub fn constrain_kind(&mut self, kind: ObservationKind) {
        self.impossible |= !constrain(&mut self.kind, kind);
    }

    /// Requires the southern edge of the cell to be at or north of `lat`.
    pub fn constrain_lat_min(&mut self, lat: f64) {
        self.bbox.lat_min = Some(self.bbox.lat_min.map_or(lat, |v| v.max(lat)));
    }

    /// Requires the northern edge of the cell to be at or south of `lat`.
    pub fn constrain_lat_max(&mut self, lat: f64) {
        self.bbox.lat_max = Some(self.bbox.lat_max.map_or(lat, |v| v.min(lat)));
    }

    /// Requires the western edge of the cell to be at or east of `lon`.
    pub fn constrain_lon_min(&mut self, lon: f64) {
        self.bbox.lon_min = Some(self.bbox.lon_min.map_or(lon, |v| v.max(lon)));
    }

    /// Requires the eastern edge of the cell to be at or west of `lon`.
    pub fn constrain_lon_max(&mut self, lon: f64) {
        self.bbox.lon_max = Some(self.bbox.lon_max.map_or(lon, |v| v.min(lon)));
    }

    /// Makes the filter reject every observation.
    pub fn constrain_impossibly(&mut self) {
        self.impossible = true;
    }

    /// Requires `value` to be among the values of the property of `predicate`.
    pub fn constrain_naively(&mut self, predicate: NamedNode, value: Term) {
        self.naive_constraints.push((predicate, value));
    }

    /// Requires `value` to be among the values of the property of `predicate`, letting the
    /// property choose how to express the constraint.
    ///
    /// An unknown predicate makes the filter impossible.
    pub fn constrain_property(&mut self, predicate: NamedNodeRef<'_>, value: TermRef<'_>) {
        let registry = self.registry;
        match registry.lookup_internal(predicate) {
            Some(property) => property.apply_to_filter(self, value),
            None => self.constrain_impossibly(),
        }
    }

    pub fn is_impossible(&self) -> bool {
        self.impossible
    }

    /// Returns whether `observation` satisfies all constraints.
    pub fn matches(&self, observation: &Observation<'_>) -> bool {
        let cell = observation.cell();
        !self.impossible
            && self.cell_id.as_deref().is_none_or(|id| id == cell.id())
            && self.level.is_none_or(|level| level == cell.level())
            && self.band.is_none_or(|band| band == observation.band())
            && self.kind.is_none_or(|kind| kind == observation.kind())
            && self.bbox.contains(cell.extent())
            && satisfies_naive_constraints(
                self.registry,
                self.context,
                &self.naive_constraints,
                observation,
            )
    }

    /// Resolves the filter into the observations that satisfy all constraints.
    ///
    /// The observations are produced lazily. An impossible filter does not touch the index.
    pub fn execute(self) -> Box<dyn Iterator<Item = Observation<'graph>> + 'graph> {
        if self.impossible {
            tracing::trace!("Skipping impossible observation filter");
            return Box::new(iter::empty());
        }
        tracing::debug!(
            cell = ?self.cell_id,
            level = ?self.level,
            band = ?self.band,
            kind = ?self.kind,
            bbox = ?self.bbox,
            naive_constraints = self.naive_constraints.len(),
            "Executing observation filter"
        );

        let Self {
            dataset,
            registry,
            context,
            cell_id,
            level,
            band,
            kind,
            bbox,
            naive_constraints,
            ..
        } = self;
        let observations = dataset
            .select_cells(level, cell_id.as_deref(), bbox)
            .flat_map(move |cell| cell.observations(band, kind));

        if naive_constraints.is_empty() {
            return Box::new(observations);
        }
        Box::new(observations.filter(move |observation| {
            satisfies_naive_constraints(registry, context, &naive_constraints, observation)
        }))
    }
}

/// Sets `slot` to `value` unless it already holds a different value. Returns whether the slot
/// holds `value` afterward.
fn constrain<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    match slot {
        None => {
            *slot = Some(value);
            true
        }
        Some(existing) => *existing == value,
    }
}

/// An observation satisfies an opaque constraint if any of the values of the property equals the
/// expected value.
fn satisfies_naive_constraints(
    registry: &PropertyRegistry,
    context: &MappingContext,
    constraints: &[(NamedNode, Term)],
    observation: &Observation<'_>,
) -> bool {
    constraints.iter().all(|(predicate, expected)| {
        registry
            .lookup_internal(predicate.as_ref())
            .is_some_and(|property| property.values_for(observation, context).contains(expected))
    })
}
