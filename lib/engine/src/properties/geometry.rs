use super::{double_literal, ObservationProperty};
use crate::context::MappingContext;
use dggs_graph_model::vocab::{geo, geosparql, led};
use dggs_graph_model::{Literal, NamedNodeRef, Term};
use dggs_graph_storage::Observation;
use itertools::Itertools;

/// The latitude of the cell's centre.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatProperty;

impl ObservationProperty for LatProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        geo::LAT
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        vec![double_literal(observation.cell().centre().lat)]
    }
}

/// The longitude of the cell's centre.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongProperty;

impl ObservationProperty for LongProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        geo::LONG
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        vec![double_literal(observation.cell().centre().lon)]
    }
}

/// The boundary of the cell as WKT polygon.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundsProperty;

impl ObservationProperty for BoundsProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        led::BOUNDS
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        let ring = observation
            .cell()
            .boundary()
            .iter()
            .map(|point| format!("{} {}", point.lon, point.lat))
            .join(", ");
        vec![Literal::new_typed_literal(format!("POLYGON(({ring}))"), geosparql::WKT_LITERAL).into()]
    }
}

/// The number of pixels per degree.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionProperty;

impl ObservationProperty for ResolutionProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        led::RESOLUTION
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        vec![double_literal(observation.resolution())]
    }
}

/// One edge of a cell's extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtentSide {
    LatMin,
    LatMax,
    LonMin,
    LonMax,
}

impl ExtentSide {
    /// The predicate that exposes this side.
    pub fn predicate(self) -> NamedNodeRef<'static> {
        match self {
            Self::LatMin => led::LAT_MIN,
            Self::LatMax => led::LAT_MAX,
            Self::LonMin => led::LONG_MIN,
            Self::LonMax => led::LONG_MAX,
        }
    }

    /// Returns the side exposed by `predicate`, if any.
    pub fn from_predicate(predicate: NamedNodeRef<'_>) -> Option<Self> {
        [Self::LatMin, Self::LatMax, Self::LonMin, Self::LonMax]
            .into_iter()
            .find(|side| side.predicate() == predicate)
    }
}

/// One edge of the extent of the cell, e.g., its southernmost latitude for `led:latMin`.
#[derive(Debug, Clone, Copy)]
pub struct ExtentProperty {
    side: ExtentSide,
}

impl ExtentProperty {
    pub fn new(side: ExtentSide) -> Self {
        Self { side }
    }
}

impl ObservationProperty for ExtentProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        self.side.predicate()
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        let extent = observation.cell().extent();
        let value = match self.side {
            ExtentSide::LatMin => extent.lat_min,
            ExtentSide::LatMax => extent.lat_max,
            ExtentSide::LonMin => extent.lon_min,
            ExtentSide::LonMax => extent.lon_max,
        };
        vec![double_literal(value)]
    }
}
