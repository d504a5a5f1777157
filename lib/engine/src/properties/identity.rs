use super::{integer_literal, parse_integer_literal, ObservationProperty};
use crate::context::MappingContext;
use crate::filter::ObservationFilter;
use dggs_graph_model::vocab::{led, qb, rdf, xsd};
use dggs_graph_model::{Literal, NamedNodeRef, Term, TermRef};
use dggs_graph_storage::{Observation, ObservationKind};
use time::format_description::well_known::Rfc3339;

/// Classifies every observation as `qb:Observation` and as either `led:Pixel` or
/// `led:GridSquare`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RdfTypeProperty;

impl ObservationProperty for RdfTypeProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        rdf::TYPE
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        let kind = match observation.kind() {
            ObservationKind::Pointwise => led::PIXEL,
            ObservationKind::Areal => led::GRID_SQUARE,
        };
        vec![qb::OBSERVATION.into_owned().into(), kind.into_owned().into()]
    }

    fn apply_to_filter(&self, filter: &mut ObservationFilter<'_>, value: TermRef<'_>) {
        match value {
            TermRef::NamedNode(class) if class == led::PIXEL => {
                filter.constrain_kind(ObservationKind::Pointwise);
            }
            TermRef::NamedNode(class) if class == led::GRID_SQUARE => {
                filter.constrain_kind(ObservationKind::Areal);
            }
            TermRef::NamedNode(class) if class == qb::OBSERVATION => {}
            _ => filter.constrain_impossibly(),
        }
    }
}

/// The band index as `led:etmBand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandProperty;

impl ObservationProperty for BandProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        led::ETM_BAND
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        vec![integer_literal(observation.band())]
    }

    fn apply_to_filter(&self, filter: &mut ObservationFilter<'_>, value: TermRef<'_>) {
        match parse_integer_literal(value) {
            Some(band) => filter.constrain_band(band),
            None => filter.constrain_impossibly(),
        }
    }
}

/// The cell identifier as simple literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellProperty;

impl ObservationProperty for CellProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        led::DGGS_CELL
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        vec![Literal::new_simple_literal(observation.cell().id()).into()]
    }

    fn apply_to_filter(&self, filter: &mut ObservationFilter<'_>, value: TermRef<'_>) {
        match value {
            TermRef::Literal(literal) if literal.datatype() == xsd::STRING => {
                filter.constrain_cell_id(literal.value());
            }
            _ => filter.constrain_impossibly(),
        }
    }
}

/// The hierarchy level of the cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelSquareProperty;

impl ObservationProperty for LevelSquareProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        led::DGGS_LEVEL_SQUARE
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        vec![integer_literal(observation.coarse_level())]
    }

    fn apply_to_filter(&self, filter: &mut ObservationFilter<'_>, value: TermRef<'_>) {
        match parse_integer_literal(value) {
            Some(level) => filter.constrain_level(level),
            None => filter.constrain_impossibly(),
        }
    }
}

/// The hierarchy level of the finest detail of the observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelPixelProperty;

impl ObservationProperty for LevelPixelProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        led::DGGS_LEVEL_PIXEL
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        vec![integer_literal(observation.fine_level())]
    }
}

/// Links an observation to the data cube data set of its product.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataSetProperty;

impl ObservationProperty for DataSetProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        qb::DATA_SET
    }

    fn values_for(&self, observation: &Observation<'_>, context: &MappingContext) -> Vec<Term> {
        vec![context.dataset_iri(observation.product()).into()]
    }
}

/// The capture time as `xsd:dateTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeProperty;

impl ObservationProperty for TimeProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        led::TIME
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        match observation.timestamp().format(&Rfc3339) {
            Ok(timestamp) => vec![Literal::new_typed_literal(timestamp, xsd::DATE_TIME).into()],
            Err(error) => {
                tracing::warn!(%error, "Capture time cannot be formatted");
                Vec::new()
            }
        }
    }
}
