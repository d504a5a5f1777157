//! Maps predicates of the virtual graph to observations.
//!
//! Each predicate is implemented by an [ObservationProperty]. A property computes the objects of
//! an observation for its predicate and may translate an expected object into a structured
//! constraint of an [ObservationFilter](crate::ObservationFilter).

mod bounding_box;
mod geometry;
mod identity;
mod payload;
mod registry;

pub use bounding_box::{BoundingBoxProperty, BoxSide};
pub use geometry::{
    BoundsProperty, ExtentProperty, ExtentSide, LatProperty, LongProperty, ResolutionProperty,
};
pub use identity::{
    BandProperty, CellProperty, DataSetProperty, LevelPixelProperty, LevelSquareProperty,
    RdfTypeProperty, TimeProperty,
};
pub use payload::{ImageDataProperty, PixelValueProperty};
pub use registry::{PropertyRegistry, RegistryError};

use crate::context::MappingContext;
use crate::filter::ObservationFilter;
use dggs_graph_model::vocab::xsd;
use dggs_graph_model::{Literal, NamedNodeRef, Term, TermRef};
use dggs_graph_storage::Observation;
use std::fmt::Debug;

/// The mapping between one predicate and the observations of a dataset.
pub trait ObservationProperty: Debug + Send + Sync {
    /// The predicate this property produces.
    fn predicate(&self) -> NamedNodeRef<'_>;

    /// Computes the objects of `observation` for this predicate.
    ///
    /// The result only depends on the observation and the context. It can be empty, e.g., for a
    /// pixel value of an areal observation.
    fn values_for(&self, observation: &Observation<'_>, context: &MappingContext) -> Vec<Term>;

    /// Restricts `filter` to the observations that have `value` as one of their objects.
    ///
    /// The default implementation adds an opaque equality check that calls [Self::values_for]
    /// for every candidate. Implementations should only use a structured constraint if it selects
    /// exactly the same observations.
    fn apply_to_filter(&self, filter: &mut ObservationFilter<'_>, value: TermRef<'_>) {
        filter.constrain_naively(self.predicate().into_owned(), value.into_owned());
    }

    /// Whether this property is only used internally and must not be exposed to callers.
    fn is_internal(&self) -> bool {
        false
    }
}

pub(crate) fn integer_literal(value: u32) -> Term {
    Literal::new_typed_literal(value.to_string(), xsd::INTEGER).into()
}

pub(crate) fn double_literal(value: f64) -> Term {
    Literal::from(value).into()
}

/// Parses `value` if it is an integer literal in exactly the form [integer_literal] produces.
pub(crate) fn parse_integer_literal(value: TermRef<'_>) -> Option<u32> {
    let TermRef::Literal(literal) = value else {
        return None;
    };
    if literal.datatype() != xsd::INTEGER {
        return None;
    }
    let parsed = literal.value().parse::<u32>().ok()?;
    (parsed.to_string() == literal.value()).then_some(parsed)
}

/// Parses any numeric literal into a floating point number.
pub(crate) fn parse_numeric_literal(value: TermRef<'_>) -> Option<f64> {
    let TermRef::Literal(literal) = value else {
        return None;
    };
    let datatype = literal.datatype();
    let numeric = [
        xsd::DOUBLE,
        xsd::FLOAT,
        xsd::DECIMAL,
        xsd::INTEGER,
        xsd::INT,
        xsd::LONG,
        xsd::SHORT,
        xsd::BYTE,
        xsd::NON_NEGATIVE_INTEGER,
        xsd::NON_POSITIVE_INTEGER,
        xsd::POSITIVE_INTEGER,
        xsd::NEGATIVE_INTEGER,
    ];
    if !numeric.contains(&datatype) {
        return None;
    }
    literal.value().trim().parse().ok()
}
