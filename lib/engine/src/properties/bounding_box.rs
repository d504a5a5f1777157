use super::{parse_numeric_literal, ObservationProperty};
use crate::context::MappingContext;
use crate::filter::ObservationFilter;
use dggs_graph_model::{NamedNode, NamedNodeRef, Term, TermRef};
use dggs_graph_storage::Observation;
use std::sync::LazyLock;
use uuid::Uuid;

struct BoxPredicates {
    bottom: NamedNode,
    top: NamedNode,
    left: NamedNode,
    right: NamedNode,
}

/// The predicates live in a namespace that changes with every process, so nothing outside the
/// query hooks can rely on them.
static BOX_PREDICATES: LazyLock<BoxPredicates> = LazyLock::new(|| {
    let namespace = format!("urn:x-dggs-graph:{}:lat-lon-box-", Uuid::new_v4());
    let predicate = |side: &str| NamedNode::new_unchecked(format!("{namespace}{side}"));
    BoxPredicates {
        bottom: predicate("bottom"),
        top: predicate("top"),
        left: predicate("left"),
        right: predicate("right"),
    }
});

/// One side of a bounding box that cells must lie within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxSide {
    /// Cells must lie north of a latitude.
    Bottom,
    /// Cells must lie south of a latitude.
    Top,
    /// Cells must lie east of a longitude.
    Left,
    /// Cells must lie west of a longitude.
    Right,
}

impl BoxSide {
    /// The internal predicate of this side.
    pub fn predicate(self) -> NamedNodeRef<'static> {
        let predicates = &*BOX_PREDICATES;
        match self {
            Self::Bottom => predicates.bottom.as_ref(),
            Self::Top => predicates.top.as_ref(),
            Self::Left => predicates.left.as_ref(),
            Self::Right => predicates.right.as_ref(),
        }
    }
}

/// Restricts the extent of the observed cells.
///
/// This property only exists so the query hooks can express inequality filters on the extent of a
/// cell as triple patterns. It never produces values. Asking it for values is a bug in the
/// caller.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBoxProperty {
    side: BoxSide,
}

impl BoundingBoxProperty {
    pub fn new(side: BoxSide) -> Self {
        Self { side }
    }
}

impl ObservationProperty for BoundingBoxProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        self.side.predicate()
    }

    #[allow(clippy::panic, reason = "Reaching this is a programming error")]
    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        panic!(
            "The internal bounding box predicate {} has no values (requested for {observation})",
            self.predicate()
        )
    }

    fn apply_to_filter(&self, filter: &mut ObservationFilter<'_>, value: TermRef<'_>) {
        let Some(bound) = parse_numeric_literal(value) else {
            filter.constrain_impossibly();
            return;
        };
        match self.side {
            BoxSide::Bottom => filter.constrain_lat_min(bound),
            BoxSide::Top => filter.constrain_lat_max(bound),
            BoxSide::Left => filter.constrain_lon_min(bound),
            BoxSide::Right => filter.constrain_lon_max(bound),
        }
    }

    fn is_internal(&self) -> bool {
        true
    }
}
