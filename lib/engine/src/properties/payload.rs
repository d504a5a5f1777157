use super::{double_literal, ObservationProperty};
use crate::context::MappingContext;
use dggs_graph_model::vocab::led;
use dggs_graph_model::{NamedNode, NamedNodeRef, Term};
use dggs_graph_storage::Observation;

/// The summary value of pointwise observations.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelValueProperty;

impl ObservationProperty for PixelValueProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        led::VALUE
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        observation
            .pixel_value()
            .map(double_literal)
            .into_iter()
            .collect()
    }
}

/// The tile of areal observations as PNG `data:` URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDataProperty;

impl ObservationProperty for ImageDataProperty {
    fn predicate(&self) -> NamedNodeRef<'_> {
        led::IMAGE_DATA
    }

    fn values_for(&self, observation: &Observation<'_>, _context: &MappingContext) -> Vec<Term> {
        let uri = observation
            .tile_image()
            .and_then(|image| image.map(|image| image.to_data_uri()).transpose());
        match uri {
            Ok(Some(uri)) => vec![NamedNode::new_unchecked(uri).into()],
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, %observation, "Tile image is not available");
                Vec::new()
            }
        }
    }
}
