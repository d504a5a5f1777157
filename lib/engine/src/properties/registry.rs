use super::{
    BandProperty, BoundingBoxProperty, BoundsProperty, BoxSide, CellProperty, DataSetProperty,
    ExtentProperty, ExtentSide, ImageDataProperty, LatProperty, LevelPixelProperty,
    LevelSquareProperty, LongProperty, ObservationProperty, PixelValueProperty,
    RdfTypeProperty, ResolutionProperty, TimeProperty,
};
use dggs_graph_model::{NamedNode, NamedNodeRef};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// An error raised while building a [PropertyRegistry].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("The predicate {0} is registered twice")]
    DuplicatePredicate(NamedNode),
}

/// Holds all properties of the virtual graph, keyed by their predicate.
///
/// The registry is built once, usually with [PropertyRegistry::standard], and then shared
/// read-only. Internal properties can be looked up with [PropertyRegistry::lookup_internal] but
/// are never listed or returned by [PropertyRegistry::lookup].
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: FxHashMap<String, Arc<dyn ObservationProperty>>,
    external: Vec<Arc<dyn ObservationProperty>>,
}

impl PropertyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the properties describing the identity, geometry, and payload of
    /// an observation.
    pub fn core() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(Arc::new(RdfTypeProperty))?;
        registry.register(Arc::new(BandProperty))?;
        registry.register(Arc::new(CellProperty))?;
        registry.register(Arc::new(LevelSquareProperty))?;
        registry.register(Arc::new(LevelPixelProperty))?;
        registry.register(Arc::new(LatProperty))?;
        registry.register(Arc::new(LongProperty))?;
        registry.register(Arc::new(BoundsProperty))?;
        registry.register(Arc::new(ResolutionProperty))?;
        registry.register(Arc::new(PixelValueProperty))?;
        registry.register(Arc::new(ImageDataProperty))?;
        registry.register(Arc::new(DataSetProperty))?;
        registry.register(Arc::new(TimeProperty))?;
        Ok(registry)
    }

    /// Creates a registry with the [core](Self::core) properties, the extent of the cell, and the
    /// internal bounding box properties used by the query hooks.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut registry = Self::core()?;
        for side in [
            ExtentSide::LatMin,
            ExtentSide::LatMax,
            ExtentSide::LonMin,
            ExtentSide::LonMax,
        ] {
            registry.register(Arc::new(ExtentProperty::new(side)))?;
        }
        for side in [BoxSide::Bottom, BoxSide::Top, BoxSide::Left, BoxSide::Right] {
            registry.register(Arc::new(BoundingBoxProperty::new(side)))?;
        }
        Ok(registry)
    }

    /// Adds `property` to the registry.
    pub fn register(&mut self, property: Arc<dyn ObservationProperty>) -> Result<(), RegistryError> {
        let predicate = property.predicate().as_str().to_owned();
        if self.properties.contains_key(&predicate) {
            return Err(RegistryError::DuplicatePredicate(NamedNode::new_unchecked(
                predicate,
            )));
        }
        if !property.is_internal() {
            self.external.push(Arc::clone(&property));
        }
        self.properties.insert(predicate, property);
        Ok(())
    }

    /// Looks up the public property of `predicate`.
    pub fn lookup(&self, predicate: NamedNodeRef<'_>) -> Option<&dyn ObservationProperty> {
        self.lookup_internal(predicate)
            .filter(|property| !property.is_internal())
    }

    /// Looks up the property of `predicate`, including internal ones.
    pub fn lookup_internal(&self, predicate: NamedNodeRef<'_>) -> Option<&dyn ObservationProperty> {
        self.properties
            .get(predicate.as_str())
            .map(|property| property.as_ref())
    }

    /// Returns all public properties in registration order.
    pub fn properties(&self) -> impl Iterator<Item = &dyn ObservationProperty> + '_ {
        self.external.iter().map(|property| property.as_ref())
    }

    /// Returns the predicates of all public properties in registration order.
    pub fn predicate_ids(&self) -> impl Iterator<Item = NamedNodeRef<'_>> + '_ {
        self.properties().map(|property| property.predicate())
    }

    /// The number of public properties.
    pub fn len(&self) -> usize {
        self.external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.external.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dggs_graph_model::vocab::{geo, led, rdf};
    use std::collections::HashSet;

    #[test]
    fn core_registry_has_thirteen_distinct_predicates() {
        let registry = PropertyRegistry::core().unwrap();
        let predicates = registry.predicate_ids().collect::<HashSet<_>>();
        assert_eq!(registry.len(), 13);
        assert_eq!(predicates.len(), 13);
        assert!(predicates.contains(&rdf::TYPE));
        assert!(predicates.contains(&geo::LAT));
        assert!(predicates.contains(&led::IMAGE_DATA));
    }

    #[test]
    fn standard_registry_hides_internal_predicates() {
        let registry = PropertyRegistry::standard().unwrap();
        assert_eq!(registry.len(), 17);
        assert!(registry.lookup(led::LAT_MIN).is_some());
        assert!(registry.lookup(BoxSide::Top.predicate()).is_none());
        assert!(registry
            .lookup_internal(BoxSide::Top.predicate())
            .is_some_and(|property| property.is_internal()));
        assert!(registry
            .predicate_ids()
            .all(|predicate| predicate != BoxSide::Bottom.predicate()));
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = PropertyRegistry::core().unwrap();
        let error = registry.register(Arc::new(BandProperty)).unwrap_err();
        assert_eq!(
            error,
            RegistryError::DuplicatePredicate(led::ETM_BAND.into_owned())
        );
        assert_eq!(registry.len(), 13);
    }
}
