use crate::backing::{child_path, AttributeValue, BackingStore, ROOT_PATH};
use crate::cell::{BoundingBox, Cell};
use crate::error::{CorruptionError, StorageError};
use crate::observation::{Observation, ObservationKind};
use dggs_graph_model::OffsetDateTime;
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::UtcOffset;

/// The group below which the products of a capture are described.
pub const PRODUCTS_PATH: &str = "/products";

/// A named data layer of a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    name: String,
    band_count: u32,
    tile_size: u32,
    metadata: BTreeMap<String, String>,
}

impl Product {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn band_count(&self) -> u32 {
        self.band_count
    }

    /// The number of pixels along one edge of a tile.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Free-form textual attributes describing the product.
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// The number of hierarchy levels between a cell and the pixels of its tile.
    ///
    /// Every level refines a cell into a 3x3 grid, hence the offset is `round(log3(tile_size))`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "The tile size is small and positive"
    )]
    pub fn level_offset(&self) -> u32 {
        (f64::from(self.tile_size).ln() / 3_f64.ln()).round() as u32
    }
}

/// What was captured and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    product: Product,
    satellite_id: String,
    sensor_id: String,
    timestamp: OffsetDateTime,
}

impl Capture {
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn satellite_id(&self) -> &str {
        &self.satellite_id
    }

    pub fn sensor_id(&self) -> &str {
        &self.sensor_id
    }

    /// The capture time in UTC.
    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }
}

/// A read-only capture and the index of all its cells.
///
/// The index is built eagerly when opening the dataset. Payloads are only read when they are
/// requested through an [Observation].
#[derive(Debug)]
pub struct Dataset {
    capture: Arc<Capture>,
    cells: Vec<Cell>,
    by_id: FxHashMap<String, usize>,
    by_level: BTreeMap<u32, Vec<usize>>,
}

impl Dataset {
    /// Opens the capture stored in `store` and indexes its cells.
    ///
    /// The hierarchy is traversed breadth-first from the root. Every node carrying a summary
    /// record is registered as cell. The children of every group are visited, whether the group
    /// is a cell or not.
    pub fn open(store: Arc<dyn BackingStore>) -> Result<Self, StorageError> {
        let capture = Arc::new(read_capture(store.as_ref())?);

        let mut dataset = Self {
            capture,
            cells: Vec::new(),
            by_id: FxHashMap::default(),
            by_level: BTreeMap::new(),
        };

        let mut queue = VecDeque::from([ROOT_PATH.to_owned()]);
        while let Some(path) = queue.pop_front() {
            if let Some(cell) = Cell::read(&store, &path, &dataset.capture)? {
                dataset.register(cell);
            }
            for child in store.children(&path)? {
                let child = child_path(&path, &child);
                if store.is_group(&child)? {
                    queue.push_back(child);
                }
            }
        }

        tracing::info!(
            product = dataset.capture.product.name(),
            cells = dataset.cells.len(),
            "Opened dataset"
        );
        Ok(dataset)
    }

    fn register(&mut self, cell: Cell) {
        if self.by_id.contains_key(cell.id()) {
            tracing::warn!(cell = cell.id(), "Ignoring duplicate cell");
            return;
        }
        tracing::trace!(cell = cell.id(), "Registered cell");
        let index = self.cells.len();
        self.by_id.insert(cell.id().to_owned(), index);
        self.by_level.entry(cell.level()).or_default().push(index);
        self.cells.push(cell);
    }

    /// Releases the dataset and its handle on the backing store.
    pub fn close(self) {
        tracing::debug!(product = self.capture.product.name(), "Closed dataset");
    }

    pub fn capture(&self) -> &Capture {
        &self.capture
    }

    pub fn product(&self) -> &Product {
        &self.capture.product
    }

    /// The number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Looks up a cell by its identifier.
    pub fn cell(&self, id: &str) -> Option<&Cell> {
        self.by_id.get(id).and_then(|&index| self.cells.get(index))
    }

    /// Returns the cells of a hierarchy level.
    pub fn cells_by_level(&self, level: u32) -> impl Iterator<Item = &Cell> + '_ {
        self.by_level
            .get(&level)
            .into_iter()
            .flatten()
            .filter_map(|&index| self.cells.get(index))
    }

    /// Returns all cells, ordered by their hierarchy level.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.by_level
            .values()
            .flatten()
            .filter_map(|&index| self.cells.get(index))
    }

    /// Returns all observations of all cells.
    pub fn observations(&self) -> impl Iterator<Item = Observation<'_>> + '_ {
        self.cells().flat_map(|cell| cell.observations(None, None))
    }

    /// Selects cells by identifier, level, and extent.
    ///
    /// If `id` is given, only that cell is a candidate, and only if `level` is unset or matches
    /// its level. Otherwise, the cells of `level` are candidates, or all cells if `level` is unset.
    /// Candidates that do not lie within `bbox` are dropped.
    pub fn select_cells(
        &self,
        level: Option<u32>,
        id: Option<&str>,
        bbox: BoundingBox,
    ) -> Box<dyn Iterator<Item = &Cell> + '_> {
        let candidates: Box<dyn Iterator<Item = &Cell> + '_> = match (id, level) {
            (Some(id), level) => Box::new(
                self.cell(id)
                    .filter(|cell| level.is_none_or(|level| cell.level() == level))
                    .into_iter(),
            ),
            (None, Some(level)) => Box::new(self.cells_by_level(level)),
            (None, None) => Box::new(self.cells()),
        };
        if bbox.is_unbounded() {
            candidates
        } else {
            Box::new(candidates.filter(move |cell| bbox.contains(cell.extent())))
        }
    }

    /// Looks up the observation of `kind` for `band` of the cell `cell_id`.
    pub fn observation(
        &self,
        cell_id: &str,
        band: u32,
        kind: ObservationKind,
    ) -> Option<Observation<'_>> {
        self.cell(cell_id)
            .and_then(|cell| Observation::new(cell, band, kind).ok())
    }
}

fn read_capture(store: &dyn BackingStore) -> Result<Capture, StorageError> {
    let string_attribute = |name: &str| -> Result<Option<String>, StorageError> {
        match store.attribute(ROOT_PATH, name)? {
            None => Ok(None),
            Some(AttributeValue::String(value)) => Ok(Some(value)),
            Some(_) => Err(CorruptionError::msg(format!("attribute {name} must be a string")).into()),
        }
    };

    let timestamp = string_attribute("datetime")?
        .ok_or_else(|| CorruptionError::msg("missing capture datetime"))?;
    // Observation identifiers carry whole seconds only.
    let timestamp = OffsetDateTime::parse(&timestamp, &Rfc3339)
        .map_err(CorruptionError::new)?
        .to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .map_err(CorruptionError::new)?;
    let product_name =
        string_attribute("prod_code")?.ok_or_else(|| CorruptionError::msg("missing prod_code"))?;

    Ok(Capture {
        product: read_product(store, product_name)?,
        satellite_id: string_attribute("sat_id")?.unwrap_or_default(),
        sensor_id: string_attribute("sensor_id")?.unwrap_or_default(),
        timestamp,
    })
}

fn read_product(store: &dyn BackingStore, name: String) -> Result<Product, StorageError> {
    let path = child_path(PRODUCTS_PATH, &name);
    let count = |attribute: &str| -> Result<u32, StorageError> {
        store
            .attribute(&path, attribute)?
            .and_then(|value| value.as_integer())
            .and_then(|value| u32::try_from(value).ok())
            .ok_or_else(|| {
                CorruptionError::msg(format!("product {name} needs a valid {attribute}")).into()
            })
    };

    let band_count = count("numbands")?;
    let tile_size = count("tilesize")?;
    if tile_size < 2 {
        return Err(CorruptionError::msg(format!(
            "product {name} has tile size {tile_size}, at least 2 is required"
        ))
        .into());
    }

    let mut metadata = BTreeMap::new();
    for attribute in store.attribute_names(&path)? {
        if let Some(AttributeValue::String(value)) = store.attribute(&path, &attribute)? {
            metadata.insert(attribute, value);
        }
    }

    Ok(Product {
        name,
        band_count,
        tile_size,
        metadata,
    })
}
