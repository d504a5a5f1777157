use crate::cell::Cell;
use crate::dataset::Product;
use crate::error::{InvalidBandError, StorageError};
use crate::image::TileImage;
use dggs_graph_model::{ObservationMeta, OffsetDateTime};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// The two ways a cell's band can be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationKind {
    /// A single value summarizing the whole cell.
    Pointwise,
    /// A square image covering the cell.
    Areal,
}

/// An observation of one band of a [Cell].
///
/// An observation is a lightweight handle that borrows its cell. Its payload is only read from
/// the backing store when requested. Two observations are equal if they belong to the same cell,
/// observe the same band, and are of the same kind.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'cell> {
    cell: &'cell Cell,
    band: u32,
    kind: ObservationKind,
}

impl<'cell> Observation<'cell> {
    /// Creates a new observation, checking that `cell` has the given `band`.
    pub fn new(
        cell: &'cell Cell,
        band: u32,
        kind: ObservationKind,
    ) -> Result<Self, InvalidBandError> {
        if band >= cell.band_count() {
            return Err(InvalidBandError {
                band,
                band_count: cell.band_count(),
            });
        }
        Ok(Self::new_unchecked(cell, band, kind))
    }

    pub(crate) fn new_unchecked(cell: &'cell Cell, band: u32, kind: ObservationKind) -> Self {
        Self { cell, band, kind }
    }

    pub fn cell(&self) -> &'cell Cell {
        self.cell
    }

    pub fn band(&self) -> u32 {
        self.band
    }

    pub fn kind(&self) -> ObservationKind {
        self.kind
    }

    pub fn product(&self) -> &'cell Product {
        self.cell.capture().product()
    }

    /// The capture time of the dataset.
    pub fn timestamp(&self) -> OffsetDateTime {
        self.cell.capture().timestamp()
    }

    /// The hierarchy level of the cell.
    pub fn coarse_level(&self) -> u32 {
        self.cell.level()
    }

    /// The hierarchy level of the finest detail of this observation.
    ///
    /// Pointwise observations do not refine their cell. The pixels of a tile are as fine as the
    /// cells `round(log3(tile_size))` levels below.
    pub fn fine_level(&self) -> u32 {
        match self.kind {
            ObservationKind::Pointwise => self.coarse_level(),
            ObservationKind::Areal => self.coarse_level() + self.product().level_offset(),
        }
    }

    /// The number of pixels per degree.
    pub fn resolution(&self) -> f64 {
        let pixels = match self.kind {
            ObservationKind::Pointwise => 1.0,
            ObservationKind::Areal => f64::from(self.cell.tile_size()),
        };
        pixels / self.cell.degrees_spanned()
    }

    /// The identity of this observation.
    pub fn meta(&self) -> ObservationMeta {
        ObservationMeta {
            timestamp: self.timestamp(),
            cell_id: self.cell.id().to_owned(),
            coarse_level: self.coarse_level(),
            fine_level: self.fine_level(),
            band: self.band,
        }
    }

    /// The summary value of a pointwise observation.
    pub fn pixel_value(&self) -> Option<f64> {
        match self.kind {
            ObservationKind::Pointwise => self.cell.summary().get(self.band as usize).copied(),
            ObservationKind::Areal => None,
        }
    }

    /// The tile of an areal observation.
    ///
    /// The tile data of the cell is read from the backing store on first access.
    pub fn tile_image(&self) -> Result<Option<TileImage<'cell>>, StorageError> {
        if self.kind == ObservationKind::Pointwise {
            return Ok(None);
        }
        let tiles = self.cell.tiles()?;
        Ok(tiles.band(self.band as usize).map(|pixels| {
            TileImage::new(self.cell.tile_size(), pixels, self.cell.missing_value())
        }))
    }
}

impl PartialEq for Observation<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cell.id() == other.cell.id() && self.band == other.band && self.kind == other.kind
    }
}

impl Eq for Observation<'_> {}

impl Hash for Observation<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cell.id().hash(state);
        self.band.hash(state);
        self.kind.hash(state);
    }
}

impl Display for Observation<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            ObservationKind::Pointwise => "Pixel",
            ObservationKind::Areal => "Tile",
        };
        write!(f, "{kind} {} band {}", self.cell.id(), self.band)
    }
}
