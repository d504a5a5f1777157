use crate::backing::{child_path, BackingStore};
use crate::dataset::Capture;
use crate::error::{CorruptionError, InvalidBandError, StorageError};
use crate::observation::{Observation, ObservationKind};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// Name of the array holding the per-band summary values of a cell. Its presence marks a node as
/// a cell.
pub const SUMMARY_ARRAY: &str = "pixel";
/// Name of the array holding the per-band tiles of a cell.
pub const TILE_ARRAY: &str = "data";

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

/// The axis-aligned extent of a cell's boundary in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Extent {
    fn of(points: &[GeoPoint]) -> Self {
        let mut extent = Self {
            lat_min: f64::INFINITY,
            lat_max: f64::NEG_INFINITY,
            lon_min: f64::INFINITY,
            lon_max: f64::NEG_INFINITY,
        };
        for point in points {
            extent.lat_min = extent.lat_min.min(point.lat);
            extent.lat_max = extent.lat_max.max(point.lat);
            extent.lon_min = extent.lon_min.min(point.lon);
            extent.lon_max = extent.lon_max.max(point.lon);
        }
        extent
    }
}

/// Optional bounds a cell's [Extent] has to lie within.
///
/// An unset bound does not restrict anything.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    /// The cell's southern edge must be north of (or at) this latitude.
    pub lat_min: Option<f64>,
    /// The cell's northern edge must be south of (or at) this latitude.
    pub lat_max: Option<f64>,
    /// The cell's western edge must be east of (or at) this longitude.
    pub lon_min: Option<f64>,
    /// The cell's eastern edge must be west of (or at) this longitude.
    pub lon_max: Option<f64>,
}

impl BoundingBox {
    /// Returns whether no bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.lat_min.is_none()
            && self.lat_max.is_none()
            && self.lon_min.is_none()
            && self.lon_max.is_none()
    }

    /// Returns whether `extent` lies within every set bound.
    pub fn contains(&self, extent: &Extent) -> bool {
        self.lat_min.is_none_or(|v| extent.lat_min >= v)
            && self.lat_max.is_none_or(|v| extent.lat_max <= v)
            && self.lon_min.is_none_or(|v| extent.lon_min >= v)
            && self.lon_max.is_none_or(|v| extent.lon_max <= v)
    }
}

/// The per-band tiles of a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileData {
    size: usize,
    values: Vec<i16>,
}

impl TileData {
    /// Returns the row-major pixels of `band`.
    pub fn band(&self, band: usize) -> Option<&[i16]> {
        let len = self.size * self.size;
        self.values.get(band * len..(band + 1) * len)
    }
}

/// A cell of the discrete global grid that carries observation data.
///
/// The identifier of a cell encodes one refinement step per character, so its length is the
/// hierarchy level. Cells are equal if their identifiers are equal.
#[derive(Debug)]
pub struct Cell {
    id: String,
    path: String,
    summary: Vec<f64>,
    centre: GeoPoint,
    boundary: Vec<GeoPoint>,
    extent: Extent,
    missing_value: i16,
    capture: Arc<Capture>,
    store: Arc<dyn BackingStore>,
    tile: OnceLock<TileData>,
}

impl Cell {
    /// Tries to read a cell from the node at `path`.
    ///
    /// Returns `None` if the node does not carry a summary record and is therefore not a cell.
    pub(crate) fn read(
        store: &Arc<dyn BackingStore>,
        path: &str,
        capture: &Arc<Capture>,
    ) -> Result<Option<Self>, StorageError> {
        let Some(summary) = store.array(&child_path(path, SUMMARY_ARRAY))? else {
            return Ok(None);
        };
        let id = path.replace('/', "");
        let corrupt = |what: &str| CorruptionError::msg(format!("cell {id}: {what}"));

        let summary = summary
            .as_f64()
            .ok_or_else(|| corrupt("summary record must hold floating point values"))?
            .to_vec();

        let centre = store
            .attribute(path, "centre")?
            .ok_or_else(|| corrupt("missing centre"))?;
        let centre = match centre.as_float_array() {
            Some(&[lon, lat]) => GeoPoint { lon, lat },
            _ => return Err(corrupt("centre must be a [lon, lat] pair").into()),
        };

        let bounds = store
            .attribute(path, "bounds")?
            .ok_or_else(|| corrupt("missing bounds"))?;
        let boundary = bounds
            .as_float_matrix()
            .ok_or_else(|| corrupt("bounds must be a matrix"))?
            .iter()
            .map(|row| match row.as_slice() {
                &[lon, lat] => Ok(GeoPoint { lon, lat }),
                _ => Err(corrupt("bounds must consist of [lon, lat] pairs")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if boundary.is_empty() {
            return Err(corrupt("bounds must not be empty").into());
        }

        let missing_value = match store.attribute(path, "missing_value")? {
            None => 0,
            Some(value) => value
                .as_integer()
                .and_then(|v| i16::try_from(v).ok())
                .ok_or_else(|| corrupt("missing_value must be a 16-bit integer"))?,
        };

        Ok(Some(Self {
            extent: Extent::of(&boundary),
            id,
            path: path.to_owned(),
            summary,
            centre,
            boundary,
            missing_value,
            capture: Arc::clone(capture),
            store: Arc::clone(store),
            tile: OnceLock::new(),
        }))
    }

    /// The identifier of the cell, e.g., `R7852`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The hierarchy level, i.e., the length of the identifier.
    #[allow(clippy::cast_possible_truncation, reason = "Identifiers are short")]
    pub fn level(&self) -> u32 {
        self.id.chars().count() as u32
    }

    #[allow(clippy::cast_possible_truncation, reason = "There are only a few bands")]
    pub fn band_count(&self) -> u32 {
        self.summary.len() as u32
    }

    /// The summary values, one per band.
    pub fn summary(&self) -> &[f64] {
        &self.summary
    }

    pub fn centre(&self) -> GeoPoint {
        self.centre
    }

    /// The boundary ring in the order stored in the backing store.
    pub fn boundary(&self) -> &[GeoPoint] {
        &self.boundary
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    /// The approximate angular size of the cell, the mean of its latitude and longitude span.
    pub fn degrees_spanned(&self) -> f64 {
        ((self.extent.lat_max - self.extent.lat_min) + (self.extent.lon_max - self.extent.lon_min))
            / 2.0
    }

    /// The number of pixels along one edge of a tile.
    pub fn tile_size(&self) -> u32 {
        self.capture.product().tile_size()
    }

    /// The tile value that marks invalid pixels.
    pub fn missing_value(&self) -> i16 {
        self.missing_value
    }

    /// The capture the cell belongs to.
    pub fn capture(&self) -> &Capture {
        &self.capture
    }

    /// Returns the tiles of the cell, reading them from the backing store on first access.
    pub fn tiles(&self) -> Result<&TileData, StorageError> {
        if let Some(tile) = self.tile.get() {
            return Ok(tile);
        }
        let tile = self.read_tiles()?;
        Ok(self.tile.get_or_init(|| tile))
    }

    fn read_tiles(&self) -> Result<TileData, StorageError> {
        let path = child_path(&self.path, TILE_ARRAY);
        let corrupt = |what: String| CorruptionError::msg(format!("cell {}: {what}", self.id));

        let array = self
            .store
            .array(&path)?
            .ok_or_else(|| corrupt("missing tile data".to_owned()))?;
        let size = self.tile_size() as usize;
        let expected = [self.summary.len(), size, size];
        if array.shape() != expected {
            return Err(corrupt(format!(
                "tile data has shape {:?}, expected {expected:?}",
                array.shape()
            ))
            .into());
        }
        let values = array
            .into_i16()
            .ok_or_else(|| corrupt("tile data must hold 16-bit integers".to_owned()))?;
        tracing::trace!(cell = %self.id, "Read tile data");
        Ok(TileData { size, values })
    }

    /// Enumerates the observations of this cell.
    ///
    /// If `band` is given, only observations of that band are produced. A band the cell does not
    /// have yields nothing. If `kind` is given, only observations of that kind are produced.
    /// Areal observations come before pointwise observations.
    pub fn observations(
        &self,
        band: Option<u32>,
        kind: Option<ObservationKind>,
    ) -> impl Iterator<Item = Observation<'_>> + '_ {
        let bands = match band {
            None => 0..self.band_count(),
            Some(band) if band < self.band_count() => band..band + 1,
            Some(_) => 0..0,
        };
        let kinds: &'static [ObservationKind] = match kind {
            None => &[ObservationKind::Areal, ObservationKind::Pointwise],
            Some(ObservationKind::Areal) => &[ObservationKind::Areal],
            Some(ObservationKind::Pointwise) => &[ObservationKind::Pointwise],
        };
        kinds.iter().flat_map(move |&kind| {
            bands
                .clone()
                .map(move |band| Observation::new_unchecked(self, band, kind))
        })
    }

    /// Returns the pointwise observation of `band`.
    pub fn pointwise_observation(&self, band: u32) -> Result<Observation<'_>, InvalidBandError> {
        Observation::new(self, band, ObservationKind::Pointwise)
    }

    /// Returns the areal observation of `band`.
    pub fn areal_observation(&self, band: u32) -> Result<Observation<'_>, InvalidBandError> {
        Observation::new(self, band, ObservationKind::Areal)
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell {}", self.id)
    }
}
