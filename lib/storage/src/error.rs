use std::error::Error;
use std::io;

/// Failure to open a dataset or to read one of its nodes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The snapshot or container file could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A node, attribute or array does not have the layout of a DGGS capture.
    #[error(transparent)]
    Corruption(#[from] CorruptionError),
    /// A failure reported by a [BackingStore](crate::backing::BackingStore) implementation.
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl From<StorageError> for io::Error {
    #[inline]
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Io(error) => error,
            StorageError::Corruption(error) => error.into(),
            StorageError::Other(error) => Self::other(error),
        }
    }
}

/// A capture whose hierarchy breaks the expected layout, e.g. a cell without bounds or a tile
/// array of the wrong shape.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct CorruptionError(#[from] CorruptionErrorKind);

#[derive(Debug, thiserror::Error)]
enum CorruptionErrorKind {
    #[error("{0}")]
    Msg(String),
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl CorruptionError {
    /// Wraps the error of a decoder, e.g. an unparsable capture time.
    #[inline]
    pub fn new(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self(CorruptionErrorKind::Other(error.into()))
    }

    /// Describes the offending node in `msg`.
    #[inline]
    pub fn msg(msg: impl Into<String>) -> Self {
        Self(CorruptionErrorKind::Msg(msg.into()))
    }
}

impl From<CorruptionError> for io::Error {
    #[inline]
    fn from(error: CorruptionError) -> Self {
        Self::new(io::ErrorKind::InvalidData, error)
    }
}

/// Returned when an observation is requested for a band the cell does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("band {band} is out of range, the cell has {band_count} bands")]
pub struct InvalidBandError {
    /// The requested band.
    pub band: u32,
    /// The number of bands of the cell.
    pub band_count: u32,
}
