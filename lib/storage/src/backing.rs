use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The path of the root node of every [BackingStore].
pub const ROOT_PATH: &str = "/";

/// Read access to a hierarchical store of attributes and arrays.
///
/// Paths are absolute and use `/` as separator, the root is [ROOT_PATH]. This is the only
/// capability the cell index needs from the underlying storage format. The store is read-only and
/// must not change while a dataset is open on it.
pub trait BackingStore: Debug + Send + Sync {
    /// Reads the attribute `name` of the node at `path`.
    ///
    /// Returns `None` if either the node or the attribute does not exist.
    fn attribute(&self, path: &str, name: &str) -> Result<Option<AttributeValue>, StorageError>;

    /// Returns the names of all attributes of the node at `path`.
    fn attribute_names(&self, path: &str) -> Result<Vec<String>, StorageError>;

    /// Reads the array stored at `path`.
    ///
    /// Returns `None` if there is no array at `path`.
    fn array(&self, path: &str) -> Result<Option<ArrayData>, StorageError>;

    /// Lists the names (not the paths) of the direct children of the node at `path`.
    fn children(&self, path: &str) -> Result<Vec<String>, StorageError>;

    /// Returns whether the node at `path` is a group, i.e., a node that can have children.
    fn is_group(&self, path: &str) -> Result<bool, StorageError>;
}

/// Joins a node path and the name of one of its children.
pub fn child_path(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// A scalar or small array attribute of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    /// Text, e.g. the capture time or the product code.
    String(String),
    /// Counts such as the number of bands.
    Integer(i64),
    Float(f64),
    /// A coordinate pair, e.g. the centre of a cell.
    FloatArray(Vec<f64>),
    /// Rows of coordinate pairs, e.g. the corners of a cell.
    FloatMatrix(Vec<Vec<f64>>),
}

impl AttributeValue {
    /// Returns the value if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value if it is an integer. Floats are not truncated.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as floating point number. Integers are converted.
    #[allow(clippy::cast_precision_loss, reason = "Attributes hold small integers")]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Returns the elements of a one-dimensional attribute.
    pub fn as_float_array(&self) -> Option<&[f64]> {
        match self {
            Self::FloatArray(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the rows of a two-dimensional attribute.
    pub fn as_float_matrix(&self) -> Option<&[Vec<f64>]> {
        match self {
            Self::FloatMatrix(rows) => Some(rows),
            _ => None,
        }
    }
}

/// A dense, row-major array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayData {
    /// Summary pixel values, one per band.
    Float64 { shape: Vec<usize>, values: Vec<f64> },
    /// Raw tile samples shaped `[bands, tile, tile]`.
    Int16 { shape: Vec<usize>, values: Vec<i16> },
}

impl ArrayData {
    /// Returns the extent of each dimension.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Float64 { shape, .. } | Self::Int16 { shape, .. } => shape,
        }
    }

    /// Returns the number of elements implied by the shape.
    pub fn expected_len(&self) -> usize {
        self.shape().iter().product()
    }

    /// Returns the elements of a floating point array.
    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            Self::Float64 { values, .. } => Some(values),
            Self::Int16 { .. } => None,
        }
    }

    /// Converts the array into its elements if it is a 16-bit integer array.
    pub fn into_i16(self) -> Option<Vec<i16>> {
        match self {
            Self::Int16 { values, .. } => Some(values),
            Self::Float64 { .. } => None,
        }
    }
}
