//! An in-memory [BackingStore].
//!
//! The store is mainly used for tests and for small captures that have been exported into a JSON
//! snapshot. A snapshot has the following layout:
//!
//! ```json
//! {
//!   "groups": { "/R/7/8": { "attributes": { "centre": { "float_array": [149.07, -35.22] } } } },
//!   "arrays": { "/R/7/8/pixel": { "float64": { "shape": [1], "values": [4874.4] } } }
//! }
//! ```
//!
//! Groups that only exist as ancestors of other nodes do not have to be listed.

use crate::backing::{ArrayData, AttributeValue, BackingStore, ROOT_PATH};
use crate::error::{CorruptionError, StorageError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// A [BackingStore] that holds all nodes in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryBackingStore {
    #[serde(default)]
    groups: BTreeMap<String, MemoryGroup>,
    #[serde(default)]
    arrays: BTreeMap<String, ArrayData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct MemoryGroup {
    #[serde(default)]
    attributes: BTreeMap<String, AttributeValue>,
}

impl MemoryBackingStore {
    /// Creates an empty store that only contains the root group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON snapshot.
    pub fn from_json_str(json: &str) -> Result<Self, StorageError> {
        serde_json::from_str(json).map_err(|e| CorruptionError::new(e).into())
    }

    /// Reads a JSON snapshot from `reader`.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, StorageError> {
        serde_json::from_reader(reader).map_err(|e| CorruptionError::new(e).into())
    }

    /// Serializes the store into a JSON snapshot.
    pub fn to_json_string(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|e| StorageError::Other(Box::new(e)))
    }

    /// Creates the group at `path` if it does not exist yet.
    pub fn insert_group(&mut self, path: impl Into<String>) {
        self.groups.entry(normalize(path.into())).or_default();
    }

    /// Sets the attribute `name` of the group at `path`, creating the group if necessary.
    pub fn set_attribute(
        &mut self,
        path: impl Into<String>,
        name: impl Into<String>,
        value: AttributeValue,
    ) {
        self.groups
            .entry(normalize(path.into()))
            .or_default()
            .attributes
            .insert(name.into(), value);
    }

    /// Stores `data` as array at `path`, replacing any previous array.
    pub fn insert_array(&mut self, path: impl Into<String>, data: ArrayData) {
        self.arrays.insert(normalize(path.into()), data);
    }

    fn node_paths(&self) -> impl Iterator<Item = &String> {
        self.groups.keys().chain(self.arrays.keys())
    }
}

impl BackingStore for MemoryBackingStore {
    fn attribute(&self, path: &str, name: &str) -> Result<Option<AttributeValue>, StorageError> {
        Ok(self
            .groups
            .get(path)
            .and_then(|group| group.attributes.get(name))
            .cloned())
    }

    fn attribute_names(&self, path: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .groups
            .get(path)
            .map(|group| group.attributes.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn array(&self, path: &str) -> Result<Option<ArrayData>, StorageError> {
        let Some(array) = self.arrays.get(path) else {
            return Ok(None);
        };
        if array.expected_len() != array_len(array) {
            return Err(CorruptionError::msg(format!(
                "array at {path} has shape {:?} but {} elements",
                array.shape(),
                array_len(array)
            ))
            .into());
        }
        Ok(Some(array.clone()))
    }

    fn children(&self, path: &str) -> Result<Vec<String>, StorageError> {
        let prefix = descendant_prefix(path);
        Ok(self
            .node_paths()
            .filter_map(|node| node.strip_prefix(prefix.as_str()))
            .filter_map(|rest| rest.split('/').next())
            .filter(|name| !name.is_empty())
            .sorted()
            .dedup()
            .map(ToOwned::to_owned)
            .collect())
    }

    fn is_group(&self, path: &str) -> Result<bool, StorageError> {
        if path == ROOT_PATH || self.groups.contains_key(path) {
            return Ok(true);
        }
        let prefix = descendant_prefix(path);
        Ok(self.node_paths().any(|node| node.starts_with(prefix.as_str())))
    }
}

fn array_len(array: &ArrayData) -> usize {
    match array {
        ArrayData::Float64 { values, .. } => values.len(),
        ArrayData::Int16 { values, .. } => values.len(),
    }
}

fn descendant_prefix(path: &str) -> String {
    if path.ends_with('/') {
        path.to_owned()
    } else {
        format!("{path}/")
    }
}

fn normalize(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}
