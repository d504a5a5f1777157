#![doc(test(attr(deny(warnings))))]

//! Contains the storage layer of DGGS Graph.
//!
//! A [Dataset] is opened from a [BackingStore], a read-only hierarchy of nodes that carry
//! attributes and arrays. Every node that carries a summary pixel record becomes a [Cell] of the
//! discrete global grid. Cells are indexed by their identifier and by their hierarchy level and
//! expose their data as [Observation]s.

mod backing;
mod cell;
mod dataset;
mod error;
mod image;
pub mod memory;
mod observation;

pub use backing::*;
pub use cell::*;
pub use dataset::*;
pub use error::*;
pub use image::TileImage;
pub use observation::*;
