#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
pub mod store;

pub mod model {
    pub use dggs_graph_model::*;
}

pub mod storage {
    pub use dggs_graph_storage::*;
}

pub mod engine {
    pub use dggs_graph_engine::*;
}
