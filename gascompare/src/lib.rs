//! Measurement-aggregation pipeline comparing the on-chain gas cost of two
//! competing file-sharing protocols, split between the client and the
//! network-side service (DPCN). Raw JSON logs go through loading, key
//! normalization, joining, reduction and z-score normalization into one
//! labeled comparison table; the `measurements` binary renders it.

pub mod chain;
pub mod config;
pub mod data_structures;
pub mod dataset;
pub mod error;
pub mod keys;
pub mod loader;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod reduce;

pub use error::{PipelineError, Result};
