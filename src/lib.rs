//! # HNSW vector-cache prefiller
//!
//! This crate implements one subsystem of a larger vector-search database:
//! the routine that warms an in-memory vector cache by walking an HNSW
//! graph's layers top-down. Everything else the real database does —
//! schema, gRPC, the HNSW build/search algorithms, batch writes — is out
//! of scope and consumed here only through two small traits:
//!
//! - [`graph::GraphView`]: a read-only window onto the node table.
//! - [`cache::VectorCache`]: a cache that admits a vector on `load`.
//!
//! ## Architecture
//!
//! - `graph`: the node table contract and a sharded-lock reference implementation
//! - `cache`: the cache contract and a `moka`-backed reference implementation
//! - `prefill`: the top-down traversal driver
//! - `context`: cooperative cancellation for a prefill call
//! - `config`: tunable knobs shared across the above
//! - `error`: the error types the graph/cache contracts can surface

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod prefill;

pub use cache::{VectorCache, VectorSource};
pub use config::PrefillConfig;
pub use context::PrefillContext;
pub use error::{CacheError, GraphError};
pub use graph::{GraphView, NodeDescriptor, VectorId};
pub use prefill::{prefill, prefill_using_config, prefill_with_config};

/// Crate version, for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
