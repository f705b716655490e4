//! Store access for the social feed.
//!
//! This crate owns everything between the query layer and the MongoDB
//! driver:
//!
//! - [`StoreConfig`] -- an explicit configuration value (URI, database,
//!   collection names, timeout). There is no global state; the caller
//!   constructs one and hands it to [`Store::connect`].
//! - [`Store`] -- a connected handle: typed collection accessors plus
//!   generic `find`/`aggregate` execution that drains cursors into vectors.
//! - [`Filter`] and [`Stage`] -- strongly-typed builders for query filters
//!   and aggregation pipeline stages. Query shapes are composed from tagged
//!   variants and rendered to BSON documents only at dispatch time, so a
//!   malformed stage is a compile error rather than a runtime surprise.
//!
//! # Design Rules
//!
//! 1. One connection per process run: connect, run one operation, close.
//! 2. Every store failure is propagated; partial results are never
//!    returned (a decode failure mid-cursor aborts the whole operation).
//! 3. Cursors are drained or dropped before any call returns, on success
//!    and error paths alike.
//! 4. No retries: a timeout or server rejection is a final answer.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod stage;

// Re-export primary types at crate root for ergonomic imports.
pub use client::Store;
pub use config::{CollectionNames, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use filter::Filter;
pub use stage::{ProjectExpr, Stage};
