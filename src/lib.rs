//! # Ladder Stats
//!
//! Aggregation and chart rendering core for ranked ladder statistics.
//!
//! ## Architecture
//!
//! - **models**: Layout metadata, raw snapshots, seasons and ranking records
//! - **stats**: Decoding, filtering and recursive aggregation of snapshots
//! - **fetch**: HTTP snapshot source and the single-flight mode store
//! - **context**: Explicit page context handed to charts
//! - **graph**: Coordinate units, drawing capability, axes and the chart driver
//! - **charts**: Race, league and population charts and summary tables
//! - **config**: Configuration loading and validation

pub mod charts;
pub mod config;
pub mod context;
pub mod fetch;
pub mod graph;
pub mod models;
pub mod stats;

pub use context::StatsContext;
pub use models::*;
