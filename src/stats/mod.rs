//! Statistics aggregation engine.
//!
//! Decodes the flat numeric array of a raw snapshot into filtered,
//! multi-level aggregates:
//! - `decode`: offset computation and cell extraction for one coordinate
//! - `filter`: per-dimension id whitelists
//! - `aggregate`: recursive sums with a total at every level
//! - `view`: read-only accessors by partial or full id path
//! - `mode`: ordered snapshot collections for one mode

mod aggregate;
mod decode;
mod filter;
mod mode;
mod view;

pub use aggregate::*;
pub use decode::*;
pub use filter::*;
pub use mode::*;
pub use view::*;

use thiserror::Error;

use crate::models::{Dimension, StatId, COUNT_INDEX, LOSSES_INDEX, POINTS_INDEX, WINS_INDEX};

/// Errors raised while validating snapshots or reading aggregates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("No layout for stat version {0}")]
    UnknownStatVersion(u32),

    #[error("Snapshot {id} has {actual} numbers, layout expects {expected}")]
    DataLength {
        id: i64,
        expected: usize,
        actual: usize,
    },

    #[error("Id {id} is not in the {dimension} filter")]
    UnknownId { dimension: Dimension, id: StatId },

    #[error("Path of length {len} is deeper than group by of length {depth}")]
    PathTooLong { len: usize, depth: usize },

    #[error("No snapshots available")]
    EmptyCollection,
}

/// A numeric field of a stat cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Count,
    Wins,
    Losses,
    Points,
}

impl Field {
    pub fn index(&self) -> usize {
        match self {
            Field::Count => COUNT_INDEX,
            Field::Wins => WINS_INDEX,
            Field::Losses => LOSSES_INDEX,
            Field::Points => POINTS_INDEX,
        }
    }
}
