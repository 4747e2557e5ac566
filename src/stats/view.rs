//! Read-only access to an aggregate by id path.

use crate::models::{Dimension, StatId};

use super::{AggregateNode, Field, ResolvedFilter, StatsError};

/// An aggregate together with the filter and group by that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    filter: ResolvedFilter,
    group_by: Vec<Dimension>,
    root: AggregateNode,
}

impl Aggregate {
    pub fn new(filter: ResolvedFilter, group_by: Vec<Dimension>, root: AggregateNode) -> Self {
        Self {
            filter,
            group_by,
            root,
        }
    }

    /// Value of `field` at `path`, a prefix of the group by ids.
    ///
    /// A short path reads the total across the remaining levels, so an empty
    /// path is the grand total.
    pub fn get(&self, field: Field, path: &[StatId]) -> Result<f64, StatsError> {
        if path.len() > self.group_by.len() {
            return Err(StatsError::PathTooLong {
                len: path.len(),
                depth: self.group_by.len(),
            });
        }

        let mut node = &self.root;
        for (&id, &dimension) in path.iter().zip(&self.group_by) {
            node = node
                .child(id)
                .ok_or(StatsError::UnknownId { dimension, id })?;
        }
        Ok(node.total()[field.index()])
    }

    pub fn count(&self, path: &[StatId]) -> Result<f64, StatsError> {
        self.get(Field::Count, path)
    }

    pub fn wins(&self, path: &[StatId]) -> Result<f64, StatsError> {
        self.get(Field::Wins, path)
    }

    pub fn losses(&self, path: &[StatId]) -> Result<f64, StatsError> {
        self.get(Field::Losses, path)
    }

    /// Ids the aggregate was filtered to in one dimension, in filter order.
    pub fn ids(&self, dimension: Dimension) -> &[StatId] {
        self.filter.ids(dimension)
    }

    pub fn filter(&self) -> &ResolvedFilter {
        &self.filter
    }

    pub fn group_by(&self) -> &[Dimension] {
        &self.group_by
    }

    pub fn root(&self) -> &AggregateNode {
        &self.root
    }
}
