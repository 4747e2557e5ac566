//! Filtered sums and multi-level aggregates.

use std::collections::HashMap;

use crate::models::{Dimension, RawSnapshot, StatId, StatLayout, DATA_SIZE};

use super::{decode, ResolvedFilter};

/// Elementwise sum of count, wins, losses and points.
pub type Sum = [f64; DATA_SIZE];

/// One level of an aggregate.
///
/// A branch is keyed by ids of one group-by dimension and carries the sum of
/// its children as `total`, so every level has a total.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateNode {
    Leaf(Sum),
    Branch {
        children: HashMap<StatId, AggregateNode>,
        total: Sum,
    },
}

impl AggregateNode {
    /// Sum across everything below this node.
    pub fn total(&self) -> &Sum {
        match self {
            AggregateNode::Leaf(sum) => sum,
            AggregateNode::Branch { total, .. } => total,
        }
    }

    pub fn child(&self, id: StatId) -> Option<&AggregateNode> {
        match self {
            AggregateNode::Leaf(_) => None,
            AggregateNode::Branch { children, .. } => children.get(&id),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, AggregateNode::Leaf(_))
    }
}

fn accumulate(sum: &mut Sum, cell: &[f64]) {
    for (acc, value) in sum.iter_mut().zip(cell) {
        *acc += value;
    }
}

/// Sum every cell in the cartesian product of the filter's id lists.
pub fn filter_sum(layout: &StatLayout, raw: &RawSnapshot, filter: &ResolvedFilter) -> Sum {
    let mut sum = [0.0; DATA_SIZE];
    for &version in &filter.versions {
        for &region in &filter.regions {
            for &league in &filter.leagues {
                for &race in &filter.races {
                    accumulate(&mut sum, decode(layout, raw, version, region, league, race));
                }
            }
        }
    }
    sum
}

/// Break the filtered data out by `group_by`, first dimension outermost.
///
/// Each level is keyed by the ids of its dimension in filter order and
/// carries a total over those ids. An empty group by returns the plain sum.
pub fn aggregate(
    layout: &StatLayout,
    raw: &RawSnapshot,
    filter: &ResolvedFilter,
    group_by: &[Dimension],
) -> AggregateNode {
    let Some((&head, rest)) = group_by.split_first() else {
        return AggregateNode::Leaf(filter_sum(layout, raw, filter));
    };

    let mut children = HashMap::new();
    let mut total = [0.0; DATA_SIZE];

    for &id in filter.ids(head) {
        let next = aggregate(layout, raw, &filter.narrowed(head, id), rest);
        accumulate(&mut total, next.total());
        children.insert(id, next);
    }

    AggregateNode::Branch { children, total }
}
