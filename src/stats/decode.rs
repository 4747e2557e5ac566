//! Addressing of single cells in a raw snapshot.

use crate::models::{RawSnapshot, StatId, StatLayout};

use super::{aggregate, filter_sum, Aggregate, Dimension, Filter, StatsError, Sum};

/// Offset of the first number of the (version, region, league, race) cell.
///
/// Ids must exist in the layout; an unknown id panics.
#[inline]
pub fn offset(
    layout: &StatLayout,
    version: StatId,
    region: StatId,
    league: StatId,
    race: StatId,
) -> usize {
    layout.data_size
        * (layout.version_indices[&version]
            * layout.region_count
            * layout.league_count
            * layout.race_count
            + layout.region_indices[&region] * layout.league_count * layout.race_count
            + layout.league_indices[&league] * layout.race_count
            + layout.race_indices[&race])
}

/// The `data_size` numbers of one cell: count, wins, losses, points.
#[inline]
pub fn decode<'a>(
    layout: &StatLayout,
    raw: &'a RawSnapshot,
    version: StatId,
    region: StatId,
    league: StatId,
    race: StatId,
) -> &'a [f64] {
    let start = offset(layout, version, region, league, race);
    &raw.data[start..start + layout.data_size]
}

/// Check that a snapshot's flat array matches its layout.
pub fn validate(layout: &StatLayout, raw: &RawSnapshot) -> Result<(), StatsError> {
    let expected = layout.data_len();
    if raw.data.len() != expected {
        return Err(StatsError::DataLength {
            id: raw.id,
            expected,
            actual: raw.data.len(),
        });
    }
    Ok(())
}

/// One raw snapshot paired with the layout of its stat version.
#[derive(Debug, Clone, Copy)]
pub struct Stat<'a> {
    layout: &'a StatLayout,
    raw: &'a RawSnapshot,
}

impl<'a> Stat<'a> {
    pub fn new(layout: &'a StatLayout, raw: &'a RawSnapshot) -> Self {
        Self { layout, raw }
    }

    pub fn raw(&self) -> &'a RawSnapshot {
        self.raw
    }

    pub fn layout(&self) -> &'a StatLayout {
        self.layout
    }

    pub fn id(&self) -> i64 {
        self.raw.id
    }

    pub fn season_id(&self) -> i32 {
        self.raw.season_id
    }

    pub fn season_version(&self) -> StatId {
        self.raw.season_version
    }

    pub fn data_time(&self) -> i64 {
        self.raw.data_time
    }

    pub fn get(&self, version: StatId, region: StatId, league: StatId, race: StatId) -> &'a [f64] {
        decode(self.layout, self.raw, version, region, league, race)
    }

    /// Sum of every cell selected by the filter.
    pub fn filter_sum(&self, filter: &Filter) -> Sum {
        filter_sum(self.layout, self.raw, &filter.resolve(self.layout))
    }

    /// Aggregate broken out by `group_by`, in nesting order.
    pub fn filter_aggregate(&self, filter: &Filter, group_by: &[Dimension]) -> Aggregate {
        let resolved = filter.resolve(self.layout);
        let root = aggregate(self.layout, self.raw, &resolved, group_by);
        Aggregate::new(resolved, group_by.to_vec(), root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> StatLayout {
        StatLayout::from_ids(4, vec![0, 1], vec![0, 1, 2], vec![0, 1], vec![-1, 0, 1])
    }

    fn raw(layout: &StatLayout) -> RawSnapshot {
        RawSnapshot {
            id: 1,
            mode_id: 11,
            season_id: 28,
            season_version: 1,
            stat_version: 1,
            data_time: 1000,
            data: (0..layout.data_len()).map(|i| i as f64).collect(),
        }
    }

    #[test]
    fn test_offset_row_major() {
        let layout = layout();

        assert_eq!(offset(&layout, 0, 0, 0, -1), 0);
        assert_eq!(offset(&layout, 0, 0, 0, 0), 4);
        assert_eq!(offset(&layout, 0, 0, 1, -1), 4 * 3);
        assert_eq!(offset(&layout, 0, 1, 0, -1), 4 * 2 * 3);
        assert_eq!(offset(&layout, 1, 0, 0, -1), 4 * 3 * 2 * 3);
        assert_eq!(offset(&layout, 1, 2, 1, 1), layout.data_len() - 4);
    }

    #[test]
    fn test_decode_slice() {
        let layout = layout();
        let raw = raw(&layout);

        assert_eq!(decode(&layout, &raw, 0, 0, 0, 0), &[4.0, 5.0, 6.0, 7.0]);
        let stat = Stat::new(&layout, &raw);
        assert_eq!(stat.get(1, 2, 1, 1), &[140.0, 141.0, 142.0, 143.0]);
    }

    #[test]
    #[should_panic]
    fn test_decode_unknown_id_panics() {
        let layout = layout();
        let raw = raw(&layout);
        decode(&layout, &raw, 7, 0, 0, 0);
    }

    #[test]
    fn test_validate_data_length() {
        let layout = layout();
        let mut raw = raw(&layout);
        assert!(validate(&layout, &raw).is_ok());

        raw.data.pop();
        assert_eq!(
            validate(&layout, &raw),
            Err(StatsError::DataLength {
                id: 1,
                expected: 144,
                actual: 143
            })
        );
    }
}
