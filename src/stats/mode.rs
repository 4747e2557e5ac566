//! Ordered snapshot collections.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{EnumsInfo, RawSnapshot, Record, StatId, StatLayout};

use super::{validate, Stat, StatsError};

/// Time-ordered records, populated once and replaced wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Record with `id`, or the last record scanned when there is no exact match.
    ///
    /// The scan starts at the first record and keeps the latest one visited, so a
    /// missing id degrades to the final record. `None` only for an empty collection.
    pub fn get(&self, id: i64) -> Option<&T> {
        let mut found = None;
        for record in &self.records {
            found = Some(record);
            if record.id() == id {
                break;
            }
        }
        found
    }

    pub fn get_last(&self) -> Option<&T> {
        self.records.last()
    }

    /// Records in order, skipping those with a season version below `min_version`.
    pub fn each(&self, min_version: Option<StatId>) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.records
            .iter()
            .filter(move |r| min_version.map_or(true, |min| min <= r.season_version()))
    }

    /// [`Collection::each`] back to front.
    pub fn each_reverse(&self, min_version: Option<StatId>) -> impl Iterator<Item = &T> + '_ {
        self.each(min_version).rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }
}

/// All raw snapshots of one mode, each validated against its stat layout.
#[derive(Debug, Clone)]
pub struct Mode {
    mode_id: StatId,
    snapshots: Collection<RawSnapshot>,
    layouts: HashMap<u32, StatLayout>,
}

impl Mode {
    /// Validate every snapshot and keep the layouts they reference.
    pub fn new(
        mode_id: StatId,
        snapshots: Vec<RawSnapshot>,
        enums: &EnumsInfo,
    ) -> Result<Self, StatsError> {
        let mut layouts = HashMap::new();
        for raw in &snapshots {
            let layout = enums
                .layout(raw.stat_version)
                .ok_or(StatsError::UnknownStatVersion(raw.stat_version))?;
            validate(layout, raw)?;
            layouts
                .entry(raw.stat_version)
                .or_insert_with(|| layout.clone());
        }
        debug!(
            mode_id,
            snapshots = snapshots.len(),
            layouts = layouts.len(),
            "Mode validated"
        );

        Ok(Self {
            mode_id,
            snapshots: Collection::new(snapshots),
            layouts,
        })
    }

    fn stat<'a>(&'a self, raw: &'a RawSnapshot) -> Stat<'a> {
        // Every stat version was checked in `new`.
        Stat::new(&self.layouts[&raw.stat_version], raw)
    }

    pub fn mode_id(&self) -> StatId {
        self.mode_id
    }

    /// Stat for a ranking id, degrading to the last scanned snapshot.
    pub fn get(&self, ranking_id: i64) -> Option<Stat<'_>> {
        self.snapshots.get(ranking_id).map(|raw| self.stat(raw))
    }

    pub fn get_last(&self) -> Option<Stat<'_>> {
        self.snapshots.get_last().map(|raw| self.stat(raw))
    }

    /// Like [`Mode::get_last`] but an error for an empty mode.
    pub fn last(&self) -> Result<Stat<'_>, StatsError> {
        self.get_last().ok_or(StatsError::EmptyCollection)
    }

    pub fn each(&self, min_version: Option<StatId>) -> impl DoubleEndedIterator<Item = Stat<'_>> {
        self.snapshots
            .each(min_version)
            .map(move |raw| self.stat(raw))
    }

    pub fn each_reverse(&self, min_version: Option<StatId>) -> impl Iterator<Item = Stat<'_>> {
        self.each(min_version).rev()
    }

    pub fn snapshots(&self) -> &Collection<RawSnapshot> {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
