//! Per-dimension id whitelists.

use serde::{Deserialize, Serialize};

use crate::models::{Dimension, StatId, StatLayout};

use super::StatsError;

/// Selected ids per dimension; a missing dimension means every known id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<StatId>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<StatId>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leagues: Option<Vec<StatId>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub races: Option<Vec<StatId>>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Filter::set`].
    pub fn with(mut self, dimension: Dimension, ids: Vec<StatId>) -> Self {
        self.set(dimension, ids);
        self
    }

    pub fn set(&mut self, dimension: Dimension, ids: Vec<StatId>) {
        *self.slot_mut(dimension) = Some(ids);
    }

    pub fn get(&self, dimension: Dimension) -> Option<&[StatId]> {
        match dimension {
            Dimension::Version => self.versions.as_deref(),
            Dimension::Region => self.regions.as_deref(),
            Dimension::League => self.leagues.as_deref(),
            Dimension::Race => self.races.as_deref(),
        }
    }

    fn slot_mut(&mut self, dimension: Dimension) -> &mut Option<Vec<StatId>> {
        match dimension {
            Dimension::Version => &mut self.versions,
            Dimension::Region => &mut self.regions,
            Dimension::League => &mut self.leagues,
            Dimension::Race => &mut self.races,
        }
    }

    /// Every listed id must be known to the layout; decoding does not check.
    pub fn check(&self, layout: &StatLayout) -> Result<(), StatsError> {
        for dimension in Dimension::ALL {
            let Some(ids) = self.get(dimension) else {
                continue;
            };
            if let Some(&id) = ids.iter().find(|&&id| !layout.contains(dimension, id)) {
                return Err(StatsError::UnknownId { dimension, id });
            }
        }
        Ok(())
    }

    /// Fill absent dimensions with every id the layout knows.
    pub fn resolve(&self, layout: &StatLayout) -> ResolvedFilter {
        let pick = |dimension: Dimension| -> Vec<StatId> {
            match self.get(dimension) {
                Some(ids) => ids.to_vec(),
                None => layout.ids(dimension).to_vec(),
            }
        };

        ResolvedFilter {
            versions: pick(Dimension::Version),
            regions: pick(Dimension::Region),
            leagues: pick(Dimension::League),
            races: pick(Dimension::Race),
        }
    }
}

/// A filter with an explicit id list for every dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFilter {
    pub versions: Vec<StatId>,
    pub regions: Vec<StatId>,
    pub leagues: Vec<StatId>,
    pub races: Vec<StatId>,
}

impl ResolvedFilter {
    pub fn ids(&self, dimension: Dimension) -> &[StatId] {
        match dimension {
            Dimension::Version => &self.versions,
            Dimension::Region => &self.regions,
            Dimension::League => &self.leagues,
            Dimension::Race => &self.races,
        }
    }

    /// Copy of this filter restricted to a single id in one dimension.
    pub fn narrowed(&self, dimension: Dimension, id: StatId) -> Self {
        let mut next = self.clone();
        let slot = match dimension {
            Dimension::Version => &mut next.versions,
            Dimension::Region => &mut next.regions,
            Dimension::League => &mut next.leagues,
            Dimension::Race => &mut next.races,
        };
        *slot = vec![id];
        next
    }

    pub fn contains(&self, dimension: Dimension, id: StatId) -> bool {
        self.ids(dimension).contains(&id)
    }
}
