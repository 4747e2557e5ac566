//! Enum metadata supplied with the page: dimension ids, names and stat layouts.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Id of a version, region, league, race or mode.
pub type StatId = i32;

/// The "all" id used by controls, also the id of the total at every aggregate level.
pub const ALL: StatId = -2;

/// Unknown id (unknown race is a real stat cell, unknown region/league is not).
pub const UNKNOWN: StatId = -1;

/// Numeric fields per stat cell.
pub const DATA_SIZE: usize = 4;

pub const COUNT_INDEX: usize = 0;
pub const WINS_INDEX: usize = 1;
pub const LOSSES_INDEX: usize = 2;
pub const POINTS_INDEX: usize = 3;

/// The dimensions a raw snapshot is broken down by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Version,
    Region,
    League,
    Race,
}

impl Dimension {
    /// All dimensions in flat-array order (version slowest, race fastest).
    pub const ALL: [Dimension; 4] = [
        Dimension::Version,
        Dimension::Region,
        Dimension::League,
        Dimension::Race,
    ];

    pub fn singular(&self) -> &'static str {
        match self {
            Dimension::Version => "version",
            Dimension::Region => "region",
            Dimension::League => "league",
            Dimension::Race => "race",
        }
    }

    /// Filter key name, e.g. "regions".
    pub fn plural(&self) -> &'static str {
        match self {
            Dimension::Version => "versions",
            Dimension::Region => "regions",
            Dimension::League => "leagues",
            Dimension::Race => "races",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.singular())
    }
}

impl FromStr for Dimension {
    type Err = String;

    /// Accepts both the singular and the plural name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|d| s == d.singular() || s == d.plural())
            .ok_or_else(|| format!("unknown dimension: {}", s))
    }
}

/// Addressing metadata for one stat format version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLayout {
    pub data_size: usize,

    /// Number of cells (not numbers) in a snapshot.
    #[serde(default)]
    pub data_count: usize,

    pub version_count: usize,
    pub region_count: usize,
    pub league_count: usize,
    pub race_count: usize,

    pub version_ids: Vec<StatId>,
    pub region_ids: Vec<StatId>,
    pub league_ids: Vec<StatId>,
    pub race_ids: Vec<StatId>,

    pub version_indices: HashMap<StatId, usize>,
    pub region_indices: HashMap<StatId, usize>,
    pub league_indices: HashMap<StatId, usize>,
    pub race_indices: HashMap<StatId, usize>,
}

impl StatLayout {
    /// Build a layout where each id's dense index is its position in the id list.
    pub fn from_ids(
        data_size: usize,
        version_ids: Vec<StatId>,
        region_ids: Vec<StatId>,
        league_ids: Vec<StatId>,
        race_ids: Vec<StatId>,
    ) -> Self {
        fn indices(ids: &[StatId]) -> HashMap<StatId, usize> {
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect()
        }

        Self {
            data_size,
            data_count: version_ids.len() * region_ids.len() * league_ids.len() * race_ids.len(),
            version_count: version_ids.len(),
            region_count: region_ids.len(),
            league_count: league_ids.len(),
            race_count: race_ids.len(),
            version_indices: indices(&version_ids),
            region_indices: indices(&region_ids),
            league_indices: indices(&league_ids),
            race_indices: indices(&race_ids),
            version_ids,
            region_ids,
            league_ids,
            race_ids,
        }
    }

    pub fn count(&self, dimension: Dimension) -> usize {
        match dimension {
            Dimension::Version => self.version_count,
            Dimension::Region => self.region_count,
            Dimension::League => self.league_count,
            Dimension::Race => self.race_count,
        }
    }

    /// All known ids of a dimension, the default when a filter leaves it out.
    pub fn ids(&self, dimension: Dimension) -> &[StatId] {
        match dimension {
            Dimension::Version => &self.version_ids,
            Dimension::Region => &self.region_ids,
            Dimension::League => &self.league_ids,
            Dimension::Race => &self.race_ids,
        }
    }

    pub fn indices(&self, dimension: Dimension) -> &HashMap<StatId, usize> {
        match dimension {
            Dimension::Version => &self.version_indices,
            Dimension::Region => &self.region_indices,
            Dimension::League => &self.league_indices,
            Dimension::Race => &self.race_indices,
        }
    }

    pub fn contains(&self, dimension: Dimension, id: StatId) -> bool {
        self.indices(dimension).contains_key(&id)
    }

    /// Length of the flat numeric array of a snapshot in this layout.
    pub fn data_len(&self) -> usize {
        self.data_size * self.version_count * self.region_count * self.league_count * self.race_count
    }
}

/// Ids, names and keys for every enum plus the stat layouts, keyed by stat version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumsInfo {
    #[serde(default)]
    pub stat: HashMap<u32, StatLayout>,

    #[serde(default)]
    pub mode_ranking_ids: Vec<StatId>,
    #[serde(default)]
    pub version_ranking_ids: Vec<StatId>,
    #[serde(default)]
    pub region_ranking_ids: Vec<StatId>,
    #[serde(default)]
    pub league_ranking_ids: Vec<StatId>,
    #[serde(default)]
    pub race_ranking_ids: Vec<StatId>,

    #[serde(default)]
    pub mode_name_by_ids: HashMap<StatId, String>,
    #[serde(default)]
    pub version_name_by_ids: HashMap<StatId, String>,
    #[serde(default)]
    pub region_name_by_ids: HashMap<StatId, String>,
    #[serde(default)]
    pub league_name_by_ids: HashMap<StatId, String>,
    #[serde(default)]
    pub race_name_by_ids: HashMap<StatId, String>,

    #[serde(default)]
    pub mode_key_by_ids: HashMap<StatId, String>,
    #[serde(default)]
    pub version_key_by_ids: HashMap<StatId, String>,
    #[serde(default)]
    pub region_key_by_ids: HashMap<StatId, String>,
    #[serde(default)]
    pub league_key_by_ids: HashMap<StatId, String>,
    #[serde(default)]
    pub race_key_by_ids: HashMap<StatId, String>,
}

impl EnumsInfo {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn layout(&self, stat_version: u32) -> Option<&StatLayout> {
        self.stat.get(&stat_version)
    }

    /// Ids shown in rankings and controls, in display order.
    pub fn ranking_ids(&self, dimension: Dimension) -> &[StatId] {
        match dimension {
            Dimension::Version => &self.version_ranking_ids,
            Dimension::Region => &self.region_ranking_ids,
            Dimension::League => &self.league_ranking_ids,
            Dimension::Race => &self.race_ranking_ids,
        }
    }

    pub fn name(&self, dimension: Dimension, id: StatId) -> Option<&str> {
        let names = match dimension {
            Dimension::Version => &self.version_name_by_ids,
            Dimension::Region => &self.region_name_by_ids,
            Dimension::League => &self.league_name_by_ids,
            Dimension::Race => &self.race_name_by_ids,
        };
        names.get(&id).map(String::as_str)
    }

    pub fn key(&self, dimension: Dimension, id: StatId) -> Option<&str> {
        let keys = match dimension {
            Dimension::Version => &self.version_key_by_ids,
            Dimension::Region => &self.region_key_by_ids,
            Dimension::League => &self.league_key_by_ids,
            Dimension::Race => &self.race_key_by_ids,
        };
        keys.get(&id).map(String::as_str)
    }

    pub fn mode_name(&self, mode_id: StatId) -> Option<&str> {
        self.mode_name_by_ids.get(&mode_id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENUMS_JSON: &str = r#"{
        "stat": {
            "1": {
                "data_count": 6,
                "data_size": 4,
                "version_count": 1, "version_ids": [2], "version_indices": {"2": 0},
                "region_count": 2, "region_ids": [0, 1], "region_indices": {"0": 0, "1": 1},
                "league_count": 1, "league_ids": [0], "league_indices": {"0": 0},
                "race_count": 3, "race_ids": [-1, 0, 1], "race_indices": {"-1": 0, "0": 1, "1": 2}
            }
        },
        "region_ranking_ids": [0, 1],
        "region_name_by_ids": {"-2": "World", "0": "EU", "1": "AM"},
        "region_key_by_ids": {"-2": "world", "0": "eu", "1": "am"},
        "race_ranking_ids": [0, 1],
        "mode_name_by_ids": {"11": "1v1"}
    }"#;

    #[test]
    fn test_parse_enums_info() {
        let info = EnumsInfo::from_json(ENUMS_JSON).unwrap();
        let layout = info.layout(1).unwrap();

        assert_eq!(layout.data_size, 4);
        assert_eq!(layout.race_indices[&-1], 0);
        assert_eq!(layout.ids(Dimension::Race), &[-1, 0, 1]);
        assert_eq!(layout.data_len(), 24);
        assert_eq!(info.name(Dimension::Region, ALL), Some("World"));
        assert_eq!(info.key(Dimension::Region, 1), Some("am"));
        assert_eq!(info.mode_name(11), Some("1v1"));
        assert!(info.layout(0).is_none());
    }

    #[test]
    fn test_from_ids_matches_parsed_layout() {
        let info = EnumsInfo::from_json(ENUMS_JSON).unwrap();
        let built = StatLayout::from_ids(4, vec![2], vec![0, 1], vec![0], vec![-1, 0, 1]);
        assert_eq!(&built, info.layout(1).unwrap());
    }

    #[test]
    fn test_dimension_from_str() {
        assert_eq!("region".parse::<Dimension>(), Ok(Dimension::Region));
        assert_eq!("leagues".parse::<Dimension>(), Ok(Dimension::League));
        assert!("ladders".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_dimension_names() {
        assert_eq!(Dimension::Race.plural(), "races");
        assert_eq!(format!("{}", Dimension::Version), "version");
    }
}
