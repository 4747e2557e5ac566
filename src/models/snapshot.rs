//! Time-stamped records fetched per mode or per team.

use serde::{Deserialize, Serialize};

use super::StatId;

/// A record that can live in a snapshot collection.
pub trait Record {
    /// Ranking id, the key for point lookups.
    fn id(&self) -> i64;

    /// Highest game version available in the record's season.
    fn season_version(&self) -> StatId;

    /// POSIX seconds.
    fn data_time(&self) -> i64;
}

/// One densely packed statistics snapshot for a mode.
///
/// `data` is the outer product version × region × league × race × data_size,
/// row-major with version slowest and race fastest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub id: i64,
    pub mode_id: StatId,
    pub season_id: i32,
    pub season_version: StatId,
    pub stat_version: u32,
    pub data_time: i64,
    pub data: Vec<f64>,
}

impl Record for RawSnapshot {
    fn id(&self) -> i64 {
        self.id
    }

    fn season_version(&self) -> StatId {
        self.season_version
    }

    fn data_time(&self) -> i64 {
        self.data_time
    }
}

/// One point of a team's ranking history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRecord {
    pub id: i64,
    pub data_time: i64,
    pub season_id: i32,
    #[serde(default)]
    pub season_version: StatId,
    pub version: StatId,
    pub world_rank: u32,
    pub world_count: u32,
    pub region_rank: u32,
    pub region_count: u32,
    pub league_rank: u32,
    pub league_count: u32,
    #[serde(default)]
    pub ladder_rank: u32,
    #[serde(default)]
    pub ladder_count: u32,
    pub points: f64,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub mmr: Option<i32>,
}

impl RankingRecord {
    /// Fraction of teams ranked above this one in the world, 0 is best.
    pub fn world_percent(&self) -> f64 {
        if self.world_count == 0 {
            0.0
        } else {
            self.world_rank as f64 * 100.0 / self.world_count as f64
        }
    }
}

impl Record for RankingRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn season_version(&self) -> StatId {
        self.season_version
    }

    fn data_time(&self) -> i64 {
        self.data_time
    }
}
