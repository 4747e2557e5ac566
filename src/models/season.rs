//! Ladder seasons, used for x-axis coloring and season-last selection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A ladder season with its time span in POSIX seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: i32,
    pub number: i32,
    pub year: i32,
    pub start: i64,
    pub end: i64,
    pub color: String,
}

impl Season {
    /// Label used on axes and in tooltips, e.g. "30 (3 - 2016)".
    pub fn label(&self) -> String {
        format!("{} ({} - {})", self.id, self.number, self.year)
    }

    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.end as f64 >= start && self.start as f64 <= end
    }
}

/// Seasons sorted by id with lookup by id.
#[derive(Debug, Clone, Default)]
pub struct Seasons {
    sorted: Vec<Season>,
    by_id: HashMap<i32, usize>,
}

impl Seasons {
    pub fn new(mut seasons: Vec<Season>) -> Self {
        seasons.sort_by_key(|s| s.id);
        let by_id = seasons.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        Self {
            sorted: seasons,
            by_id,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn sorted(&self) -> &[Season] {
        &self.sorted
    }

    pub fn get(&self, id: i32) -> Option<&Season> {
        self.by_id.get(&id).map(|&i| &self.sorted[i])
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}
