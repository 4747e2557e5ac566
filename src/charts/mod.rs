//! Ladder statistics charts and tables built on the graph driver.
//!
//! Controls arrive as string settings: `v` version, `r` region, `l` league,
//! `sx` x axis selection (`a` all points, `sl` last point per season) and
//! `sy` population y axis (`c` team count, `g` games per day).

mod format;
mod league_distribution;
mod population;
mod race_distribution;
mod tables;

pub use format::*;
pub use league_distribution::*;
pub use population::*;
pub use race_distribution::*;
pub use tables::*;

use crate::graph::{GraphError, Settings};
use crate::models::{Dimension, Seasons, StatId, ALL, UNKNOWN};
use crate::stats::Filter;

pub const VERSION: &str = "v";
pub const REGION: &str = "r";
pub const LEAGUE: &str = "l";
pub const X_AXIS: &str = "sx";
pub const Y_AXIS: &str = "sy";

pub const GRANDMASTER: StatId = 6;
pub const WOL: StatId = 0;

/// Line color of a race id.
pub fn race_color(race: StatId) -> &'static str {
    match race {
        UNKNOWN => "#666666",
        0 => "#704898",
        1 => "#fff080",
        2 => "#c94118",
        3 => "#a0ebff",
        _ => "#ffffff",
    }
}

/// Control values before the user touches anything.
pub fn default_settings(default_version: StatId) -> Settings {
    Settings::new()
        .with(VERSION, &default_version.to_string())
        .with(REGION, &ALL.to_string())
        .with(LEAGUE, &ALL.to_string())
        .with(X_AXIS, "a")
        .with(Y_AXIS, "c")
}

/// Which snapshots feed a time chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    SeasonLast,
}

impl Selection {
    fn from_settings(settings: &Settings) -> Self {
        match settings.get(X_AXIS) {
            Some("sl") => Selection::SeasonLast,
            _ => Selection::All,
        }
    }
}

/// Selected version and a filter on it plus the region control.
fn version_region_filter(
    settings: &Settings,
    default_version: StatId,
) -> (StatId, Filter) {
    let version = settings.id(VERSION).unwrap_or(default_version);
    let mut filter = Filter::new().with(Dimension::Version, vec![version]);

    let region = settings.id_or_all(REGION);
    if region != ALL {
        filter.set(Dimension::Region, vec![region]);
    }
    (version, filter)
}

/// Walk newest to oldest keeping points per the selection, return oldest first.
fn select<T>(
    points: impl Iterator<Item = T>,
    selection: Selection,
    season_of: impl Fn(&T) -> i32,
) -> Vec<T> {
    let mut selected = Vec::new();
    let mut last_season = None;
    for point in points {
        let season = season_of(&point);
        if selection == Selection::All || last_season != Some(season) {
            last_season = Some(season);
            selected.push(point);
        }
    }
    selected.reverse();
    selected
}

fn season_label(seasons: &Seasons, season_id: i32) -> String {
    seasons
        .get(season_id)
        .map(|season| season.label())
        .unwrap_or_else(|| season_id.to_string())
}

/// Time charts need at least two points to span an x range.
fn require_span<T>(points: &[T]) -> Result<(&T, &T), GraphError> {
    match points {
        [first, .., last] => Ok((first, last)),
        _ => Err(GraphError::NoData),
    }
}
