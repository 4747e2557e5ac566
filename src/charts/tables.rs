//! Summary tables over the latest snapshot of a mode.

use std::fmt;
use std::sync::Arc;

use crate::graph::{GraphError, Settings};
use crate::models::{Dimension, EnumsInfo, RankingRecord, StatId, ALL};
use crate::stats::{Collection, Filter, Mode};

use super::{format_date, format_int, format_percent, version_region_filter, VERSION};

/// Rows of formatted cells under a header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Cell in the row whose first cell is `row` and the column headed `column`.
    pub fn cell(&self, row: &str, column: &str) -> Option<&str> {
        let col = self.header.iter().position(|h| h == column)?;
        self.rows
            .iter()
            .find(|r| r.first().map(String::as_str) == Some(row))
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.header.len();
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        writeln!(f, "{}", self.title)?;
        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, &width))| {
                    if i == 0 {
                        format!("{cell:<width$}")
                    } else {
                        format!("{cell:>width$}")
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
        };
        writeln!(f, "{}", line(&self.header))?;
        for row in &self.rows {
            writeln!(f, "{}", line(row))?;
        }
        Ok(())
    }
}

/// Produces a table for the current control values.
pub trait TableSource {
    fn update(&self, settings: &Settings) -> Result<Table, GraphError>;
}

/// Waits for data like a graph does, then rebuilds its table on every control change.
pub struct TableView<T> {
    settings: Settings,
    source: Option<T>,
    table: Option<Table>,
}

impl<T: TableSource> TableView<T> {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            source: None,
            table: None,
        }
    }

    pub fn init(&mut self, source: T) -> Result<&Table, GraphError> {
        let table = source.update(&self.settings)?;
        self.source = Some(source);
        Ok(self.table.insert(table))
    }

    pub fn on_control_change(&mut self, name: &str, value: &str) -> Result<(), GraphError> {
        self.settings.set(name, value);
        if let Some(source) = &self.source {
            self.table = Some(source.update(&self.settings)?);
        }
        Ok(())
    }

    pub fn is_waiting(&self) -> bool {
        self.source.is_none()
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

fn name(enums: &EnumsInfo, dimension: Dimension, id: StatId) -> String {
    enums
        .name(dimension, id)
        .map(str::to_string)
        .unwrap_or_else(|| id.to_string())
}

fn count_cell(count: f64, total: f64) -> String {
    format!("{} {}", format_int(count), format_percent(count, total))
}

/// League shares per region and for the world.
pub struct LeagueDistributionTable {
    mode: Arc<Mode>,
    enums: Arc<EnumsInfo>,
    default_version: StatId,
}

impl LeagueDistributionTable {
    pub fn new(mode: Arc<Mode>, enums: Arc<EnumsInfo>, default_version: StatId) -> Self {
        Self {
            mode,
            enums,
            default_version,
        }
    }
}

impl TableSource for LeagueDistributionTable {
    fn update(&self, settings: &Settings) -> Result<Table, GraphError> {
        let stat = self.mode.last()?;
        let version = settings.id(VERSION).unwrap_or(self.default_version);
        let filter = Filter::new().with(Dimension::Version, vec![version]);
        filter.check(stat.layout())?;

        let by_region = stat.filter_aggregate(&filter, &[Dimension::Region, Dimension::League]);
        let world = stat.filter_aggregate(&filter, &[Dimension::League]);
        let leagues = by_region.ids(Dimension::League);

        let mut header = vec!["Region".to_string(), "Population".to_string()];
        header.extend(leagues.iter().map(|&l| name(&self.enums, Dimension::League, l)));

        let mut rows = Vec::new();
        for &region in by_region.ids(Dimension::Region) {
            let total = by_region.count(&[region])?;
            let mut row = vec![
                name(&self.enums, Dimension::Region, region),
                format_int(total),
            ];
            for &league in leagues {
                row.push(count_cell(by_region.count(&[region, league])?, total));
            }
            rows.push(row);
        }

        let total = world.count(&[])?;
        let mut row = vec![name(&self.enums, Dimension::Region, ALL), format_int(total)];
        for &league in leagues {
            row.push(count_cell(world.count(&[league])?, total));
        }
        rows.push(row);

        Ok(Table {
            title: "League distribution".to_string(),
            header,
            rows,
        })
    }
}

/// Race shares within each league.
pub struct RaceDistributionTable {
    mode: Arc<Mode>,
    enums: Arc<EnumsInfo>,
    default_version: StatId,
}

impl RaceDistributionTable {
    pub fn new(mode: Arc<Mode>, enums: Arc<EnumsInfo>, default_version: StatId) -> Self {
        Self {
            mode,
            enums,
            default_version,
        }
    }
}

impl TableSource for RaceDistributionTable {
    fn update(&self, settings: &Settings) -> Result<Table, GraphError> {
        let stat = self.mode.last()?;
        let (_, filter) = version_region_filter(settings, self.default_version);
        filter.check(stat.layout())?;

        let aggregate = stat.filter_aggregate(&filter, &[Dimension::League, Dimension::Race]);
        let races = aggregate.ids(Dimension::Race);

        let mut header = vec!["League".to_string()];
        header.extend(races.iter().map(|&r| name(&self.enums, Dimension::Race, r)));

        let mut rows = Vec::new();
        for &league in aggregate.ids(Dimension::League) {
            let total = aggregate.count(&[league])?;
            let mut row = vec![name(&self.enums, Dimension::League, league)];
            for &race in races {
                row.push(count_cell(aggregate.count(&[league, race])?, total));
            }
            rows.push(row);
        }

        Ok(Table {
            title: "Race distribution".to_string(),
            header,
            rows,
        })
    }
}

/// Team count per region and in total.
pub struct PopulationTable {
    mode: Arc<Mode>,
    enums: Arc<EnumsInfo>,
    default_version: StatId,
}

impl PopulationTable {
    pub fn new(mode: Arc<Mode>, enums: Arc<EnumsInfo>, default_version: StatId) -> Self {
        Self {
            mode,
            enums,
            default_version,
        }
    }
}

impl TableSource for PopulationTable {
    fn update(&self, settings: &Settings) -> Result<Table, GraphError> {
        let stat = self.mode.last()?;
        let version = settings.id(VERSION).unwrap_or(self.default_version);
        let filter = Filter::new().with(Dimension::Version, vec![version]);
        filter.check(stat.layout())?;

        let aggregate = stat.filter_aggregate(&filter, &[Dimension::Region]);

        let mut rows = Vec::new();
        for &region in aggregate.ids(Dimension::Region) {
            rows.push(vec![
                name(&self.enums, Dimension::Region, region),
                format_int(aggregate.count(&[region])?),
            ]);
        }
        rows.push(vec![
            name(&self.enums, Dimension::Region, ALL),
            format_int(aggregate.count(&[])?),
        ]);

        Ok(Table {
            title: "Population".to_string(),
            header: vec!["Region".to_string(), "Teams".to_string()],
            rows,
        })
    }
}

/// One row per ranking snapshot of a team, oldest first.
pub fn ranking_history_table(history: &Collection<RankingRecord>) -> Table {
    let rank = |rank: u32, count: u32| {
        format!("{} / {}", format_int(rank as f64), format_int(count as f64))
    };

    let rows = history
        .as_slice()
        .iter()
        .map(|record| {
            vec![
                format_date(record.data_time),
                record.season_id.to_string(),
                rank(record.world_rank, record.world_count),
                format!("{:.2}%", record.world_percent()),
                rank(record.region_rank, record.region_count),
                rank(record.league_rank, record.league_count),
                format_int(record.points),
                record.wins.to_string(),
                record.losses.to_string(),
                record.mmr.map(|mmr| mmr.to_string()).unwrap_or_default(),
            ]
        })
        .collect();

    Table {
        title: "Ranking history".to_string(),
        header: [
            "Date", "Season", "World", "Top", "Region", "League", "Points", "Wins", "Losses", "MMR",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect(),
        rows,
    }
}
