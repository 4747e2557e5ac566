//! Race share over time.

use std::collections::HashMap;
use std::sync::Arc;

use crate::graph::{
    Canvas, Chart, GraphError, HoverPoint, Image, Point, Settings, Style, Surface, Tooltip, Units,
    XAxis, YAxis,
};
use crate::models::{Dimension, EnumsInfo, Seasons, StatId, ALL};
use crate::stats::Mode;

use super::{
    format_date, format_int, format_percent, race_color, require_span, season_label, share,
    version_region_filter, GRANDMASTER, LEAGUE, WOL,
};

const TOOLTIP_WIDTH: f64 = 210.0;
const RACE_ICON_SIZE: f64 = 16.0;

/// Team counts per race of one snapshot, in race ranking order.
#[derive(Debug, Clone, PartialEq)]
pub struct RacePoint {
    pub season_id: i32,
    pub data_time: i64,
    pub counts: Vec<f64>,
    pub total: f64,
}

impl RacePoint {
    pub fn share(&self, index: usize) -> f64 {
        share(self.counts[index], self.total)
    }
}

/// One line per race with the percentage of teams playing it.
pub struct RaceDistributionGraph {
    mode: Arc<Mode>,
    enums: Arc<EnumsInfo>,
    seasons: Arc<Seasons>,
    default_version: StatId,
    race_images: HashMap<StatId, Image>,
    points: Vec<RacePoint>,
    max_percentage: f64,
}

impl RaceDistributionGraph {
    pub fn new(
        mode: Arc<Mode>,
        enums: Arc<EnumsInfo>,
        seasons: Arc<Seasons>,
        default_version: StatId,
    ) -> Self {
        Self {
            mode,
            enums,
            seasons,
            default_version,
            race_images: HashMap::new(),
            points: Vec::new(),
            max_percentage: 0.0,
        }
    }

    /// Mark the start of each line with the race icon under `static_url`.
    pub fn with_race_images(mut self, static_url: &str) -> Self {
        for &race in &self.enums.race_ranking_ids {
            if let Some(key) = self.enums.key(Dimension::Race, race) {
                self.race_images.insert(
                    race,
                    Image {
                        src: format!("{static_url}img/races/{key}.svg"),
                        width: RACE_ICON_SIZE,
                        height: RACE_ICON_SIZE,
                    },
                );
            }
        }
        self
    }

    pub fn points(&self) -> &[RacePoint] {
        &self.points
    }

    pub fn max_percentage(&self) -> f64 {
        self.max_percentage
    }
}

impl Chart for RaceDistributionGraph {
    type Payload = usize;

    fn new_settings(&mut self, settings: &Settings) -> Result<(), GraphError> {
        let (version, mut filter) = version_region_filter(settings, self.default_version);

        let league = settings.id_or_all(LEAGUE);
        if league != ALL {
            filter.set(Dimension::League, vec![league]);
        }
        if league == GRANDMASTER && version == WOL {
            // Grandmaster data for WoL is broken, show nothing.
            filter.set(Dimension::League, vec![]);
        }

        let races = &self.enums.race_ranking_ids;
        let mut points = Vec::with_capacity(self.mode.len());
        let mut max_percentage: f64 = 0.0;

        for stat in self.mode.each(Some(version)) {
            filter.check(stat.layout())?;
            let aggregate = stat.filter_aggregate(&filter, &[Dimension::Race]);
            let total = aggregate.count(&[])?;
            let counts = races
                .iter()
                .map(|&race| aggregate.count(&[race]))
                .collect::<Result<Vec<_>, _>>()?;

            if total != 0.0 {
                for count in &counts {
                    max_percentage = max_percentage.max(count / total * 100.0);
                }
            }
            points.push(RacePoint {
                season_id: stat.season_id(),
                data_time: stat.data_time(),
                counts,
                total,
            });
        }

        self.points = points;
        // A flat zero range has no scale.
        self.max_percentage = max_percentage.max(0.001);
        Ok(())
    }

    fn draw_graph<C: Canvas>(
        &self,
        surface: &mut Surface<C>,
    ) -> Result<Vec<HoverPoint<usize>>, GraphError> {
        let (first, last) = require_span(&self.points)?;
        let units = Units::new(
            surface.width(),
            surface.height(),
            first.data_time as f64,
            last.data_time as f64,
            self.max_percentage,
            0.0,
        );

        let lines: Vec<Vec<HoverPoint<usize>>> = (0..self.enums.race_ranking_ids.len())
            .map(|r| {
                self.points
                    .iter()
                    .enumerate()
                    .map(|(i, point)| {
                        HoverPoint::new(
                            units.x_to_pixel(point.data_time as f64),
                            units.y_to_pixel(point.share(r)),
                            i,
                        )
                    })
                    .collect()
            })
            .collect();

        for (line, &race) in lines.iter().zip(&self.enums.race_ranking_ids) {
            let path: Vec<Point> = line.iter().map(HoverPoint::point).collect();
            surface.gline(&Style::color(race_color(race)), 2.0, &path)?;

            if let (Some(image), Some(start)) = (self.race_images.get(&race), path.first()) {
                surface.gimage(image, *start);
            }
        }

        surface.y_axis(&units, YAxis::Percent)?;
        surface.x_axis(&units, XAxis::Year, &self.seasons)?;

        Ok(lines.into_iter().flatten().collect())
    }

    fn update_tooltip(&self, index: &usize) -> Tooltip {
        let Some(point) = self.points.get(*index) else {
            return Tooltip::new(TOOLTIP_WIDTH);
        };

        let mut tooltip = Tooltip::new(TOOLTIP_WIDTH)
            .row("Date", format_date(point.data_time))
            .row("Season", season_label(&self.seasons, point.season_id));
        for (count, &race) in point.counts.iter().zip(&self.enums.race_ranking_ids) {
            let name = self
                .enums
                .name(Dimension::Race, race)
                .map(str::to_string)
                .unwrap_or_else(|| race.to_string());
            tooltip = tooltip.row(
                name,
                format!("{} {}", format_int(*count), format_percent(*count, point.total)),
            );
        }
        tooltip.row("Population", format_int(point.total))
    }
}
