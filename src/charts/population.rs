//! Team count or games per day over time.

use std::sync::Arc;

use crate::graph::{
    Canvas, Chart, GraphError, HoverPoint, Point, Settings, Style, Surface, Tooltip, Units, XAxis,
    YAxis,
};
use crate::models::{Seasons, StatId};
use crate::stats::Mode;

use super::{
    format_date, format_int, require_span, season_label, select, version_region_filter, Selection,
    Y_AXIS,
};

const TOOLTIP_WIDTH: f64 = 188.0;
const LINE_COLOR: &str = "#ffffaa";
const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationMetric {
    Teams,
    GamesPerDay,
}

impl PopulationMetric {
    fn from_settings(settings: &Settings) -> Self {
        match settings.get(Y_AXIS) {
            Some("g") => PopulationMetric::GamesPerDay,
            _ => PopulationMetric::Teams,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopulationPoint {
    pub season_id: i32,
    /// Days since the season started.
    pub season_age: f64,
    pub data_time: i64,
    pub count: f64,
    /// Games played in the season so far.
    pub games: f64,
    pub games_per_day: f64,
    pub y_value: f64,
}

pub struct PopulationGraph {
    mode: Arc<Mode>,
    seasons: Arc<Seasons>,
    default_version: StatId,
    points: Vec<PopulationPoint>,
    max_y: f64,
}

impl PopulationGraph {
    pub fn new(mode: Arc<Mode>, seasons: Arc<Seasons>, default_version: StatId) -> Self {
        Self {
            mode,
            seasons,
            default_version,
            points: Vec::new(),
            max_y: 0.001,
        }
    }

    pub fn points(&self) -> &[PopulationPoint] {
        &self.points
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }
}

impl Chart for PopulationGraph {
    type Payload = usize;

    fn new_settings(&mut self, settings: &Settings) -> Result<(), GraphError> {
        let (version, filter) = version_region_filter(settings, self.default_version);
        let metric = PopulationMetric::from_settings(settings);

        let mut newest_first = Vec::with_capacity(self.mode.len());
        for stat in self.mode.each_reverse(Some(version)) {
            filter.check(stat.layout())?;
            let season = self
                .seasons
                .get(stat.season_id())
                .ok_or(GraphError::UnknownSeason(stat.season_id()))?;
            let aggregate = stat.filter_aggregate(&filter, &[]);

            let season_age = (stat.data_time() - season.start) as f64 / SECONDS_PER_DAY;
            let games = aggregate.wins(&[])? + aggregate.losses(&[])?;
            let games_per_day = if season_age > 0.0 { games / season_age } else { 0.0 };
            let count = aggregate.count(&[])?;

            newest_first.push(PopulationPoint {
                season_id: season.id,
                season_age,
                data_time: stat.data_time(),
                count,
                games,
                games_per_day,
                y_value: match metric {
                    PopulationMetric::Teams => count,
                    PopulationMetric::GamesPerDay => games_per_day,
                },
            });
        }

        self.points = select(
            newest_first.into_iter(),
            Selection::from_settings(settings),
            |p| p.season_id,
        );
        self.max_y = self
            .points
            .iter()
            .map(|p| p.y_value)
            .fold(0.001, f64::max);
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
            self.max_y,
            0.0,
        );

        let points: Vec<HoverPoint<usize>> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                HoverPoint::new(
                    units.x_to_pixel(p.data_time as f64),
                    units.y_to_pixel(p.y_value),
                    i,
                )
            })
            .collect();

        let path: Vec<Point> = points.iter().map(HoverPoint::point).collect();
        surface.gline(&Style::color(LINE_COLOR), 2.0, &path)?;
        surface.y_axis(&units, YAxis::Int)?;
        surface.x_axis(&units, XAxis::Year, &self.seasons)?;

        Ok(points)
    }

    fn update_tooltip(&self, index: &usize) -> Tooltip {
        let Some(point) = self.points.get(*index) else {
            return Tooltip::new(TOOLTIP_WIDTH);
        };

        Tooltip::new(TOOLTIP_WIDTH)
            .row("Date", format_date(point.data_time))
            .row("Season", season_label(&self.seasons, point.season_id))
            .row("Season age", format!("{} days", point.season_age.round() as i64))
            .row("Teams", format_int(point.count))
            .row("Games/day", format_int(point.games_per_day))
            .row("Games", format_int(point.games))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::fixtures::{mode, seasons};
    use crate::charts::{default_settings, REGION, X_AXIS};
    use crate::graph::{Edges, SvgCanvas};
    use crate::models::Season;

    fn chart(settings: &Settings) -> PopulationGraph {
        let mut chart = PopulationGraph::new(mode(), seasons(), 2);
        chart.new_settings(settings).unwrap();
        chart
    }

    #[test]
    fn test_team_counts() {
        let chart = chart(&default_settings(2));

        let counts: Vec<f64> = chart.points().iter().map(|p| p.y_value).collect();
        assert_eq!(counts, vec![63.0, 126.0, 189.0]);
        assert_eq!(chart.max_y(), 189.0);
        assert_eq!(chart.points()[1].season_age, 20.0);
    }

    #[test]
    fn test_games_per_day() {
        let chart = chart(&default_settings(2).with(Y_AXIS, "g").with(REGION, "0"));

        let points = chart.points();
        // Region 0 holds 56 teams per scale unit, 20 games each.
        assert_eq!(points[0].games, 1120.0);
        assert_eq!(points[0].games_per_day, 112.0);
        assert_eq!(points[1].games_per_day, 112.0);
        assert_eq!(points[2].games_per_day, 336.0);
        assert_eq!(chart.max_y(), 336.0);
    }

    #[test]
    fn test_season_last_and_draw() {
        let chart = chart(&default_settings(2).with(X_AXIS, "sl"));
        assert_eq!(chart.points().len(), 2);

        let mut surface = Surface::new(SvgCanvas::new(), Edges::default(), 20.0);
        surface.resize(1000.0, 300.0, 1.0);
        let points = chart.draw_graph(&mut surface).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[1].x, surface.width());
        assert_eq!(points[1].y, 0.0);
        assert!(surface.canvas().to_svg().contains("stroke='#ffffaa'"));

        let tooltip = chart.update_tooltip(&0);
        assert_eq!(tooltip.width, 188.0);
        assert_eq!(tooltip.get("Season age"), Some("20 days"));
        assert_eq!(tooltip.get("Games/day"), Some("126"));
        assert_eq!(tooltip.get("Games"), Some("2 520"));
    }

    #[test]
    fn test_unknown_season() {
        let only_29 = Arc::new(Seasons::new(
            seasons()
                .sorted()
                .iter()
                .filter(|s| s.id == 29)
                .cloned()
                .collect::<Vec<Season>>(),
        ));
        let mut chart = PopulationGraph::new(mode(), only_29, 2);

        assert!(matches!(
            chart.new_settings(&default_settings(2)),
            Err(GraphError::UnknownSeason(28))
        ));
    }

    #[test]
    fn test_single_point_has_no_span() {
        let mut chart = PopulationGraph::new(mode(), seasons(), 2);
        chart
            .new_settings(&default_settings(2).with(X_AXIS, "sl").with(REGION, "0"))
            .unwrap();
        let mut only_one = chart;
        only_one.points.truncate(1);

        let mut surface = Surface::new(SvgCanvas::new(), Edges::default(), 20.0);
        surface.resize(1000.0, 300.0, 1.0);
        assert!(matches!(
            only_one.draw_graph(&mut surface),
            Err(GraphError::NoData)
        ));
    }
}
