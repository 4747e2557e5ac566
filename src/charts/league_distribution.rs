//! Stacked league shares over time.

use std::sync::Arc;

use crate::graph::{
    Canvas, Chart, GraphError, HoverPoint, Point, Settings, Surface, Tooltip, Units, XAxis, YAxis,
};
use crate::models::{Dimension, EnumsInfo, Seasons, StatId};
use crate::stats::Mode;

use super::{
    format_date, format_int, format_percent, require_span, season_label, select, share,
    version_region_filter, Selection,
};

const TOOLTIP_WIDTH: f64 = 210.0;

/// League styles are indexed by league id; unknown ids fall back to white.
fn league_style_index(league: StatId) -> usize {
    usize::try_from(league).unwrap_or(usize::MAX)
}

/// Team counts per league of one snapshot, in league ranking order.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaguePoint {
    pub season_id: i32,
    pub data_time: i64,
    pub counts: Vec<f64>,
    pub total: f64,
}

pub struct LeagueDistributionGraph {
    mode: Arc<Mode>,
    enums: Arc<EnumsInfo>,
    seasons: Arc<Seasons>,
    default_version: StatId,
    points: Vec<LeaguePoint>,
}

impl LeagueDistributionGraph {
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
            points: Vec::new(),
        }
    }

    pub fn points(&self) -> &[LeaguePoint] {
        &self.points
    }
}

impl Chart for LeagueDistributionGraph {
    type Payload = usize;

    fn new_settings(&mut self, settings: &Settings) -> Result<(), GraphError> {
        let (version, filter) = version_region_filter(settings, self.default_version);
        let leagues = &self.enums.league_ranking_ids;

        let mut newest_first = Vec::with_capacity(self.mode.len());
        for stat in self.mode.each_reverse(Some(version)) {
            filter.check(stat.layout())?;
            let aggregate = stat.filter_aggregate(&filter, &[Dimension::League]);
            newest_first.push(LeaguePoint {
                season_id: stat.season_id(),
                data_time: stat.data_time(),
                counts: leagues
                    .iter()
                    .map(|&league| aggregate.count(&[league]))
                    .collect::<Result<_, _>>()?,
                total: aggregate.count(&[])?,
            });
        }

        self.points = select(
            newest_first.into_iter(),
            Selection::from_settings(settings),
            |p| p.season_id,
        );
        Ok(())
    }

    fn draw_graph<C: Canvas>(
        &self,
        surface: &mut Surface<C>,
    ) -> Result<Vec<HoverPoint<usize>>, GraphError> {
        let (first, last) = require_span(&self.points)?;
        let (width, height) = (surface.width(), surface.height());
        let units = Units::new(
            width,
            height,
            first.data_time as f64,
            last.data_time as f64,
            100.0,
            0.0,
        );

        // Each league's line sits on top of the leagues below it.
        let mut cumulative = vec![0.0; self.points.len()];
        let mut lines: Vec<Vec<HoverPoint<usize>>> = Vec::with_capacity(self.enums.league_ranking_ids.len());
        for l in 0..self.enums.league_ranking_ids.len() {
            let line = self
                .points
                .iter()
                .enumerate()
                .map(|(i, point)| {
                    cumulative[i] += share(point.counts[l], point.total);
                    HoverPoint::new(
                        units.x_to_pixel(point.data_time as f64),
                        units.y_to_pixel(cumulative[i]),
                        i,
                    )
                })
                .collect();
            lines.push(line);
        }

        for (line, &league) in lines.iter().zip(&self.enums.league_ranking_ids).rev() {
            let mut area = vec![Point::new(width, height), Point::new(0.0, height)];
            area.extend(line.iter().map(HoverPoint::point));
            surface.league_garea(league_style_index(league), &area)?;
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
        for (count, &league) in point.counts.iter().zip(&self.enums.league_ranking_ids) {
            let name = self
                .enums
                .name(Dimension::League, league)
                .map(str::to_string)
                .unwrap_or_else(|| league.to_string());
            tooltip = tooltip.row(
                name,
                format!("{} {}", format_int(*count), format_percent(*count, point.total)),
            );
        }
        tooltip.row("Population", format_int(point.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::fixtures::{enums, mode, seasons};
    use crate::charts::{default_settings, X_AXIS};
    use crate::graph::{Edges, SvgCanvas};

    fn chart(settings: &Settings) -> LeagueDistributionGraph {
        let mut chart = LeagueDistributionGraph::new(mode(), enums(), seasons(), 2);
        chart.new_settings(settings).unwrap();
        chart
    }

    fn surface() -> Surface<SvgCanvas> {
        let mut surface = Surface::new(SvgCanvas::new(), Edges::default(), 20.0);
        surface.resize(1000.0, 300.0, 1.0);
        surface
    }

    #[test]
    fn test_all_points() {
        let chart = chart(&default_settings(2));

        let points = chart.points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].counts, vec![3.0, 5.0, 7.0, 9.0, 11.0, 13.0, 15.0]);
        assert_eq!(points[0].total, 63.0);
        assert!(points.windows(2).all(|w| w[0].data_time < w[1].data_time));
    }

    #[test]
    fn test_season_last() {
        let chart = chart(&default_settings(2).with(X_AXIS, "sl"));

        let points = chart.points();
        assert_eq!(points.len(), 2);
        assert_eq!((points[0].season_id, points[0].total), (28, 126.0));
        assert_eq!((points[1].season_id, points[1].total), (29, 189.0));
    }

    #[test]
    fn test_stacked_lines_reach_the_top() {
        let chart = chart(&default_settings(2));
        let mut surface = surface();

        let points = chart.draw_graph(&mut surface).unwrap();

        assert_eq!(points.len(), 7 * 3);
        let bronze = &points[0];
        assert!((bronze.y - (260.0 - 260.0 * 3.0 / 63.0)).abs() < 1e-9);
        let grandmaster = &points[6 * 3..];
        assert!(grandmaster.iter().all(|p| p.y.abs() < 1e-9));

        // Grandmaster area first, bronze on top of it.
        let elements = surface.canvas().elements();
        assert!(elements[0].contains("fill='#ff0000'"));
        assert!(elements[6].contains("fill='url(#g5)'"));
    }

    #[test]
    fn test_area_style_follows_league_id() {
        let mut reordered = (*enums()).clone();
        reordered.league_ranking_ids = vec![6, 0];
        let mut chart = LeagueDistributionGraph::new(mode(), Arc::new(reordered), seasons(), 2);
        chart.new_settings(&default_settings(2)).unwrap();
        let mut surface = surface();

        chart.draw_graph(&mut surface).unwrap();

        let elements = surface.canvas().elements();
        assert!(elements[0].contains("fill='url(#g0)'"));
        assert!(elements[1].contains("fill='#ff0000'"));
        let svg = surface.canvas().to_svg();
        assert!(svg.contains("stop-color='#5d3621'"));
        assert!(!svg.contains("stop-color='#606060'"));
    }

    #[test]
    fn test_tooltip() {
        let chart = chart(&default_settings(2));

        let tooltip = chart.update_tooltip(&2);
        assert_eq!(tooltip.width, 210.0);
        assert_eq!(tooltip.get("Bronze"), Some("9 (4.76%)"));
        assert_eq!(tooltip.get("Population"), Some("189"));
        assert_eq!(tooltip.get("Season"), Some("29 (4 - 2016)"));
    }
}
