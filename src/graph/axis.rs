//! Axis drawing and tick label formatting.

use chrono::Datelike;

use crate::models::Seasons;

use super::canvas::{Baseline, Canvas, Point, Style, TextAlign};
use super::surface::{Surface, WHITE};
use super::units::Units;
use super::GraphError;

const EVENT_COLOR: &str = "#ffff00";
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Dated markers on every time axis.
pub const EVENTS: [(&str, i32, u32, u32); 3] = [
    ("LotV", 2015, 11, 9),
    ("MMR", 2016, 7, 17),
    ("f2p", 2017, 11, 15),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAxis {
    Int,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAxis {
    Year,
    Season,
    Month,
}

/// Percent tick label, precision picked from the visible range size.
pub fn percent_label(value: f64, range_size: f64) -> String {
    if range_size < 1.0 {
        format!("{:.2}%", value)
    } else if range_size < 10.0 {
        format!("{:.1}%", value)
    } else {
        format!("{}%", value.round() as i64)
    }
}

/// Integer tick label, abbreviated to thousands on large axes.
pub fn int_label(value: f64, max_abs_value: f64) -> String {
    if value == 1.0 {
        "1".to_string()
    } else if max_abs_value > 10_000.0 {
        format!("{}k", (value / 1000.0).round() as i64)
    } else {
        format!("{}", value.round() as i64)
    }
}

/// Clamp without panicking when the bounds cross.
fn min_max(min: f64, value: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

impl<C: Canvas> Surface<C> {
    /// Y axis line with eleven evenly spaced labels.
    pub fn y_axis(&mut self, units: &Units, kind: YAxis) -> Result<(), GraphError> {
        let edges = self.edges();
        let x = edges.left - self.x_margin();
        let white = Style::color(WHITE);

        self.line(
            &white,
            2.0,
            &[Point::new(x, edges.top), Point::new(x, edges.top + self.height())],
            0.0,
            0.0,
        )?;

        for pos in 0..=10 {
            let value = units.y_fraction_to_value(pos as f64 / 10.0);
            let y = (edges.top + units.y_to_pixel(value) + 0.5).round();

            let label = match kind {
                YAxis::Percent => percent_label(value, units.range_size()),
                YAxis::Int => int_label(value, units.max_abs_value()),
            };
            self.text(&label, Point::new(x - 5.0, y), TextAlign::Right, Baseline::Middle);

            if y < edges.top + self.height() - 2.0 {
                self.line(
                    &white,
                    1.0,
                    &[Point::new(x - 3.0, y), Point::new(x + 3.0, y)],
                    0.0,
                    0.0,
                )?;
            }
        }
        Ok(())
    }

    /// Time x axis: season colored baseline, year and month ticks, event markers.
    pub fn x_axis(&mut self, units: &Units, kind: XAxis, seasons: &Seasons) -> Result<(), GraphError> {
        self.season_baseline(units, kind, seasons)?;
        self.calendar_ticks(units, kind)?;
        self.event_lines(units)
    }

    fn season_baseline(&mut self, units: &Units, kind: XAxis, seasons: &Seasons) -> Result<(), GraphError> {
        let (width, height, x_margin) = (self.width(), self.height(), self.x_margin());
        let edges = self.edges();
        let mut x_from = -x_margin;

        for season in seasons.sorted() {
            if !season.overlaps(units.x_start, units.x_end) {
                continue;
            }
            let x_to = units.x_to_pixel(season.end as f64).min(width);

            // Extends past the right edge; the next season overdraws it.
            self.gline(
                &Style::color(&season.color),
                2.0,
                &[Point::new(x_from, height), Point::new(x_to + x_margin, height)],
            )?;

            if kind == XAxis::Season {
                let label = format!("Season {}", season.label());
                let label_width = self.measure_text(&label);
                let span = x_to - x_from;
                if span > label_width {
                    let x = min_max(span / 2.0, x_from + span / 2.0, width - label_width / 2.0);
                    self.text(
                        &label,
                        Point::new(edges.left + x, edges.top + height + 3.0),
                        TextAlign::Center,
                        Baseline::Top,
                    );
                }
            }
            x_from = x_to;
        }
        Ok(())
    }

    fn calendar_ticks(&mut self, units: &Units, kind: XAxis) -> Result<(), GraphError> {
        let (width, height, x_margin) = (self.width(), self.height(), self.x_margin());
        let edges = self.edges();
        let white = Style::color(WHITE);
        let inside = |x: f64| x > -x_margin && x < width + x_margin;

        let (Some(first), Some(last)) = (
            units.pixel_to_time(-x_margin),
            units.pixel_to_time(width + x_margin),
        ) else {
            return Ok(());
        };

        for year in first.year()..=last.year() {
            if let Some(year_x) = units.date_to_pixel(year, 1, 1) {
                if inside(year_x) {
                    self.gline(
                        &white,
                        2.0,
                        &[Point::new(year_x, height - 7.0), Point::new(year_x, height + 7.0)],
                    )?;
                }
            }

            let year_text = year.to_string();
            let text_width = self.measure_text(&year_text);

            for month in 1..=12u32 {
                let (Some(start), Some(end)) = (
                    units.month_to_pixel(year, month),
                    units.month_to_pixel(year, month + 1),
                ) else {
                    continue;
                };
                let month_start_x = start.round() + 0.5;
                let month_end_x = end.round() + 0.5;

                if inside(month_start_x) {
                    self.gline(
                        &white,
                        1.0,
                        &[
                            Point::new(month_start_x, height - 3.0),
                            Point::new(month_start_x, height + 3.0),
                        ],
                    )?;
                }

                if kind == XAxis::Month
                    && month_end_x > text_width / 2.0
                    && month_start_x < width - text_width / 2.0
                {
                    let text_x = min_max(0.0, (month_end_x - month_start_x) / 2.0 + month_start_x, width);
                    self.text(
                        MONTHS[month as usize - 1],
                        Point::new(edges.left + text_x, edges.top + height + 3.0),
                        TextAlign::Center,
                        Baseline::Top,
                    );
                }
            }

            if kind == XAxis::Year {
                if let Some(mid_year) = units.date_to_pixel(year, 7, 1) {
                    let label_x = min_max(text_width / 2.0, mid_year, width - text_width / 2.0);
                    self.text(
                        &year_text,
                        Point::new(edges.left + label_x, edges.top + height + 3.0),
                        TextAlign::Center,
                        Baseline::Top,
                    );
                }
            }
        }
        Ok(())
    }

    fn event_lines(&mut self, units: &Units) -> Result<(), GraphError> {
        let (width, height) = (self.width(), self.height());
        let edges = self.edges();
        let style = Style::color(EVENT_COLOR);

        for (label, year, month, day) in EVENTS {
            let Some(x) = units.date_to_pixel(year, month, day) else {
                continue;
            };
            if x < -edges.left || x > width + edges.right {
                continue;
            }
            self.gline(
                &style,
                2.0,
                &[Point::new(x, height + 5.0), Point::new(x, height - 5.0)],
            )?;
            self.colored_text(
                label,
                Point::new(edges.left + x, edges.top + height - 5.0),
                TextAlign::Center,
                Baseline::Bottom,
                EVENT_COLOR,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edges, SvgCanvas};
    use crate::models::Season;
    use chrono::{TimeZone, Utc};

    fn surface() -> Surface<SvgCanvas> {
        let mut surface = Surface::new(SvgCanvas::new(), Edges::default(), 20.0);
        surface.resize(1000.0, 300.0, 1.0);
        surface
    }

    fn timestamp(year: i32, month: u32, day: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .unwrap()
            .timestamp()
    }

    #[test]
    fn test_percent_label_precision() {
        assert_eq!(percent_label(12.3412, 0.5), "12.34%");
        assert_eq!(percent_label(50.0, 50.0), "50%");
        assert_eq!(percent_label(7.5, 9.99), "7.5%");
        assert_eq!(percent_label(33.3, 10.0), "33%");
    }

    #[test]
    fn test_int_label() {
        assert_eq!(int_label(1.0, 50_000.0), "1");
        assert_eq!(int_label(25_400.0, 50_000.0), "25k");
        assert_eq!(int_label(5_000.0, 10_000.0), "5000");
        assert_eq!(int_label(0.0, 50_000.0), "0k");
        assert_eq!(int_label(12.6, 100.0), "13");
    }

    #[test]
    fn test_y_axis_labels() {
        let mut surface = surface();
        let units = Units::new(surface.width(), surface.height(), 0.0, 1.0, 50.0, 0.0);
        surface.y_axis(&units, YAxis::Percent).unwrap();

        let texts: Vec<&String> = surface
            .canvas()
            .elements()
            .iter()
            .filter(|e| e.starts_with("<text"))
            .collect();
        assert_eq!(texts.len(), 11);
        assert!(texts[0].contains(">0%</text>"));
        assert!(texts[10].contains(">50%</text>"));
        assert!(texts[10].contains("x='39' y='21'"));
    }

    #[test]
    fn test_x_axis_years_and_events() {
        let mut surface = surface();
        let start = timestamp(2015, 6, 1) as f64;
        let end = timestamp(2018, 6, 1) as f64;
        let units = Units::new(surface.width(), surface.height(), start, end, 100.0, 0.0);
        let seasons = Seasons::new(vec![Season {
            id: 28,
            number: 1,
            year: 2016,
            start: timestamp(2016, 7, 12),
            end: timestamp(2016, 10, 18),
            color: "#ff6666".to_string(),
        }]);

        surface.x_axis(&units, XAxis::Year, &seasons).unwrap();

        let svg = surface.canvas().to_svg();
        for year in ["2015", "2016", "2017", "2018"] {
            assert!(svg.contains(&format!(">{year}</text>")), "missing {year}");
        }
        for event in ["LotV", "MMR", "f2p"] {
            assert!(svg.contains(&format!(">{event}</text>")), "missing {event}");
        }
        assert!(svg.contains("stroke='#ff6666'"));
        assert!(!svg.contains(">Jan</text>"));
    }

    #[test]
    fn test_x_axis_season_labels() {
        let mut surface = surface();
        let start = timestamp(2016, 7, 12);
        let end = timestamp(2016, 10, 18);
        let units = Units::new(surface.width(), surface.height(), start as f64, end as f64, 100.0, 0.0);
        let seasons = Seasons::new(vec![Season {
            id: 28,
            number: 3,
            year: 2016,
            start,
            end,
            color: "#ff6666".to_string(),
        }]);

        surface.x_axis(&units, XAxis::Season, &seasons).unwrap();

        assert!(surface.canvas().to_svg().contains(">Season 28 (3 - 2016)</text>"));
    }
}
