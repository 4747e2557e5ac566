//! SVG document recorder implementing [`Canvas`].

use std::fmt::Write as _;

use super::canvas::{Baseline, Canvas, Image, Point, Rect, Style, TextAlign};

const FONT_FAMILY: &str = "sans-serif";
const FONT_SIZE: f64 = 13.0;

/// Average advance of the 13px label font.
const CHAR_WIDTH: f64 = 7.0;

/// Records drawing calls as SVG elements.
#[derive(Debug, Clone, Default)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    defs: Vec<String>,
    body: Vec<String>,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of elements drawn since the last resize.
    pub fn element_count(&self) -> usize {
        self.body.len()
    }

    pub fn elements(&self) -> &[String] {
        &self.body
    }

    fn paint(&mut self, style: &Style) -> String {
        match style {
            Style::Color(color) => escape(color),
            Style::Linear(gradient) => {
                let id = format!("g{}", self.defs.len());
                let mut def = format!(
                    "<linearGradient id='{id}' gradientUnits='userSpaceOnUse' x1='{}' y1='{}' x2='{}' y2='{}'>",
                    num(gradient.from.x),
                    num(gradient.from.y),
                    num(gradient.to.x),
                    num(gradient.to.y)
                );
                for (offset, color) in &gradient.stops {
                    let _ = write!(
                        def,
                        "<stop offset='{}' stop-color='{}'/>",
                        num(*offset),
                        escape(color)
                    );
                }
                def.push_str("</linearGradient>");
                self.defs.push(def);
                format!("url(#{id})")
            }
        }
    }

    /// The complete document.
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>\n",
            w = num(self.width),
            h = num(self.height)
        );
        if !self.defs.is_empty() {
            svg.push_str("  <defs>\n");
            for def in &self.defs {
                let _ = writeln!(svg, "    {def}");
            }
            svg.push_str("  </defs>\n");
        }
        for element in &self.body {
            let _ = writeln!(svg, "  {element}");
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl Canvas for SvgCanvas {
    fn resize(&mut self, width: f64, height: f64, _device_pixel_ratio: f64) {
        // Vector output, no backing store to scale.
        self.width = width;
        self.height = height;
        self.defs.clear();
        self.body.clear();
    }

    fn fill_rect(&mut self, rect: Rect, style: &Style, alpha: f64) {
        let covers = rect.x <= 0.0
            && rect.y <= 0.0
            && rect.x + rect.width >= self.width
            && rect.y + rect.height >= self.height;
        if covers && alpha >= 1.0 {
            // Everything below is hidden.
            self.defs.clear();
            self.body.clear();
        }
        let fill = self.paint(style);
        let opacity = if alpha < 1.0 {
            format!(" fill-opacity='{}'", num(alpha))
        } else {
            String::new()
        };
        self.body.push(format!(
            "<rect x='{}' y='{}' width='{}' height='{}' fill='{fill}'{opacity}/>",
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height)
        ));
    }

    fn stroke_path(&mut self, points: &[Point], style: &Style, line_width: f64) {
        let stroke = self.paint(style);
        self.body.push(format!(
            "<polyline points='{}' fill='none' stroke='{stroke}' stroke-width='{}'/>",
            point_list(points),
            num(line_width)
        ));
    }

    fn fill_path(&mut self, points: &[Point], style: &Style) {
        let fill = self.paint(style);
        self.body.push(format!(
            "<polygon points='{}' fill='{fill}'/>",
            point_list(points)
        ));
    }

    fn fill_text(&mut self, text: &str, at: Point, align: TextAlign, baseline: Baseline, color: &str) {
        let anchor = match align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let dominant = match baseline {
            Baseline::Top => "hanging",
            Baseline::Middle => "middle",
            Baseline::Bottom => "text-after-edge",
        };
        self.body.push(format!(
            "<text x='{}' y='{}' fill='{}' font-family='{FONT_FAMILY}' font-size='{FONT_SIZE}' text-anchor='{anchor}' dominant-baseline='{dominant}'>{}</text>",
            num(at.x),
            num(at.y),
            escape(color),
            escape(text)
        ));
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * CHAR_WIDTH
    }

    fn draw_image(&mut self, image: &Image, at: Point) {
        self.body.push(format!(
            "<image href='{}' x='{}' y='{}' width='{}' height='{}'/>",
            escape(&image.src),
            num(at.x),
            num(at.y),
            num(image.width),
            num(image.height)
        ));
    }
}

/// Shortest decimal form, at most two fraction digits.
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

fn point_list(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::canvas::Gradient;

    #[test]
    fn test_records_elements() {
        let mut canvas = SvgCanvas::new();
        canvas.resize(300.0, 280.0, 2.0);
        canvas.fill_rect(
            Rect {
                x: 0.0,
                y: 0.0,
                width: 300.0,
                height: 280.0,
            },
            &Style::color("#000000"),
            1.0,
        );
        canvas.stroke_path(
            &[Point::new(0.5, 1.0), Point::new(10.25, 20.0)],
            &"#ffffff".into(),
            2.0,
        );
        canvas.fill_text("<50%", Point::new(39.0, 20.0), TextAlign::Right, Baseline::Middle, "#ffffff");

        let svg = canvas.to_svg();
        assert!(svg.starts_with("<svg xmlns='http://www.w3.org/2000/svg' width='300' height='280'"));
        assert!(svg.contains("<polyline points='0.5,1 10.25,20' fill='none' stroke='#ffffff' stroke-width='2'/>"));
        assert!(svg.contains("text-anchor='end'"));
        assert!(svg.contains(">&lt;50%</text>"));
        assert_eq!(canvas.element_count(), 3);
    }

    #[test]
    fn test_gradient_goes_to_defs() {
        let mut canvas = SvgCanvas::new();
        canvas.resize(100.0, 100.0, 1.0);
        let style = Style::Linear(Gradient {
            from: Point::new(0.0, 0.0),
            to: Point::new(100.0, 100.0),
            stops: vec![(0.0, "#5d3621".to_string()), (1.0, "#3d1f17".to_string())],
        });
        canvas.fill_path(
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
            &style,
        );

        let svg = canvas.to_svg();
        assert!(svg.contains("<linearGradient id='g0'"));
        assert!(svg.contains("<stop offset='1' stop-color='#3d1f17'/>"));
        assert!(svg.contains("fill='url(#g0)'"));
    }

    #[test]
    fn test_resize_clears() {
        let mut canvas = SvgCanvas::new();
        canvas.resize(100.0, 100.0, 1.0);
        canvas.stroke_path(&[Point::new(0.0, 0.0)], &"#ffffff".into(), 1.0);
        canvas.resize(200.0, 280.0, 1.0);

        assert_eq!(canvas.element_count(), 0);
        assert_eq!(canvas.width(), 200.0);
    }

    #[test]
    fn test_opaque_clear_drops_hidden_elements() {
        let mut canvas = SvgCanvas::new();
        canvas.resize(100.0, 100.0, 1.0);
        canvas.stroke_path(&[Point::new(0.0, 0.0)], &"#ffffff".into(), 1.0);
        let all = Rect {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        };

        canvas.fill_rect(all, &Style::color("#000000"), 0.5);
        assert_eq!(canvas.element_count(), 2);

        canvas.fill_rect(all, &Style::color("#000000"), 1.0);
        assert_eq!(canvas.element_count(), 1);
    }

    #[test]
    fn test_num() {
        assert_eq!(num(64.0), "64");
        assert_eq!(num(-0.5), "-0.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
    }
}
