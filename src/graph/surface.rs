//! Drawing primitives over a [`Canvas`] with graph-area offsets applied.

use super::canvas::{Baseline, Canvas, Edges, Gradient, Image, Point, Rect, Style, TextAlign};
use super::GraphError;

pub const WHITE: &str = "#ffffff";
const BLACK: &str = "#000000";

const LEAGUE_COLORS: [(&str, &str); 6] = [
    ("#5d3621", "#3d1f17"), // bronze
    ("#606060", "#808080"), // silver
    ("#e8e8e8", "#e8b830"), // gold
    ("#a0a0a0", "#e0e0e0"), // platinum
    ("#2080c0", "#3040a0"), // diamond
    ("#078786", "#5aeeee"), // master
];
const GRANDMASTER_COLOR: &str = "#ff0000";
const LEAGUE_STOPS: [f64; 8] = [0.0, 0.2, 0.4, 0.5, 0.6, 0.8, 0.9, 1.0];

/// A canvas divided into edges around a graph area of `width` × `height`.
///
/// Methods prefixed with `g` take points relative to the graph area, the
/// others take canvas coordinates.
pub struct Surface<C> {
    canvas: C,
    edges: Edges,
    x_margin: f64,
    canvas_width: f64,
    canvas_height: f64,
    width: f64,
    height: f64,
    league_styles: Vec<Style>,
}

impl<C: Canvas> Surface<C> {
    pub fn new(canvas: C, edges: Edges, x_margin: f64) -> Self {
        Self {
            canvas,
            edges,
            x_margin,
            canvas_width: 0.0,
            canvas_height: 0.0,
            width: 0.0,
            height: 0.0,
            league_styles: Vec::new(),
        }
    }

    /// Resize the canvas and recompute the graph area and league styles.
    pub fn resize(&mut self, canvas_width: f64, canvas_height: f64, device_pixel_ratio: f64) {
        self.canvas
            .resize(canvas_width, canvas_height, device_pixel_ratio);
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
        self.width = canvas_width - self.edges.left - self.edges.right;
        self.height = canvas_height - self.edges.top - self.edges.bottom;
        self.setup_league_styles();
    }

    fn setup_league_styles(&mut self) {
        let (width, height) = (self.width, self.height);
        let league_style = |color0: &str, color1: &str| {
            Style::Linear(Gradient {
                from: Point::new(0.0, 0.0),
                to: Point::new(width, height),
                stops: LEAGUE_STOPS
                    .iter()
                    .enumerate()
                    .map(|(i, offset)| {
                        let color = if i % 2 == 0 { color0 } else { color1 };
                        (*offset, color.to_string())
                    })
                    .collect(),
            })
        };

        self.league_styles = LEAGUE_COLORS
            .iter()
            .map(|(c0, c1)| league_style(c0, c1))
            .collect();
        self.league_styles.push(Style::color(GRANDMASTER_COLOR));
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    pub fn edges(&self) -> Edges {
        self.edges
    }

    pub fn x_margin(&self) -> f64 {
        self.x_margin
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    pub fn league_style(&self, league: usize) -> Option<&Style> {
        self.league_styles.get(league)
    }

    /// Fill the whole canvas black.
    pub fn clear(&mut self, alpha: f64) {
        let rect = Rect {
            x: 0.0,
            y: 0.0,
            width: self.canvas_width,
            height: self.canvas_height,
        };
        self.canvas.fill_rect(rect, &Style::color(BLACK), alpha);
    }

    /// Stroke `points` shifted by `dx`/`dy`. An empty path is an error.
    pub fn line(
        &mut self,
        style: &Style,
        line_width: f64,
        points: &[Point],
        dx: f64,
        dy: f64,
    ) -> Result<(), GraphError> {
        let points = shifted(points, dx, dy)?;
        self.canvas.stroke_path(&points, style, line_width);
        Ok(())
    }

    pub fn gline(&mut self, style: &Style, line_width: f64, points: &[Point]) -> Result<(), GraphError> {
        self.line(style, line_width, points, self.edges.left, self.edges.top)
    }

    /// Fill the polygon `points` shifted by `dx`/`dy`. An empty path is an error.
    pub fn area(&mut self, style: &Style, points: &[Point], dx: f64, dy: f64) -> Result<(), GraphError> {
        let points = shifted(points, dx, dy)?;
        self.canvas.fill_path(&points, style);
        Ok(())
    }

    pub fn garea(&mut self, style: &Style, points: &[Point]) -> Result<(), GraphError> {
        self.area(style, points, self.edges.left, self.edges.top)
    }

    /// [`Surface::garea`] in the style of a league id, white past grandmaster.
    pub fn league_garea(&mut self, league: usize, points: &[Point]) -> Result<(), GraphError> {
        let style = self
            .league_styles
            .get(league)
            .cloned()
            .unwrap_or_else(|| Style::color(WHITE));
        self.garea(&style, points)
    }

    pub fn text(&mut self, text: &str, at: Point, align: TextAlign, baseline: Baseline) {
        self.canvas.fill_text(text, at, align, baseline, WHITE);
    }

    pub fn colored_text(&mut self, text: &str, at: Point, align: TextAlign, baseline: Baseline, color: &str) {
        self.canvas.fill_text(text, at, align, baseline, color);
    }

    pub fn measure_text(&self, text: &str) -> f64 {
        self.canvas.measure_text(text)
    }

    /// Draw an image centered on a graph-area point.
    pub fn gimage(&mut self, image: &Image, center: Point) {
        let at = Point::new(
            center.x - image.width / 2.0 + self.edges.left,
            center.y - image.height / 2.0 + self.edges.top,
        );
        self.canvas.draw_image(image, at);
    }

    /// Horizontal and vertical lines across the whole canvas through a graph-area point.
    pub fn crosshair(&mut self, at: Point) -> Result<(), GraphError> {
        let x = (at.x + self.edges.left).round() + 0.5;
        let y = (at.y + self.edges.top).round() + 0.5;
        let white = Style::color(WHITE);
        let (w, h) = (self.canvas_width, self.canvas_height);
        self.line(&white, 1.0, &[Point::new(0.0, y), Point::new(w, y)], 0.0, 0.0)?;
        self.line(&white, 1.0, &[Point::new(x, 0.0), Point::new(x, h)], 0.0, 0.0)
    }
}

fn shifted(points: &[Point], dx: f64, dy: f64) -> Result<Vec<Point>, GraphError> {
    if points.is_empty() {
        return Err(GraphError::EmptyPath);
    }
    Ok(points.iter().map(|p| p.offset(dx, dy)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SvgCanvas;

    fn surface() -> Surface<SvgCanvas> {
        let mut surface = Surface::new(SvgCanvas::new(), Edges::default(), 20.0);
        surface.resize(1000.0, 300.0, 1.0);
        surface
    }

    #[test]
    fn test_graph_area() {
        let surface = surface();

        assert_eq!(surface.width(), 896.0);
        assert_eq!(surface.height(), 260.0);
        assert_eq!(surface.canvas().width(), 1000.0);
    }

    #[test]
    fn test_league_styles() {
        let surface = surface();

        let Some(Style::Linear(bronze)) = surface.league_style(0) else {
            panic!("bronze should be a gradient");
        };
        assert_eq!(bronze.to, Point::new(896.0, 260.0));
        assert_eq!(bronze.stops.len(), 8);
        assert_eq!(bronze.stops[0].1, "#5d3621");
        assert_eq!(bronze.stops[1].1, "#3d1f17");
        assert_eq!(bronze.stops[7], (1.0, "#3d1f17".to_string()));
        assert_eq!(surface.league_style(6), Some(&Style::color("#ff0000")));
        assert_eq!(surface.league_style(7), None);
    }

    #[test]
    fn test_gline_offsets_by_edges() {
        let mut surface = surface();
        surface
            .gline(&Style::color(WHITE), 2.0, &[Point::new(0.0, 0.0), Point::new(10.0, 5.0)])
            .unwrap();

        assert_eq!(
            surface.canvas().elements()[0],
            "<polyline points='64,20 74,25' fill='none' stroke='#ffffff' stroke-width='2'/>"
        );
    }

    #[test]
    fn test_crosshair_spans_canvas() {
        let mut surface = surface();
        surface.crosshair(Point::new(10.2, 30.7)).unwrap();

        let elements = surface.canvas().elements();
        assert_eq!(elements.len(), 2);
        assert!(elements[0].contains("points='0,51.5 1000,51.5'"));
        assert!(elements[1].contains("points='74.5,0 74.5,300'"));
    }

    #[test]
    fn test_empty_paths_are_rejected() {
        let mut surface = surface();
        let white = Style::color(WHITE);

        assert!(matches!(surface.gline(&white, 1.0, &[]), Err(GraphError::EmptyPath)));
        assert!(matches!(surface.garea(&white, &[]), Err(GraphError::EmptyPath)));
        assert!(matches!(surface.league_garea(0, &[]), Err(GraphError::EmptyPath)));
        assert_eq!(surface.canvas().element_count(), 0);
    }
}
