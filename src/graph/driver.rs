use tracing::{debug, info, warn};

use crate::config::GraphConfig;

use super::canvas::{Canvas, Point};
use super::settings::Settings;
use super::surface::Surface;
use super::GraphError;

/// A point that reacts to the mouse, in graph-area pixels, carrying chart data.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverPoint<P> {
    pub x: f64,
    pub y: f64,
    pub m: P,
}

impl<P> HoverPoint<P> {
    pub fn new(x: f64, y: f64, m: P) -> Self {
        Self { x, y, m }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Tooltip content for a hovered point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    pub rows: Vec<(String, String)>,
    /// Rendered width, keeps the tooltip off the right edge.
    pub width: f64,
}

impl Tooltip {
    pub fn new(width: f64) -> Self {
        Self {
            rows: Vec::new(),
            width,
        }
    }

    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push((label.into(), value.into()));
        self
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// One kind of chart drawn by a [`Graph`].
pub trait Chart {
    /// Data shown in the tooltip of a hover point.
    type Payload: Clone;

    /// Settings changed, recompute the data to draw.
    fn new_settings(&mut self, _settings: &Settings) -> Result<(), GraphError> {
        Ok(())
    }

    /// The graph area changed size.
    fn new_size(&mut self, _width: f64, _height: f64) {}

    /// Draw series and axes, returning the points that react to the mouse.
    fn draw_graph<C: Canvas>(
        &self,
        surface: &mut Surface<C>,
    ) -> Result<Vec<HoverPoint<Self::Payload>>, GraphError>;

    fn update_tooltip(&self, payload: &Self::Payload) -> Tooltip;
}

/// The region a graph lives in: its size, waiting state and tooltip.
pub trait Container {
    /// Current width in logical pixels.
    fn width(&self) -> f64;

    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }

    fn set_waiting(&mut self, waiting: bool);

    /// Show at `left`/`top` canvas pixels.
    fn show_tooltip(&mut self, tooltip: &Tooltip, left: f64, top: f64);

    fn hide_tooltip(&mut self);
}

/// Lifecycle and mouse-over driver for one chart on one canvas.
pub struct Graph<K: Chart, C, N> {
    surface: Surface<C>,
    container: N,
    min_height: f64,
    aspect: f64,
    hover_radius: f64,
    settings: Settings,
    chart: Option<K>,
    points: Vec<HoverPoint<K::Payload>>,
    crosshair: Option<Point>,
}

impl<K: Chart, C: Canvas, N: Container> Graph<K, C, N> {
    /// Bind to a container and canvas; the graph waits until [`Graph::init`].
    pub fn new(container: N, canvas: C, config: &GraphConfig, settings: Settings) -> Self {
        let mut graph = Self {
            surface: Surface::new(canvas, config.edges, config.x_margin),
            container,
            min_height: config.min_height,
            aspect: config.aspect,
            hover_radius: config.hover_radius,
            settings,
            chart: None,
            points: Vec::new(),
            crosshair: None,
        };
        graph.container.set_waiting(true);
        graph.resize_canvas();
        graph
    }

    fn resize_canvas(&mut self) {
        let width = self.container.width();
        let height = self.min_height.max((width * self.aspect).round());
        let dpr = self.container.device_pixel_ratio();
        self.surface.resize(width, height, dpr);
        debug!(width, height, dpr, "Graph canvas resized");
    }

    /// Start drawing `chart`, once its data is available.
    pub fn init(&mut self, mut chart: K) -> Result<(), GraphError> {
        chart.new_size(self.surface.width(), self.surface.height());
        chart.new_settings(&self.settings)?;
        self.chart = Some(chart);
        self.container.set_waiting(false);
        info!(
            width = self.surface.width(),
            height = self.surface.height(),
            "Graph initialized"
        );
        self.redraw()
    }

    pub fn is_initialized(&self) -> bool {
        self.chart.is_some()
    }

    pub fn on_resize(&mut self) -> Result<(), GraphError> {
        self.resize_canvas();
        match self.chart.as_mut() {
            Some(chart) => {
                chart.new_size(self.surface.width(), self.surface.height());
                self.redraw()
            }
            None => Ok(()),
        }
    }

    /// Store a control value; an initialized graph recomputes and redraws.
    pub fn on_control_change(&mut self, name: &str, value: &str) -> Result<(), GraphError> {
        self.settings.set(name, value);
        match self.chart.as_mut() {
            Some(chart) => {
                chart.new_settings(&self.settings)?;
                self.redraw()
            }
            None => Ok(()),
        }
    }

    /// Clear, draw the chart, keep its hover points, draw the crosshair.
    ///
    /// A failed draw leaves a blank canvas with no hover points, no crosshair
    /// and no tooltip.
    pub fn redraw(&mut self) -> Result<(), GraphError> {
        let chart = self.chart.as_ref().ok_or(GraphError::NotInitialized)?;
        self.surface.clear(1.0);
        self.points.clear();
        match chart.draw_graph(&mut self.surface) {
            Ok(points) => self.points = points,
            Err(e) => {
                warn!(error = %e, "Graph draw failed");
                self.crosshair = None;
                self.container.hide_tooltip();
                return Err(e);
            }
        }
        if let Some(at) = self.crosshair {
            self.surface.crosshair(at)?;
        }
        Ok(())
    }

    /// Pointer moved to `offset_x`/`offset_y` canvas pixels.
    pub fn on_mouse_move(&mut self, offset_x: f64, offset_y: f64) -> Result<(), GraphError> {
        if !self.is_initialized() {
            return Ok(());
        }

        let edges = self.surface.edges();
        let mouse_x = offset_x - edges.left;
        let mouse_y = offset_y - edges.top;

        if mouse_x < -edges.left / 2.0
            || mouse_x > self.surface.width() + edges.right / 2.0
            || mouse_y < -edges.top / 2.0
            || mouse_y > self.surface.height() + edges.bottom / 2.0
        {
            return self.mouse_off();
        }

        match nearest(&self.points, mouse_x, mouse_y) {
            Some((index, distance)) if distance < self.hover_radius * self.hover_radius => {
                let point = self.points[index].clone();
                self.mouse_on(point)
            }
            _ => self.mouse_off(),
        }
    }

    fn mouse_on(&mut self, point: HoverPoint<K::Payload>) -> Result<(), GraphError> {
        let chart = self.chart.as_ref().ok_or(GraphError::NotInitialized)?;
        let tooltip = chart.update_tooltip(&point.m);

        let edges = self.surface.edges();
        let left = (point.x + edges.left + 20.0).min(self.surface.canvas_width() - tooltip.width - 10.0);
        let top = point.y + edges.top + 20.0;
        self.container.show_tooltip(&tooltip, left, top);

        self.crosshair = Some(point.point());
        self.redraw()
    }

    fn mouse_off(&mut self) -> Result<(), GraphError> {
        self.container.hide_tooltip();
        self.crosshair = None;
        self.redraw()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn points(&self) -> &[HoverPoint<K::Payload>] {
        &self.points
    }

    pub fn crosshair(&self) -> Option<Point> {
        self.crosshair
    }

    pub fn chart(&self) -> Option<&K> {
        self.chart.as_ref()
    }

    pub fn surface(&self) -> &Surface<C> {
        &self.surface
    }

    pub fn canvas(&self) -> &C {
        self.surface.canvas()
    }

    pub fn container(&self) -> &N {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut N {
        &mut self.container
    }
}

/// Index and squared distance of the point closest to `x`/`y`.
pub fn nearest<P>(points: &[HoverPoint<P>], x: f64, y: f64) -> Option<(usize, f64)> {
    let mut best = None;
    let mut best_distance = f64::INFINITY;
    for (index, point) in points.iter().enumerate() {
        let distance = (point.x - x).powi(2) + (point.y - y).powi(2);
        if distance < best_distance {
            best_distance = distance;
            best = Some(index);
        }
    }
    best.map(|index| (index, best_distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Style, SvgCanvas};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct TestContainer {
        width: f64,
        waiting: bool,
        tooltip: Option<(Tooltip, f64, f64)>,
    }

    impl Container for TestContainer {
        fn width(&self) -> f64 {
            self.width
        }

        fn set_waiting(&mut self, waiting: bool) {
            self.waiting = waiting;
        }

        fn show_tooltip(&mut self, tooltip: &Tooltip, left: f64, top: f64) {
            self.tooltip = Some((tooltip.clone(), left, top));
        }

        fn hide_tooltip(&mut self) {
            self.tooltip = None;
        }
    }

    struct TestChart {
        points: Vec<Point>,
        draws: Rc<Cell<usize>>,
        settings_seen: Rc<Cell<usize>>,
    }

    impl Chart for TestChart {
        type Payload = usize;

        fn new_settings(&mut self, settings: &Settings) -> Result<(), GraphError> {
            self.settings_seen.set(self.settings_seen.get() + 1);
            if settings.get("sx") == Some("sl") {
                // One season: nothing left to draw.
                self.points.clear();
            }
            Ok(())
        }

        fn draw_graph<C: Canvas>(
            &self,
            surface: &mut Surface<C>,
        ) -> Result<Vec<HoverPoint<usize>>, GraphError> {
            self.draws.set(self.draws.get() + 1);
            if self.points.is_empty() {
                return Err(GraphError::NoData);
            }
            surface.gline(&Style::color("#ffffaa"), 2.0, &self.points)?;
            Ok(self
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| HoverPoint::new(p.x, p.y, i))
                .collect())
        }

        fn update_tooltip(&self, payload: &usize) -> Tooltip {
            Tooltip::new(188.0).row("index", payload.to_string())
        }
    }

    struct Fixture {
        graph: Graph<TestChart, SvgCanvas, TestContainer>,
        draws: Rc<Cell<usize>>,
        settings_seen: Rc<Cell<usize>>,
    }

    fn fixture(width: f64) -> Fixture {
        let container = TestContainer {
            width,
            ..Default::default()
        };
        let graph = Graph::new(
            container,
            SvgCanvas::new(),
            &GraphConfig::default(),
            Settings::new().with("v", "2"),
        );
        Fixture {
            graph,
            draws: Rc::new(Cell::new(0)),
            settings_seen: Rc::new(Cell::new(0)),
        }
    }

    fn init(fixture: &mut Fixture, points: Vec<Point>) {
        let chart = TestChart {
            points,
            draws: fixture.draws.clone(),
            settings_seen: fixture.settings_seen.clone(),
        };
        fixture.graph.init(chart).unwrap();
    }

    #[test]
    fn test_waits_until_init() {
        let mut fixture = fixture(1000.0);

        assert!(fixture.graph.container().waiting);
        assert!(!fixture.graph.is_initialized());
        assert!(matches!(fixture.graph.redraw(), Err(GraphError::NotInitialized)));
        fixture.graph.on_mouse_move(100.0, 100.0).unwrap();
        fixture.graph.on_control_change("r", "1").unwrap();

        init(&mut fixture, vec![Point::new(100.0, 100.0)]);

        assert!(!fixture.graph.container().waiting);
        assert_eq!(fixture.draws.get(), 1);
        assert_eq!(fixture.settings_seen.get(), 1);
        assert_eq!(fixture.graph.settings().get("r"), Some("1"));
        assert_eq!(fixture.graph.points().len(), 1);
    }

    #[test]
    fn test_canvas_size() {
        let wide = fixture(2000.0);
        assert_eq!(wide.graph.surface().canvas_height(), 600.0);
        assert_eq!(wide.graph.surface().width(), 2000.0 - 64.0 - 40.0);

        let narrow = fixture(500.0);
        assert_eq!(narrow.graph.surface().canvas_height(), 280.0);
        assert_eq!(narrow.graph.surface().height(), 240.0);
    }

    #[test]
    fn test_hover_radius_boundary() {
        let mut fixture = fixture(1000.0);
        init(&mut fixture, vec![Point::new(100.0, 100.0)]);
        let edges = fixture.graph.surface().edges();

        fixture
            .graph
            .on_mouse_move(edges.left + 115.0, edges.top + 100.0)
            .unwrap();
        let (tooltip, left, top) = fixture.graph.container().tooltip.clone().unwrap();
        assert_eq!(tooltip.get("index"), Some("0"));
        assert_eq!(left, 100.0 + 64.0 + 20.0);
        assert_eq!(top, 100.0 + 20.0 + 20.0);
        assert_eq!(fixture.graph.crosshair(), Some(Point::new(100.0, 100.0)));

        fixture
            .graph
            .on_mouse_move(edges.left + 117.0, edges.top + 100.0)
            .unwrap();
        assert!(fixture.graph.container().tooltip.is_none());
        assert_eq!(fixture.graph.crosshair(), None);
    }

    #[test]
    fn test_tooltip_kept_off_right_edge() {
        let mut fixture = fixture(1000.0);
        let x = fixture.graph.surface().width() - 5.0;
        init(&mut fixture, vec![Point::new(x, 50.0)]);
        let edges = fixture.graph.surface().edges();

        fixture
            .graph
            .on_mouse_move(edges.left + x, edges.top + 50.0)
            .unwrap();

        let (_, left, _) = fixture.graph.container().tooltip.clone().unwrap();
        assert_eq!(left, 1000.0 - 188.0 - 10.0);
    }

    #[test]
    fn test_outside_graph_hides() {
        let mut fixture = fixture(1000.0);
        init(&mut fixture, vec![Point::new(0.0, 0.0)]);

        // Within the tolerance band, close to the point.
        fixture.graph.on_mouse_move(64.0 - 10.0, 20.0).unwrap();
        assert!(fixture.graph.container().tooltip.is_some());

        // Past half the left edge.
        fixture.graph.on_mouse_move(64.0 - 33.0, 20.0).unwrap();
        assert!(fixture.graph.container().tooltip.is_none());
    }

    #[test]
    fn test_redraw_cycle_draws_crosshair_last() {
        let mut fixture = fixture(1000.0);
        init(&mut fixture, vec![Point::new(100.0, 100.0)]);
        fixture.graph.on_mouse_move(164.0, 120.0).unwrap();

        let elements = fixture.graph.canvas().elements();
        assert!(elements[0].starts_with("<rect"));
        assert!(elements[1].contains("#ffffaa"));
        assert_eq!(elements.len(), 4);

        fixture.graph.on_resize().unwrap();
        assert_eq!(fixture.graph.canvas().elements().len(), 4);
    }

    #[test]
    fn test_control_change_recomputes() {
        let mut fixture = fixture(1000.0);
        init(&mut fixture, vec![Point::new(10.0, 10.0)]);
        fixture.graph.on_control_change("r", "1").unwrap();

        assert_eq!(fixture.settings_seen.get(), 2);
        assert_eq!(fixture.draws.get(), 2);
    }

    #[test]
    fn test_failed_redraw_drops_hover_state() {
        let mut fixture = fixture(1000.0);
        init(&mut fixture, vec![Point::new(100.0, 100.0)]);
        let edges = fixture.graph.surface().edges();
        fixture
            .graph
            .on_mouse_move(edges.left + 100.0, edges.top + 100.0)
            .unwrap();
        assert!(fixture.graph.crosshair().is_some());

        let result = fixture.graph.on_control_change("sx", "sl");

        assert!(matches!(result, Err(GraphError::NoData)));
        assert!(fixture.graph.points().is_empty());
        assert_eq!(fixture.graph.crosshair(), None);
        assert!(fixture.graph.container().tooltip.is_none());
        assert_eq!(fixture.graph.canvas().element_count(), 1);

        // Nothing to hover where the old point was.
        assert!(fixture
            .graph
            .on_mouse_move(edges.left + 100.0, edges.top + 100.0)
            .is_err());
        assert_eq!(fixture.graph.crosshair(), None);
        assert!(fixture.graph.container().tooltip.is_none());
    }

    #[test]
    fn test_nearest() {
        let points = vec![
            HoverPoint::new(0.0, 0.0, 'a'),
            HoverPoint::new(10.0, 0.0, 'b'),
            HoverPoint::new(10.0, 10.0, 'c'),
        ];

        assert_eq!(nearest(&points, 9.0, 2.0), Some((1, 5.0)));
        assert_eq!(nearest::<char>(&[], 0.0, 0.0), None);
    }
}
