//! Immediate-mode drawing capability the graph surface renders through.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A linear gradient between two points, stops as `(offset, color)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub from: Point,
    pub to: Point,
    pub stops: Vec<(f64, String)>,
}

/// Fill or stroke style.
#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    Color(String),
    Linear(Gradient),
}

impl Style {
    pub fn color(color: &str) -> Self {
        Style::Color(color.to_string())
    }
}

impl From<&str> for Style {
    fn from(color: &str) -> Self {
        Style::color(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Top,
    Middle,
    Bottom,
}

/// An already loaded image, referenced by source.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub src: String,
    pub width: f64,
    pub height: f64,
}

/// Spacing from the canvas border to the graph area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Edges {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 40.0,
            bottom: 20.0,
            left: 64.0,
        }
    }
}

/// 2D drawing target. Coordinates are logical pixels from the top left corner
/// of the canvas; implementations scale by the device pixel ratio themselves.
pub trait Canvas {
    /// Resize to `width` × `height` logical pixels, drops everything drawn.
    fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64);

    fn fill_rect(&mut self, rect: Rect, style: &Style, alpha: f64);

    /// Stroke an open polyline. `points` is never empty.
    fn stroke_path(&mut self, points: &[Point], style: &Style, line_width: f64);

    /// Fill the closed polygon through `points`, which is never empty.
    fn fill_path(&mut self, points: &[Point], style: &Style);

    fn fill_text(&mut self, text: &str, at: Point, align: TextAlign, baseline: Baseline, color: &str);

    /// Width in pixels `text` would take with the label font.
    fn measure_text(&self, text: &str) -> f64;

    fn draw_image(&mut self, image: &Image, at: Point);
}
