//! Graph surface: coordinate units, drawing primitives, axes and the
//! interactive chart driver.
//!
//! A [`Graph`] owns one canvas and one chart. It stays in the waiting state
//! until [`Graph::init`] hands it a chart built from loaded data, after which
//! every redraw runs the same cycle: clear, [`Chart::draw_graph`], remember the
//! hover points, draw the crosshair.

mod axis;
mod canvas;
mod driver;
mod settings;
mod surface;
mod svg;
mod units;

pub use axis::*;
pub use canvas::*;
pub use driver::*;
pub use settings::*;
pub use surface::*;
pub use svg::*;
pub use units::*;

use thiserror::Error;

use crate::stats::StatsError;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Graph is not initialized")]
    NotInitialized,

    #[error("No data to draw")]
    NoData,

    #[error("Unknown season {0}")]
    UnknownSeason(i32),

    #[error("Cannot draw a path without points")]
    EmptyPath,

    #[error("Missing setting {0}")]
    MissingSetting(&'static str),

    #[error("Stats error: {0}")]
    Stats(#[from] StatsError),
}
