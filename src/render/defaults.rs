//! Fixed sizes used by the render pass (pixels unless noted)

pub const AXIS_LINE_WIDTH: f64 = 1.0;
pub const GRID_LINE_WIDTH: f64 = 0.5;
pub const TICK_LENGTH: f64 = 5.0;
/// Gap between a tick mark and its label
pub const TICK_LABEL_GAP: f64 = 3.0;
pub const COLORBAR_GAP: f64 = 10.0;
pub const COLORBAR_WIDTH: f64 = 15.0;
/// Number of color steps in a colorbar
pub const COLORBAR_STEPS: usize = 32;
/// Extra top margin (fraction of figure height) reserved for subplot titles
pub const SUBPLOT_TITLE_RESERVE: f64 = 0.04;
