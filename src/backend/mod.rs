//! The drawing capability a figure renders into.
//!
//! Backends receive pixel coordinates (origin top-left, y down). All scale
//! transforms and subplot mapping happen before a primitive reaches them.
//! Bulk image fills are an optional extension reached through
//! [`Backend::heatmap`]; backends without it get one quad per cell.

pub mod recording;

pub use recording::{CommandLog, DrawCommand, RecordingBackend};

use glam::DVec2;

use crate::errors::PlotError;
use crate::scale::ScaleState;
use crate::style::Marker;
use crate::types::{Grid, Rect, Rgb, TextAnchor};

/// A panel's pixel rectangle and the resolved axis bounds drawn into it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub x: ScaleState,
    pub y: ScaleState,
}

/// Value → color lookup handed to bulk fills
pub trait ColorLookup {
    fn lookup(&self, value: f64) -> Rgb;
}

/// Optional bulk image fill
pub trait HeatmapFill {
    /// Fill a rectilinear grid of cells.
    ///
    /// `x_centers` and `y_centers` are pixel positions of the cell centers;
    /// `values.get(j, i)` belongs to `(x_centers[i], y_centers[j])`.
    fn fill_heatmap(
        &mut self,
        x_centers: &[f64],
        y_centers: &[f64],
        values: &Grid,
        vmin: f64,
        vmax: f64,
        colors: &dyn ColorLookup,
    );
}

/// Primitive drawing operations
pub trait Backend {
    /// Start a new page of `width × height` pixels
    fn begin(&mut self, width: f64, height: f64);

    /// Panel about to be drawn
    fn set_viewport(&mut self, viewport: &Viewport);

    fn set_color(&mut self, color: Rgb);

    fn set_line_width(&mut self, width: f64);

    fn draw_line(&mut self, a: DVec2, b: DVec2);

    fn draw_marker(&mut self, at: DVec2, marker: Marker, size: f64);

    fn fill_quad(&mut self, quad: &[DVec2; 4]);

    fn draw_quad_outline(&mut self, quad: &[DVec2; 4], width: f64);

    fn draw_text(&mut self, at: DVec2, text: &str, anchor: TextAnchor);

    /// Bulk fill extension, if supported
    fn heatmap(&mut self) -> Option<&mut dyn HeatmapFill> {
        None
    }

    /// Where `show` sends the output
    fn default_target(&self) -> String {
        "figure".to_string()
    }

    /// Flush everything drawn since `begin` to `target`
    fn finalize(&mut self, target: &str) -> Result<(), PlotError>;
}
