//! Per-panel render context: resolved scales plus the pixel mapping

use glam::{DVec2, dvec2};

use crate::backend::Viewport;
use crate::colormap::Colormap;
use crate::config::FigureConfig;
use crate::scale::ScaleState;
use crate::types::{Range, Rect, Rgb};

/// Immutable state for drawing one panel.
///
/// Built fresh for every panel of every render; nothing on the figure is
/// touched while a panel is drawn.
pub struct PanelContext<'a> {
    pub area: Rect,
    pub x: ScaleState,
    pub y: ScaleState,
    pub config: &'a FigureConfig,
    pub colormap: &'a dyn Colormap,
}

impl<'a> PanelContext<'a> {
    pub fn new(
        area: Rect,
        x: ScaleState,
        y: ScaleState,
        config: &'a FigureConfig,
        colormap: &'a dyn Colormap,
    ) -> Self {
        PanelContext {
            area,
            x,
            y,
            config,
            colormap,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            area: self.area,
            x: self.x,
            y: self.y,
        }
    }

    /// Data point → pixel. Values the scale cannot represent come out NaN.
    #[inline]
    pub fn to_px(&self, p: DVec2) -> DVec2 {
        self.transformed_to_px(dvec2(self.x.apply(p.x), self.y.apply(p.y)))
    }

    /// Already-transformed point → pixel
    #[inline]
    pub fn transformed_to_px(&self, t: DVec2) -> DVec2 {
        let fx = self.x.transformed.normalize(t.x);
        let fy = self.y.transformed.normalize(t.y);
        dvec2(
            self.area.x + fx * self.area.width,
            self.area.bottom() - fy * self.area.height,
        )
    }

    /// Pixel x of a transformed x value
    pub fn px_x(&self, tx: f64) -> f64 {
        self.area.x + self.x.transformed.normalize(tx) * self.area.width
    }

    /// Pixel y of a transformed y value
    pub fn px_y(&self, ty: f64) -> f64 {
        self.area.bottom() - self.y.transformed.normalize(ty) * self.area.height
    }

    pub fn color_for(&self, value: f64, range: Range, colormap: &str) -> Rgb {
        self.colormap.value_to_rgb(value, range.min, range.max, colormap)
    }
}
