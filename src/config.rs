//! Figure-wide defaults, fixed at construction.

use crate::layout::{Gaps, Margins};
use crate::types::Rgb;

/// Stock line colors (the matplotlib "tab10" cycle, first eight)
pub fn default_palette() -> Vec<Rgb> {
    vec![
        Rgb::from_u8(0x1f, 0x77, 0xb4),
        Rgb::from_u8(0xff, 0x7f, 0x0e),
        Rgb::from_u8(0x2c, 0xa0, 0x2c),
        Rgb::from_u8(0xd6, 0x27, 0x28),
        Rgb::from_u8(0x94, 0x67, 0xbd),
        Rgb::from_u8(0x8c, 0x56, 0x4b),
        Rgb::from_u8(0xe3, 0x77, 0xc2),
        Rgb::from_u8(0x7f, 0x7f, 0x7f),
    ]
}

/// Configuration a [`Figure`](crate::Figure) is created with
#[derive(Clone, Debug, PartialEq)]
pub struct FigureConfig {
    /// Line colors cycled by record position
    pub palette: Vec<Rgb>,
    /// Stroke width in pixels for lines without their own width
    pub line_width: f64,
    pub margins: Margins,
    pub gaps: Gaps,
    /// Marker size in pixels
    pub marker_size: f64,
    /// Nominal font size in pixels, used for label offsets
    pub font_size: f64,
    /// Rough number of ticks per axis
    pub tick_target: usize,
    /// Maximum records per figure; `None` is unlimited
    pub max_records: Option<usize>,
    /// Auto-limit padding as a fraction of the transformed span
    pub padding: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        FigureConfig {
            palette: default_palette(),
            line_width: 1.5,
            margins: Margins::default(),
            gaps: Gaps::default(),
            marker_size: 6.0,
            font_size: 12.0,
            tick_target: 5,
            max_records: None,
            padding: 0.05,
        }
    }
}

impl FigureConfig {
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = Some(max);
        self
    }

    pub fn with_palette(mut self, palette: Vec<Rgb>) -> Self {
        self.palette = palette;
        self
    }

    /// Palette entry for the `index`-th record of a panel
    pub fn palette_color(&self, index: usize) -> Rgb {
        if self.palette.is_empty() {
            return Rgb::BLACK;
        }
        self.palette[index % self.palette.len()]
    }
}
