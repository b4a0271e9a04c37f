//! Small value types shared by the figure, the transforms and the backends.
//!
//! Coordinates use `glam::DVec2`. Pixel space has its origin at the top-left
//! corner with y growing downwards; data space is whatever the caller plots.

use std::fmt;

use glam::{DVec2, dvec2};

use crate::errors::PlotError;

/// Which axis a setting applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// RGB color with components in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new_unchecked(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new_unchecked(1.0, 1.0, 1.0);
    pub const RED: Rgb = Rgb::new_unchecked(1.0, 0.0, 0.0);
    pub const GREEN: Rgb = Rgb::new_unchecked(0.0, 0.5, 0.0);
    pub const BLUE: Rgb = Rgb::new_unchecked(0.0, 0.0, 1.0);
    pub const CYAN: Rgb = Rgb::new_unchecked(0.0, 0.75, 0.75);
    pub const MAGENTA: Rgb = Rgb::new_unchecked(0.75, 0.0, 0.75);
    pub const YELLOW: Rgb = Rgb::new_unchecked(0.75, 0.75, 0.0);
    pub const GRID: Rgb = Rgb::new_unchecked(0.85, 0.85, 0.85);

    const fn new_unchecked(r: f64, g: f64, b: f64) -> Self {
        Rgb { r, g, b }
    }

    /// Create a color, clamping each component into [0, 1] (NaN becomes 0)
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        fn clamp(v: f64) -> f64 {
            if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
        }
        Rgb {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
        }
    }

    /// Create a color from 8-bit components
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Rgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Round to 8-bit components
    pub fn to_u8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c * 255.0).round() as u8)
    }

    /// Linear blend towards `other` (`t = 0` is `self`)
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Parse a single-letter color code as used in format strings
    pub fn from_code(code: char) -> Result<Rgb, PlotError> {
        match code {
            'r' => Ok(Rgb::RED),
            'g' => Ok(Rgb::GREEN),
            'b' => Ok(Rgb::BLUE),
            'c' => Ok(Rgb::CYAN),
            'm' => Ok(Rgb::MAGENTA),
            'y' => Ok(Rgb::YELLOW),
            'k' => Ok(Rgb::BLACK),
            'w' => Ok(Rgb::WHITE),
            other => Err(PlotError::UnknownColor {
                token: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_u8();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Closed interval `[min, max]` on one axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Range { min, max }
    }

    /// An empty range that adopts the first value it is expanded with
    pub fn empty() -> Self {
        Range {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// True until something has been included
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Widen to contain `value` (non-finite values are ignored)
    pub fn include(&mut self, value: f64) {
        if value.is_finite() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    /// Widen to contain another range
    pub fn union(&mut self, other: Range) {
        if !other.is_empty() {
            self.include(other.min);
            self.include(other.max);
        }
    }

    /// `None` while empty
    pub fn non_empty(self) -> Option<Range> {
        if self.is_empty() { None } else { Some(self) }
    }

    /// Grow both ends by `fraction` of the span
    pub fn padded(self, fraction: f64) -> Range {
        let pad = self.span() * fraction;
        Range::new(self.min - pad, self.max + pad)
    }

    /// Where `value` sits in the range, 0 at `min` and 1 at `max`
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Axis-aligned rectangle in pixel space
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn top_left(&self) -> DVec2 {
        dvec2(self.left(), self.top())
    }

    pub fn top_right(&self) -> DVec2 {
        dvec2(self.right(), self.top())
    }

    pub fn bottom_left(&self) -> DVec2 {
        dvec2(self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> DVec2 {
        dvec2(self.right(), self.bottom())
    }

    pub fn center(&self) -> DVec2 {
        dvec2(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The four corners, clockwise from the top-left
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }
}

/// Dense row-major grid of `f64`
///
/// Row `j` runs along x, so `get(j, i)` is the sample at `(x[i], y[j])`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Build from row-major data; `data.len()` must be `rows * cols`
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Grid, PlotError> {
        if data.len() != rows * cols {
            return Err(PlotError::shape(
                "grid data",
                format!("{} values for {}x{}", rows * cols, rows, cols),
                format!("{} values", data.len()),
            ));
        }
        Ok(Grid { rows, cols, data })
    }

    /// Build from nested rows; all rows must have the same length
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Grid, PlotError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (j, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(PlotError::shape(
                    "grid row",
                    format!("{} columns", cols),
                    format!("{} columns in row {}", row.len(), j),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Grid {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build by evaluating `f(row, col)` for every cell
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Grid {
        let mut data = Vec::with_capacity(rows * cols);
        for j in 0..rows {
            for i in 0..cols {
                data.push(f(j, i));
            }
        }
        Grid { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Finite extent of the values, `None` if nothing is finite
    pub fn finite_range(&self) -> Option<Range> {
        let mut range = Range::empty();
        for &v in &self.data {
            range.include(v);
        }
        range.non_empty()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Horizontal placement of text relative to its anchor point
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// True when both coordinates are finite
pub(crate) fn finite_point(p: DVec2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
