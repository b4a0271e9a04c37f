//! Pixel rectangles for an R×C subplot grid.

use crate::errors::PlotError;
use crate::types::Rect;

/// Outer margins as fractions of the figure size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Margins {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Same fraction on every side
    pub fn uniform(fraction: f64) -> Self {
        Margins::new(fraction, fraction, fraction, fraction)
    }
}

impl Default for Margins {
    fn default() -> Self {
        // room for tick labels on the left/bottom and the colorbar on the right
        Margins::new(0.10, 0.12, 0.08, 0.10)
    }
}

/// Space between neighbouring cells as fractions of the figure size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gaps {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Gaps {
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Gaps {
            horizontal,
            vertical,
        }
    }
}

impl Default for Gaps {
    fn default() -> Self {
        Gaps::new(0.08, 0.10)
    }
}

/// Grid layout calculator
pub struct SubplotLayout;

impl SubplotLayout {
    /// Rectangles for every cell, row-major from the top-left.
    ///
    /// Cell sizes clamp at zero when margins and gaps eat the whole figure.
    pub fn compute(
        rows: usize,
        cols: usize,
        width: f64,
        height: f64,
        margins: Margins,
        gaps: Gaps,
    ) -> Result<Vec<Rect>, PlotError> {
        if rows == 0 || cols == 0 {
            return Err(PlotError::InvalidGrid { rows, cols });
        }

        let avail_w = width * (1.0 - margins.left - margins.right - gaps.horizontal * (cols - 1) as f64);
        let avail_h = height * (1.0 - margins.top - margins.bottom - gaps.vertical * (rows - 1) as f64);
        let cell_w = (avail_w / cols as f64).max(0.0);
        let cell_h = (avail_h / rows as f64).max(0.0);
        let gap_w = width * gaps.horizontal;
        let gap_h = height * gaps.vertical;

        let mut rects = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                rects.push(Rect::new(
                    width * margins.left + c as f64 * (cell_w + gap_w),
                    height * margins.top + r as f64 * (cell_h + gap_h),
                    cell_w,
                    cell_h,
                ));
            }
        }
        crate::log::debug!(rows, cols, cell_w, cell_h, "computed subplot layout");
        Ok(rects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cell_fills_inside_margins() {
        let rects = SubplotLayout::compute(1, 1, 800.0, 600.0, Margins::uniform(0.1), Gaps::default()).unwrap();
        assert_eq!(rects.len(), 1);
        let r = rects[0];
        assert!((r.x - 80.0).abs() < 1e-9);
        assert!((r.y - 60.0).abs() < 1e-9);
        assert!((r.width - 640.0).abs() < 1e-9);
        assert!((r.height - 480.0).abs() < 1e-9);
    }

    #[test]
    fn cells_and_gaps_fill_available_width() {
        let margins = Margins::new(0.1, 0.05, 0.1, 0.1);
        let gaps = Gaps::new(0.03, 0.04);
        for (rows, cols) in [(1, 1), (2, 3), (3, 2), (4, 5)] {
            let rects = SubplotLayout::compute(rows, cols, 1000.0, 700.0, margins, gaps).unwrap();
            assert_eq!(rects.len(), rows * cols);

            let row0 = &rects[..cols];
            let widths: f64 = row0.iter().map(|r| r.width).sum();
            let expected = 1000.0 * (1.0 - 0.15) - 1000.0 * 0.03 * (cols - 1) as f64;
            assert!((widths - expected).abs() < 1e-6, "{rows}x{cols}");
            // last column ends at the right margin
            assert!((row0[cols - 1].right() - 950.0).abs() < 1e-6);
            // last row ends at the bottom margin
            assert!((rects[rows * cols - 1].bottom() - 630.0).abs() < 1e-6);
        }
    }

    #[test]
    fn order_is_row_major() {
        let rects = SubplotLayout::compute(2, 2, 100.0, 100.0, Margins::uniform(0.0), Gaps::new(0.0, 0.0)).unwrap();
        assert_eq!(rects[1].x, 50.0);
        assert_eq!(rects[1].y, 0.0);
        assert_eq!(rects[2].x, 0.0);
        assert_eq!(rects[2].y, 50.0);
    }

    #[test]
    fn oversized_margins_clamp_to_zero() {
        let rects = SubplotLayout::compute(2, 2, 100.0, 100.0, Margins::uniform(0.6), Gaps::default()).unwrap();
        assert!(rects.iter().all(|r| r.width == 0.0 && r.height == 0.0));
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert_eq!(
            SubplotLayout::compute(0, 3, 100.0, 100.0, Margins::default(), Gaps::default()),
            Err(PlotError::InvalidGrid { rows: 0, cols: 3 })
        );
    }

    #[test]
    fn compute_is_idempotent() {
        let a = SubplotLayout::compute(3, 2, 640.0, 480.0, Margins::default(), Gaps::default());
        let b = SubplotLayout::compute(3, 2, 640.0, 480.0, Margins::default(), Gaps::default());
        assert_eq!(a, b);
    }
}
