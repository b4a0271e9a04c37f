//! Marching-squares contour extraction.
//!
//! The grid is row-major: `z.get(j, i)` is the sample at `(x[i], y[j])`.
//! Every cell between rows `j, j+1` and columns `i, i+1` gets a 4-bit code:
//!
//! ```text
//!   bit 3 (j+1,i) ---- top ----- (j+1,i+1) bit 2
//!        |                            |
//!      left                         right
//!        |                            |
//!   bit 0 (j,i) ----- bottom ----- (j,i+1) bit 1
//! ```
//!
//! A bit is set when the corner value is `>= level`. The code indexes a fixed
//! table of edge pairs; the saddles (5 and 10) always produce two segments.

use std::collections::HashMap;

use glam::{DVec2, dvec2};

use crate::errors::PlotError;
use crate::types::{Grid, Range};

/// Corner values closer than this interpolate to the edge midpoint
pub const EDGE_EPSILON: f64 = 1e-12;

/// Auto-generated level count
pub const DEFAULT_LEVELS: usize = 10;

/// Auto-generated level count for quick previews
pub const PREVIEW_LEVELS: usize = 3;

/// A straight piece of a contour, in data coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

/// Connected run of segments
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<DVec2>,
    /// First and last points coincide
    pub closed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Bottom,
    Right,
    Top,
    Left,
}

use Edge::*;

/// Edge pairs per configuration code
#[rustfmt::skip]
const CASES: [&[(Edge, Edge)]; 16] = [
    /*  0 */ &[],
    /*  1 */ &[(Left, Bottom)],
    /*  2 */ &[(Bottom, Right)],
    /*  3 */ &[(Left, Right)],
    /*  4 */ &[(Right, Top)],
    /*  5 */ &[(Left, Bottom), (Right, Top)],
    /*  6 */ &[(Bottom, Top)],
    /*  7 */ &[(Left, Top)],
    /*  8 */ &[(Top, Left)],
    /*  9 */ &[(Bottom, Top)],
    /* 10 */ &[(Bottom, Right), (Top, Left)],
    /* 11 */ &[(Right, Top)],
    /* 12 */ &[(Left, Right)],
    /* 13 */ &[(Bottom, Right)],
    /* 14 */ &[(Left, Bottom)],
    /* 15 */ &[],
];

/// Configuration code of one cell given its corners
/// (bottom-left, bottom-right, top-right, top-left)
#[inline]
pub fn cell_code(corners: [f64; 4], level: f64) -> u8 {
    corners
        .iter()
        .enumerate()
        .fold(0, |code, (bit, &v)| if v >= level { code | (1 << bit) } else { code })
}

/// Where `level` crosses the edge from `p0` (value `v0`) to `p1` (value `v1`).
///
/// Callers always pass the lower-indexed node first, so an edge shared by two
/// cells yields the same point from both.
#[inline]
fn crossing(p0: DVec2, v0: f64, p1: DVec2, v1: f64, level: f64) -> DVec2 {
    let dv = v1 - v0;
    if dv.abs() < EDGE_EPSILON {
        return (p0 + p1) * 0.5;
    }
    let t = ((level - v0) / dv).clamp(0.0, 1.0);
    p0 + (p1 - p0) * t
}

/// Check that `z` is `y.len() x x.len()`
pub fn check_shape(x: &[f64], y: &[f64], z: &Grid) -> Result<(), PlotError> {
    if z.shape() != (y.len(), x.len()) {
        return Err(PlotError::shape(
            "contour Z grid",
            format!("{}x{} (len(y) x len(x))", y.len(), x.len()),
            z,
        ));
    }
    Ok(())
}

/// Trace one level across the whole grid.
///
/// Cells with a non-finite corner produce nothing. The grid must already have
/// the shape checked by [`check_shape`]; mismatched input yields no segments.
pub fn trace(x: &[f64], y: &[f64], z: &Grid, level: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    if check_shape(x, y, z).is_err() || x.len() < 2 || y.len() < 2 {
        return segments;
    }

    for j in 0..y.len() - 1 {
        for i in 0..x.len() - 1 {
            let corners = [z.get(j, i), z.get(j, i + 1), z.get(j + 1, i + 1), z.get(j + 1, i)];
            if corners.iter().any(|v| !v.is_finite()) {
                continue;
            }
            let code = cell_code(corners, level);
            let pairs = CASES[code as usize];
            if pairs.is_empty() {
                continue;
            }

            let [bl, br, tr, tl] = corners;
            let p_bl = dvec2(x[i], y[j]);
            let p_br = dvec2(x[i + 1], y[j]);
            let p_tr = dvec2(x[i + 1], y[j + 1]);
            let p_tl = dvec2(x[i], y[j + 1]);
            let point = |edge: Edge| match edge {
                Bottom => crossing(p_bl, bl, p_br, br, level),
                Right => crossing(p_br, br, p_tr, tr, level),
                Top => crossing(p_tl, tl, p_tr, tr, level),
                Left => crossing(p_bl, bl, p_tl, tl, level),
            };
            for &(from, to) in pairs {
                segments.push(Segment {
                    start: point(from),
                    end: point(to),
                });
            }
        }
    }
    segments
}

/// Evenly spaced levels strictly inside `(range.min, range.max)`
pub fn auto_levels(range: Range, count: usize) -> Vec<f64> {
    if !(range.span() > 0.0) || !range.span().is_finite() {
        return Vec::new();
    }
    let step = range.span() / (count + 1) as f64;
    (1..=count).map(|k| range.min + step * k as f64).collect()
}

/// Levels worth tracing: those strictly inside the finite data range
pub fn levels_in_range(levels: &[f64], range: Range) -> Vec<f64> {
    levels
        .iter()
        .copied()
        .filter(|l| {
            let inside = range.min < *l && *l < range.max;
            if !inside {
                crate::log::debug!(level = *l, min = range.min, max = range.max, "skipping level");
            }
            inside
        })
        .collect()
}

/// Trace every level that lies strictly inside the finite range of `z`.
///
/// Returns `(level, segments)` pairs in the order the levels were given.
pub fn trace_levels(x: &[f64], y: &[f64], z: &Grid, levels: &[f64]) -> Vec<(f64, Vec<Segment>)> {
    let Some(range) = z.finite_range() else {
        return Vec::new();
    };
    levels_in_range(levels, range)
        .into_iter()
        .map(|level| (level, trace(x, y, z, level)))
        .collect()
}

/// Exact-bit key for endpoint matching
fn key(p: DVec2) -> (u64, u64) {
    (p.x.to_bits(), p.y.to_bits())
}

/// Join segments that share endpoints into maximal polylines.
///
/// Crossings on shared edges are bit-identical (see [`trace`]), so endpoints
/// are matched exactly. Degenerate segments are dropped.
pub fn stitch(segments: &[Segment]) -> Vec<Polyline> {
    let mut ends: HashMap<(u64, u64), Vec<usize>> = HashMap::new();
    for (n, seg) in segments.iter().enumerate() {
        if seg.start == seg.end {
            continue;
        }
        ends.entry(key(seg.start)).or_default().push(n);
        ends.entry(key(seg.end)).or_default().push(n);
    }

    let mut used = vec![false; segments.len()];
    let mut lines = Vec::new();

    // Take an unused segment touching `at`, returning its far end
    let mut take = |at: DVec2, used: &mut [bool]| -> Option<DVec2> {
        let candidates = ends.get_mut(&key(at))?;
        let pos = candidates.iter().position(|&n| !used[n])?;
        let n = candidates.swap_remove(pos);
        used[n] = true;
        let seg = segments[n];
        Some(if key(seg.start) == key(at) { seg.end } else { seg.start })
    };

    for n in 0..segments.len() {
        let seg = segments[n];
        if used[n] || seg.start == seg.end {
            continue;
        }
        used[n] = true;

        let mut forward = vec![seg.start, seg.end];
        while let Some(next) = take(*forward.last().unwrap_or(&seg.end), &mut used) {
            forward.push(next);
            if next == seg.start {
                break;
            }
        }

        let closed = forward.len() > 2 && forward.first() == forward.last();
        if !closed {
            let mut backward = Vec::new();
            let mut at = seg.start;
            while let Some(prev) = take(at, &mut used) {
                backward.push(prev);
                at = prev;
            }
            backward.reverse();
            backward.extend(forward);
            forward = backward;
        }

        lines.push(Polyline {
            points: forward,
            closed,
        });
    }
    lines
}
