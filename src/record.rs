//! Typed plot records.
//!
//! A record is everything needed to draw one `plot`, `contour` or `mesh` call,
//! stored until the figure renders. Shapes are checked by [`Plot::validate`]
//! when the record is added, so the render pass can index without checks.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::colormap::DEFAULT_COLORMAP;
use crate::contour::{self, DEFAULT_LEVELS, PREVIEW_LEVELS};
use crate::dash::LineStyle;
use crate::errors::PlotError;
use crate::legend::LegendEntry;
use crate::scale::ScaleKind;
use crate::style::Marker;
use crate::types::{Grid, Range, Rgb};

/// Handle to a stored record: panel index and position within the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordId {
    pub panel: usize,
    pub index: usize,
}

/// Style shared by all record kinds
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    /// `None` takes the palette color for the record's position
    pub color: Option<Rgb>,
    pub label: Option<String>,
    pub line_style: Option<LineStyle>,
    pub marker: Option<Marker>,
}

/// Value range and map name for a colorbar
#[derive(Clone, Debug, PartialEq)]
pub struct ColorbarSpec {
    pub range: Range,
    pub colormap: String,
}

/// Behaviour common to every record kind
#[enum_dispatch]
pub trait Plot {
    fn style(&self) -> &Style;

    /// Check grid and vector shapes
    fn validate(&self) -> Result<(), PlotError>;

    /// Finite data extent along x and y, restricted to values the axis
    /// scales can represent. Either range may be empty.
    fn extent(&self, x_scale: ScaleKind, y_scale: ScaleKind) -> (Range, Range);

    /// Colorbar this record asks for, if any
    fn colorbar(&self) -> Option<ColorbarSpec> {
        None
    }

    /// Line width override
    fn line_width(&self) -> Option<f64> {
        None
    }

    /// Legend row, if the record is labeled
    fn legend_entry(&self, color: Rgb, default_width: f64) -> Option<LegendEntry> {
        let style = self.style();
        let label = style.label.as_deref().filter(|l| !l.is_empty())?;
        Some(LegendEntry {
            label: label.to_string(),
            color,
            style: style.line_style.clone().unwrap_or_default(),
            marker: style.marker,
            line_width: self.line_width().unwrap_or(default_width),
        })
    }
}

/// Builder methods for the shared [`Style`]
macro_rules! style_builders {
    ($ty:ty) => {
        impl $ty {
            pub fn color(mut self, color: Rgb) -> Self {
                self.style.color = Some(color);
                self
            }

            pub fn label(mut self, label: impl Into<String>) -> Self {
                self.style.label = Some(label.into());
                self
            }

            pub fn line_style(mut self, style: LineStyle) -> Self {
                self.style.line_style = Some(style);
                self
            }

            pub fn marker(mut self, marker: Marker) -> Self {
                self.style.marker = Some(marker);
                self
            }
        }
    };
}

// ============================================================================
// Line
// ============================================================================

/// Ordered `(x, y)` pairs; a NaN coordinate breaks the line
#[derive(Clone, Debug, PartialEq)]
pub struct LinePlot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub width: Option<f64>,
    pub style: Style,
}

impl LinePlot {
    pub fn new(x: impl Into<Vec<f64>>, y: impl Into<Vec<f64>>) -> Self {
        LinePlot {
            x: x.into(),
            y: y.into(),
            width: None,
            style: Style::default(),
        }
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.x.iter().zip(&self.y).map(|(x, y)| dvec2(*x, *y))
    }
}

style_builders!(LinePlot);

impl Plot for LinePlot {
    fn style(&self) -> &Style {
        &self.style
    }

    fn validate(&self) -> Result<(), PlotError> {
        if self.x.len() != self.y.len() {
            return Err(PlotError::shape(
                "line y values",
                format!("{} (len(x))", self.x.len()),
                self.y.len(),
            ));
        }
        Ok(())
    }

    fn extent(&self, x_scale: ScaleKind, y_scale: ScaleKind) -> (Range, Range) {
        let mut xr = Range::empty();
        let mut yr = Range::empty();
        for p in self.points() {
            if x_scale.accepts(p.x) && y_scale.accepts(p.y) {
                xr.include(p.x);
                yr.include(p.y);
            }
        }
        (xr, yr)
    }

    fn line_width(&self) -> Option<f64> {
        self.width
    }
}

// ============================================================================
// Contour
// ============================================================================

/// Iso-lines of `z` over the rectilinear grid `x` × `y`
#[derive(Clone, Debug, PartialEq)]
pub struct ContourPlot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// `len(y)` rows by `len(x)` columns
    pub z: Grid,
    /// Explicit levels; auto levels otherwise
    pub levels: Option<Vec<f64>>,
    pub level_count: usize,
    pub filled: bool,
    pub colormap: String,
    pub colorbar: bool,
    pub style: Style,
}

impl ContourPlot {
    pub fn new(x: impl Into<Vec<f64>>, y: impl Into<Vec<f64>>, z: Grid) -> Self {
        ContourPlot {
            x: x.into(),
            y: y.into(),
            z,
            levels: None,
            level_count: DEFAULT_LEVELS,
            filled: false,
            colormap: DEFAULT_COLORMAP.to_string(),
            colorbar: false,
            style: Style::default(),
        }
    }

    /// Quick-preview variant with fewer auto levels
    pub fn preview(x: impl Into<Vec<f64>>, y: impl Into<Vec<f64>>, z: Grid) -> Self {
        Self::new(x, y, z).level_count(PREVIEW_LEVELS)
    }

    pub fn levels(mut self, levels: impl Into<Vec<f64>>) -> Self {
        self.levels = Some(levels.into());
        self
    }

    pub fn level_count(mut self, count: usize) -> Self {
        self.level_count = count;
        self
    }

    pub fn filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    pub fn colormap(mut self, name: impl Into<String>) -> Self {
        self.colormap = name.into();
        self
    }

    pub fn with_colorbar(mut self, colorbar: bool) -> Self {
        self.colorbar = colorbar;
        self
    }

    /// Finite range of `z`
    pub fn value_range(&self) -> Option<Range> {
        self.z.finite_range()
    }

    /// Levels to trace, in order; out-of-range ones are dropped later
    pub fn resolved_levels(&self) -> Vec<f64> {
        match (&self.levels, self.value_range()) {
            (Some(levels), _) => levels.clone(),
            (None, Some(range)) => contour::auto_levels(range, self.level_count),
            (None, None) => Vec::new(),
        }
    }
}

style_builders!(ContourPlot);

impl Plot for ContourPlot {
    fn style(&self) -> &Style {
        &self.style
    }

    fn validate(&self) -> Result<(), PlotError> {
        contour::check_shape(&self.x, &self.y, &self.z)
    }

    fn extent(&self, x_scale: ScaleKind, y_scale: ScaleKind) -> (Range, Range) {
        (axis_extent(&self.x, x_scale), axis_extent(&self.y, y_scale))
    }

    fn colorbar(&self) -> Option<ColorbarSpec> {
        if !self.colorbar {
            return None;
        }
        Some(ColorbarSpec {
            range: self.value_range()?,
            colormap: self.colormap.clone(),
        })
    }
}

// ============================================================================
// Mesh
// ============================================================================

/// Quadrilateral mesh colored by cell value
#[derive(Clone, Debug, PartialEq)]
pub struct MeshPlot {
    /// Vertex x coordinates, `(rows + 1) × (cols + 1)` of `c`
    pub x: Grid,
    /// Vertex y coordinates, same shape as `x`
    pub y: Grid,
    /// One value per cell
    pub c: Grid,
    /// Explicit color range; the finite range of `c` otherwise
    pub color_range: Option<Range>,
    pub edges: bool,
    pub edge_color: Rgb,
    pub edge_width: f64,
    pub colormap: String,
    pub colorbar: bool,
    pub style: Style,
}

impl MeshPlot {
    pub fn new(x: Grid, y: Grid, c: Grid) -> Self {
        MeshPlot {
            x,
            y,
            c,
            color_range: None,
            edges: false,
            edge_color: Rgb::BLACK,
            edge_width: 0.5,
            colormap: DEFAULT_COLORMAP.to_string(),
            colorbar: false,
            style: Style::default(),
        }
    }

    /// Mesh over an axis-aligned grid given its cell edges
    /// (`len(x_edges) = cols + 1`, `len(y_edges) = rows + 1`)
    pub fn rectilinear(x_edges: &[f64], y_edges: &[f64], c: Grid) -> Self {
        let x = Grid::from_fn(y_edges.len(), x_edges.len(), |_, i| x_edges[i]);
        let y = Grid::from_fn(y_edges.len(), x_edges.len(), |j, _| y_edges[j]);
        Self::new(x, y, c)
    }

    pub fn color_range(mut self, vmin: f64, vmax: f64) -> Self {
        self.color_range = Some(Range::new(vmin, vmax));
        self
    }

    pub fn edges(mut self, color: Rgb, width: f64) -> Self {
        self.edges = true;
        self.edge_color = color;
        self.edge_width = width;
        self
    }

    pub fn colormap(mut self, name: impl Into<String>) -> Self {
        self.colormap = name.into();
        self
    }

    pub fn with_colorbar(mut self, colorbar: bool) -> Self {
        self.colorbar = colorbar;
        self
    }

    /// Explicit range, else the finite range of `c`
    pub fn value_range(&self) -> Option<Range> {
        self.color_range.or_else(|| self.c.finite_range())
    }

    /// The four vertices of cell `(j, i)`:
    /// `(j,i) (j,i+1) (j+1,i+1) (j+1,i)`
    pub fn cell(&self, j: usize, i: usize) -> [DVec2; 4] {
        let v = |j: usize, i: usize| dvec2(self.x.get(j, i), self.y.get(j, i));
        [v(j, i), v(j, i + 1), v(j + 1, i + 1), v(j + 1, i)]
    }

    /// Vertex rows share x and vertex columns share y
    pub fn is_rectilinear(&self) -> bool {
        let (rows, cols) = self.x.shape();
        (0..rows).all(|j| {
            (0..cols).all(|i| self.x.get(j, i) == self.x.get(0, i) && self.y.get(j, i) == self.y.get(j, 0))
        })
    }
}

style_builders!(MeshPlot);

impl Plot for MeshPlot {
    fn style(&self) -> &Style {
        &self.style
    }

    fn validate(&self) -> Result<(), PlotError> {
        let expected = (self.c.rows() + 1, self.c.cols() + 1);
        for (what, grid) in [("mesh X grid", &self.x), ("mesh Y grid", &self.y)] {
            if grid.shape() != expected {
                return Err(PlotError::shape(
                    what,
                    format!("{}x{} (C is {})", expected.0, expected.1, self.c),
                    grid,
                ));
            }
        }
        Ok(())
    }

    fn extent(&self, x_scale: ScaleKind, y_scale: ScaleKind) -> (Range, Range) {
        (
            axis_extent(self.x.values(), x_scale),
            axis_extent(self.y.values(), y_scale),
        )
    }

    fn colorbar(&self) -> Option<ColorbarSpec> {
        if !self.colorbar {
            return None;
        }
        Some(ColorbarSpec {
            range: self.value_range()?,
            colormap: self.colormap.clone(),
        })
    }
}

fn axis_extent(values: &[f64], scale: ScaleKind) -> Range {
    let mut range = Range::empty();
    for v in values.iter().copied().filter(|v| scale.accepts(*v)) {
        range.include(v);
    }
    range
}

// ============================================================================
// Record enum
// ============================================================================

/// One stored plot operation
#[enum_dispatch(Plot)]
#[derive(Clone, Debug, PartialEq)]
pub enum PlotRecord {
    Line(LinePlot),
    Contour(ContourPlot),
    Mesh(MeshPlot),
}

impl PlotRecord {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PlotRecord::Line(_) => "line",
            PlotRecord::Contour(_) => "contour",
            PlotRecord::Mesh(_) => "mesh",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> Grid {
        Grid::from_fn(rows, cols, |j, i| (j * cols + i) as f64)
    }

    // ==================== Line tests ====================

    #[test]
    fn line_rejects_length_mismatch() {
        let line = LinePlot::new(vec![1.0, 2.0], vec![1.0]);
        assert!(matches!(line.validate(), Err(PlotError::ShapeMismatch { .. })));
        assert!(LinePlot::new(Vec::new(), Vec::new()).validate().is_ok());
    }

    #[test]
    fn line_extent_skips_nan_and_non_positive_on_log() {
        let line = LinePlot::new(vec![-1.0, 0.0, 1.0, f64::NAN, 10.0], vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let (x, y) = line.extent(ScaleKind::Linear, ScaleKind::Linear);
        assert_eq!(x, Range::new(-1.0, 10.0));
        assert_eq!(y, Range::new(1.0, 5.0));

        let (x, y) = line.extent(ScaleKind::Log, ScaleKind::Linear);
        assert_eq!(x, Range::new(1.0, 10.0));
        assert_eq!(y, Range::new(3.0, 5.0));
    }

    #[test]
    fn legend_entry_needs_a_label() {
        let line = LinePlot::new(vec![0.0], vec![0.0]);
        assert!(line.legend_entry(Rgb::RED, 1.0).is_none());
        let line = line.label("").marker(Marker::Star);
        assert!(line.legend_entry(Rgb::RED, 1.0).is_none());
        let entry = line.label("data").width(3.0).legend_entry(Rgb::RED, 1.0).unwrap();
        assert_eq!(entry.label, "data");
        assert_eq!(entry.line_width, 3.0);
        assert_eq!(entry.marker, Some(Marker::Star));
    }

    // ==================== Contour tests ====================

    #[test]
    fn contour_checks_orientation() {
        let ok = ContourPlot::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0], grid(2, 3));
        assert!(ok.validate().is_ok());
        let transposed = ContourPlot::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0], grid(3, 2));
        assert!(transposed.validate().is_err());
    }

    #[test]
    fn contour_levels_default_and_preview() {
        let c = ContourPlot::new(vec![0.0, 1.0], vec![0.0, 1.0], Grid::from_rows(&[[0.0, 11.0], [0.0, 0.0]]).unwrap());
        assert_eq!(c.resolved_levels().len(), DEFAULT_LEVELS);
        let p = ContourPlot::preview(vec![0.0, 1.0], vec![0.0, 1.0], c.z.clone());
        assert_eq!(p.resolved_levels().len(), PREVIEW_LEVELS);
        let e = c.clone().levels(vec![5.0]);
        assert_eq!(e.resolved_levels(), vec![5.0]);
    }

    #[test]
    fn contour_colorbar_is_opt_in() {
        let c = ContourPlot::new(vec![0.0, 1.0], vec![0.0, 1.0], grid(2, 2));
        assert!(c.colorbar().is_none());
        let spec = c.with_colorbar(true).colorbar().unwrap();
        assert_eq!(spec.range, Range::new(0.0, 3.0));
        assert_eq!(spec.colormap, "viridis");
    }

    // ==================== Mesh tests ====================

    #[test]
    fn mesh_vertex_grids_are_one_larger() {
        let ok = MeshPlot::new(grid(3, 4), grid(3, 4), grid(2, 3));
        assert!(ok.validate().is_ok());
        let bad_x = MeshPlot::new(grid(2, 3), grid(3, 4), grid(2, 3));
        let err = bad_x.validate().unwrap_err();
        assert_eq!(err.to_string(), "mesh X grid: expected 3x4 (C is 2x3), got 2x3");
        let bad_y = MeshPlot::new(grid(3, 4), grid(4, 3), grid(2, 3));
        assert!(bad_y.validate().is_err());
    }

    #[test]
    fn rectilinear_mesh_cells() {
        let mesh = MeshPlot::rectilinear(&[0.0, 1.0, 3.0], &[10.0, 20.0], grid(1, 2));
        assert!(mesh.validate().is_ok());
        assert!(mesh.is_rectilinear());
        assert_eq!(
            mesh.cell(0, 1),
            [dvec2(1.0, 10.0), dvec2(3.0, 10.0), dvec2(3.0, 20.0), dvec2(1.0, 20.0)]
        );
        let (x, y) = mesh.extent(ScaleKind::Linear, ScaleKind::Linear);
        assert_eq!(x, Range::new(0.0, 3.0));
        assert_eq!(y, Range::new(10.0, 20.0));
    }

    #[test]
    fn skewed_mesh_is_not_rectilinear() {
        let x = Grid::from_rows(&[[0.0, 1.0], [0.5, 1.5]]).unwrap();
        let y = Grid::from_rows(&[[0.0, 0.0], [1.0, 1.0]]).unwrap();
        let mesh = MeshPlot::new(x, y, grid(1, 1));
        assert!(!mesh.is_rectilinear());
    }

    #[test]
    fn mesh_value_range_prefers_explicit() {
        let mesh = MeshPlot::rectilinear(&[0.0, 1.0], &[0.0, 1.0], Grid::new(1, 1, vec![5.0]).unwrap());
        assert_eq!(mesh.value_range(), Some(Range::new(5.0, 5.0)));
        assert_eq!(mesh.color_range(0.0, 10.0).value_range(), Some(Range::new(0.0, 10.0)));
    }

    #[test]
    fn records_dispatch_through_the_enum() {
        let record: PlotRecord = LinePlot::new(vec![0.0, 1.0], vec![2.0, 3.0]).label("a").into();
        assert_eq!(record.kind_name(), "line");
        assert_eq!(record.style().label.as_deref(), Some("a"));
        assert!(record.validate().is_ok());
    }
}
