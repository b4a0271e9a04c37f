//! The figure: records, panels, axis settings and the render state machine.
//!
//! Every mutating call is O(1) bookkeeping; nothing reaches a backend until
//! [`Figure::render`], [`Figure::save`] or [`Figure::show`]. Invalid input never
//! panics and never returns an error from the mutating call itself: the
//! figure keeps the first problem as its sticky error (see [`Figure::error`])
//! and the call does nothing.

use crate::backend::Backend;
use crate::colormap::{BuiltinColormaps, Colormap};
use crate::config::FigureConfig;
use crate::errors::PlotError;
use crate::layout::{Gaps, Margins, SubplotLayout};
use crate::legend::{BoxLegend, LegendRenderer};
use crate::record::{ContourPlot, LinePlot, MeshPlot, Plot, PlotRecord, RecordId};
use crate::render;
use crate::render::defaults::SUBPLOT_TITLE_RESERVE;
use crate::scale::{AxisState, ScaleKind, ScaleState};
use crate::style::FormatSpec;
use crate::types::{Axis, Range, Rect, Rgb};

/// Where a figure is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FigureState {
    /// Nothing configured or added yet
    #[default]
    Empty,
    /// Changed since the last render
    Populated,
    /// The owned backend holds an up-to-date render
    Rendered,
}

impl FigureState {
    /// After any mutation
    pub fn mutated(self) -> Self {
        FigureState::Populated
    }

    /// After a full render pass
    pub fn rendered(self) -> Self {
        FigureState::Rendered
    }

    /// After the output side changed; a finished render is stale
    pub fn backend_changed(self) -> Self {
        match self {
            FigureState::Rendered => FigureState::Populated,
            other => other,
        }
    }
}

/// One set of axes: the whole figure, or one subplot
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub(crate) records: Vec<PlotRecord>,
    pub(crate) title: Option<String>,
    pub(crate) x_label: Option<String>,
    pub(crate) y_label: Option<String>,
    pub(crate) legend: bool,
    pub(crate) grid: bool,
    pub(crate) x_axis: AxisState,
    pub(crate) y_axis: AxisState,
}

impl Default for Panel {
    fn default() -> Self {
        Panel {
            records: Vec::new(),
            title: None,
            x_label: None,
            y_label: None,
            legend: false,
            grid: false,
            x_axis: AxisState::new(Axis::X),
            y_axis: AxisState::new(Axis::Y),
        }
    }
}

impl Panel {
    pub fn records(&self) -> &[PlotRecord] {
        &self.records
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn label(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::X => self.x_label.as_deref(),
            Axis::Y => self.y_label.as_deref(),
        }
    }

    pub fn legend(&self) -> bool {
        self.legend
    }

    pub fn grid(&self) -> bool {
        self.grid
    }

    pub fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::X => &self.x_axis,
            Axis::Y => &self.y_axis,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisState {
        match axis {
            Axis::X => &mut self.x_axis,
            Axis::Y => &mut self.y_axis,
        }
    }

    /// Union of the record extents under the current scales
    pub fn data_extent(&self) -> (Option<Range>, Option<Range>) {
        let mut x = Range::empty();
        let mut y = Range::empty();
        for record in &self.records {
            let (rx, ry) = record.extent(self.x_axis.kind(), self.y_axis.kind());
            x.union(rx);
            y.union(ry);
        }
        (x.non_empty(), y.non_empty())
    }

    /// Resolve both axes for one render
    pub fn resolve(&self, padding: f64) -> (ScaleState, ScaleState) {
        let (x, y) = self.data_extent();
        let xs = self.x_axis.resolve(x, padding);
        let ys = self.y_axis.resolve(y, padding);
        crate::log::debug!(
            x_min = xs.data.min,
            x_max = xs.data.max,
            y_min = ys.data.min,
            y_max = ys.data.max,
            "resolved panel ranges"
        );
        (xs, ys)
    }

    /// Explicit record color, else the palette entry for its position
    pub fn record_color(&self, index: usize, config: &FigureConfig) -> Rgb {
        self.records
            .get(index)
            .and_then(|r| r.style().color)
            .unwrap_or_else(|| config.palette_color(index))
    }
}

/// A 2D figure accumulating plot records for one deferred render
pub struct Figure {
    width: f64,
    height: f64,
    config: FigureConfig,
    panels: Vec<Panel>,
    /// `(rows, cols)` once a subplot grid was declared
    grid: Option<(usize, usize)>,
    current: usize,
    margins: Margins,
    gaps: Gaps,
    rects: Vec<Rect>,
    state: FigureState,
    error: Option<PlotError>,
    warnings: Vec<PlotError>,
    record_count: usize,
    backend: Option<Box<dyn Backend>>,
    colormap: Box<dyn Colormap>,
    legend: Box<dyn LegendRenderer>,
}

impl std::fmt::Debug for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Figure")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("grid", &self.grid)
            .field("current", &self.current)
            .field("state", &self.state)
            .field("records", &self.record_count)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl Figure {
    /// Empty single-panel figure with the stock configuration
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_config(width, height, FigureConfig::default())
    }

    pub fn with_config(width: f64, height: f64, config: FigureConfig) -> Self {
        let margins = config.margins;
        let gaps = config.gaps;
        let legend = BoxLegend {
            font_size: config.font_size,
            marker_size: config.marker_size,
            ..BoxLegend::default()
        };
        let mut figure = Figure {
            width,
            height,
            config,
            panels: vec![Panel::default()],
            grid: None,
            current: 0,
            margins,
            gaps,
            rects: Vec::new(),
            state: FigureState::Empty,
            error: None,
            warnings: Vec::new(),
            record_count: 0,
            backend: None,
            colormap: Box::new(BuiltinColormaps),
            legend: Box::new(legend),
        };
        figure.relayout();
        figure
    }

    // ========================================================================
    // Bookkeeping
    // ========================================================================

    /// Record a caller error; the first one sticks until taken. Warnings
    /// go to `warnings()` and never block a render.
    fn fail(&mut self, error: PlotError) {
        if error.is_warning() {
            self.warnings.push(error);
            return;
        }
        crate::log::warn!(error = %error, "figure call ignored");
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn touch(&mut self) {
        self.state = self.state.mutated();
    }

    fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panels[self.current]
    }

    fn grid_shape(&self) -> (usize, usize) {
        self.grid.unwrap_or((1, 1))
    }

    /// Margins in effect: the configured ones plus the title reserve when a
    /// subplot grid is declared
    pub fn effective_margins(&self) -> Margins {
        let mut margins = self.margins;
        if self.grid.is_some() {
            margins.top += SUBPLOT_TITLE_RESERVE;
        }
        margins
    }

    fn relayout(&mut self) {
        let (rows, cols) = self.grid_shape();
        match SubplotLayout::compute(rows, cols, self.width, self.height, self.effective_margins(), self.gaps) {
            Ok(rects) => self.rects = rects,
            Err(e) => self.fail(e),
        }
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// Store a record on the current panel.
    ///
    /// Returns `None` when the record is rejected (shape error, sticky) or
    /// dropped (capacity, warning).
    pub fn add(&mut self, record: impl Into<PlotRecord>) -> Option<RecordId> {
        let record = record.into();
        if let Err(e) = record.validate() {
            self.fail(e);
            return None;
        }
        if let Some(capacity) = self.config.max_records {
            if self.record_count >= capacity {
                crate::log::warn!(capacity, kind = record.kind_name(), "record capacity reached, dropping record");
                self.fail(PlotError::CapacityExceeded { capacity });
                return None;
            }
        }

        let panel = self.current;
        let records = &mut self.panels[panel].records;
        records.push(record);
        let id = RecordId {
            panel,
            index: records.len() - 1,
        };
        self.record_count += 1;
        self.touch();
        Some(id)
    }

    pub fn add_line(&mut self, line: LinePlot) -> Option<RecordId> {
        self.add(line)
    }

    pub fn add_contour(&mut self, contour: ContourPlot) -> Option<RecordId> {
        self.add(contour)
    }

    pub fn add_mesh(&mut self, mesh: MeshPlot) -> Option<RecordId> {
        self.add(mesh)
    }

    /// Solid line in the next palette color
    pub fn plot(&mut self, xs: &[f64], ys: &[f64]) -> Option<RecordId> {
        self.add_line(LinePlot::new(xs, ys))
    }

    /// Line styled by a format string such as `"r--o"`
    pub fn plot_fmt(&mut self, xs: &[f64], ys: &[f64], format: &str) -> Option<RecordId> {
        let spec: FormatSpec = match format.parse() {
            Ok(spec) => spec,
            Err(e) => {
                self.fail(e);
                return None;
            }
        };
        let mut line = LinePlot::new(xs, ys).line_style(spec.line_style());
        if let Some(color) = spec.color {
            line = line.color(color);
        }
        if let Some(marker) = spec.marker {
            line = line.marker(marker);
        }
        self.add_line(line)
    }

    // ========================================================================
    // Axes
    // ========================================================================

    pub fn set_scale(&mut self, axis: Axis, kind: ScaleKind) {
        self.panel_mut().axis_mut(axis).set_kind(kind);
        self.touch();
    }

    /// Scale by name: `linear`, `log` or `symlog`
    pub fn set_scale_named(&mut self, axis: Axis, name: &str) {
        match name.parse::<ScaleKind>() {
            Ok(kind) => self.set_scale(axis, kind),
            Err(e) => self.fail(e),
        }
    }

    pub fn set_symlog_threshold(&mut self, axis: Axis, threshold: f64) {
        match self.panel_mut().axis_mut(axis).set_threshold(threshold) {
            Ok(()) => self.touch(),
            Err(e) => self.fail(e),
        }
    }

    /// Pin an axis; explicit limits are drawn unpadded
    pub fn set_limits(&mut self, axis: Axis, min: f64, max: f64) {
        match self.panel_mut().axis_mut(axis).set_limits(min, max) {
            Ok(()) => self.touch(),
            Err(e) => self.fail(e),
        }
    }

    /// Back to limits derived from the data
    pub fn auto_limits(&mut self, axis: Axis) {
        self.panel_mut().axis_mut(axis).clear_limits();
        self.touch();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.panel_mut().title = Some(title.into());
        self.touch();
    }

    pub fn set_label(&mut self, axis: Axis, text: impl Into<String>) {
        let text = Some(text.into());
        match axis {
            Axis::X => self.panel_mut().x_label = text,
            Axis::Y => self.panel_mut().y_label = text,
        }
        self.touch();
    }

    pub fn set_legend(&mut self, enabled: bool) {
        self.panel_mut().legend = enabled;
        self.touch();
    }

    pub fn set_grid(&mut self, enabled: bool) {
        self.panel_mut().grid = enabled;
        self.touch();
    }

    // ========================================================================
    // Subplots
    // ========================================================================

    /// Replace the panels with a fresh `rows × cols` grid and target (0, 0)
    pub fn subplots(&mut self, rows: usize, cols: usize) {
        if rows == 0 || cols == 0 {
            self.fail(PlotError::InvalidGrid { rows, cols });
            return;
        }
        self.panels = vec![Panel::default(); rows * cols];
        self.grid = Some((rows, cols));
        self.current = 0;
        self.record_count = 0;
        self.relayout();
        self.touch();
    }

    /// Direct later calls at the subplot in `row`, `col`
    pub fn select_subplot(&mut self, row: usize, col: usize) {
        let (rows, cols) = self.grid_shape();
        if row >= rows || col >= cols {
            self.fail(PlotError::InvalidSubplot { row, col, rows, cols });
            return;
        }
        self.current = row * cols + col;
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
        self.relayout();
        self.touch();
    }

    pub fn set_gaps(&mut self, gaps: Gaps) {
        self.gaps = gaps;
        self.relayout();
        self.touch();
    }

    /// Pixel rectangle of every panel, row-major
    pub fn subplot_rects(&self) -> &[Rect] {
        &self.rects
    }

    // ========================================================================
    // Collaborators
    // ========================================================================

    pub fn set_backend(&mut self, backend: impl Backend + 'static) {
        self.backend = Some(Box::new(backend));
        self.state = self.state.backend_changed();
    }

    pub fn set_colormap(&mut self, colormap: impl Colormap + 'static) {
        self.colormap = Box::new(colormap);
        self.state = self.state.backend_changed();
    }

    pub fn set_legend_renderer(&mut self, legend: impl LegendRenderer + 'static) {
        self.legend = Box::new(legend);
        self.state = self.state.backend_changed();
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Draw the whole figure into `backend` without touching figure state
    pub fn render_to(&self, backend: &mut dyn Backend) {
        if let Some(error) = &self.error {
            crate::log::warn!(error = %error, "rendering with a pending error");
        }
        render::render_figure(self, backend);
    }

    /// Render into the owned backend unless it already holds this figure
    pub fn render(&mut self) -> Result<(), PlotError> {
        if self.state == FigureState::Rendered {
            return Ok(());
        }
        let mut backend = self.backend.take().ok_or(PlotError::NoBackend)?;
        self.render_to(backend.as_mut());
        self.backend = Some(backend);
        self.state = self.state.rendered();
        Ok(())
    }

    /// Render if needed, then let the backend write `target`
    pub fn save(&mut self, target: &str) -> Result<(), PlotError> {
        self.render()?;
        let backend = self.backend.as_mut().ok_or(PlotError::NoBackend)?;
        crate::log::info!(output = target, "finalizing figure");
        backend.finalize(target)
    }

    /// [`Figure::save`] to the backend's default target
    pub fn show(&mut self) -> Result<(), PlotError> {
        let target = self
            .backend
            .as_ref()
            .ok_or(PlotError::NoBackend)?
            .default_target();
        self.save(&target)
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn config(&self) -> &FigureConfig {
        &self.config
    }

    pub fn state(&self) -> FigureState {
        self.state
    }

    /// First caller error since the last [`Figure::take_error`]
    pub fn error(&self) -> Option<&PlotError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<PlotError> {
        self.error.take()
    }

    /// Non-fatal problems, oldest first
    pub fn warnings(&self) -> &[PlotError] {
        &self.warnings
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn current_panel(&self) -> &Panel {
        &self.panels[self.current]
    }

    /// Records of the current panel
    pub fn records(&self) -> &[PlotRecord] {
        &self.current_panel().records
    }

    /// Resolved x and y scales of the current panel as the next render
    /// would see them
    pub fn axis_ranges(&self) -> (ScaleState, ScaleState) {
        self.current_panel().resolve(self.config.padding)
    }

    pub(crate) fn colormap(&self) -> &dyn Colormap {
        self.colormap.as_ref()
    }

    pub(crate) fn legend_renderer(&self) -> &dyn LegendRenderer {
        self.legend.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;
    use crate::types::Grid;

    // ==================== State machine tests ====================

    #[test]
    fn state_transitions() {
        use FigureState::*;
        assert_eq!(Empty.mutated(), Populated);
        assert_eq!(Rendered.mutated(), Populated);
        assert_eq!(Populated.rendered(), Rendered);
        assert_eq!(Rendered.backend_changed(), Populated);
        assert_eq!(Empty.backend_changed(), Empty);
        assert_eq!(Populated.backend_changed(), Populated);
    }

    #[test]
    fn new_figure_is_empty() {
        let fig = Figure::new(640.0, 480.0);
        assert_eq!(fig.state(), FigureState::Empty);
        assert!(fig.records().is_empty());
        assert!(fig.error().is_none());
        assert_eq!(fig.subplot_rects().len(), 1);
    }

    #[test]
    fn adding_populates() {
        let mut fig = Figure::new(640.0, 480.0);
        let id = fig.plot(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert_eq!(id, RecordId { panel: 0, index: 0 });
        assert_eq!(fig.state(), FigureState::Populated);
    }

    #[test]
    fn render_requires_backend() {
        let mut fig = Figure::new(640.0, 480.0);
        fig.plot(&[0.0, 1.0], &[0.0, 1.0]);
        assert_eq!(fig.render(), Err(PlotError::NoBackend));
        assert_eq!(fig.show(), Err(PlotError::NoBackend));
        assert_eq!(fig.state(), FigureState::Populated);
    }

    #[test]
    fn render_is_skipped_when_current() {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let mut fig = Figure::new(640.0, 480.0);
        fig.set_backend(backend);
        fig.plot(&[0.0, 1.0], &[0.0, 1.0]);
        fig.render().unwrap();
        let after_first = log.len();
        fig.render().unwrap();
        assert_eq!(log.len(), after_first);
        assert_eq!(fig.state(), FigureState::Rendered);
    }

    // ==================== Sticky error tests ====================

    #[test]
    fn shape_error_is_sticky_and_stores_nothing() {
        let mut fig = Figure::new(640.0, 480.0);
        assert!(fig.plot(&[0.0, 1.0, 2.0], &[0.0]).is_none());
        assert!(matches!(fig.error(), Some(PlotError::ShapeMismatch { .. })));
        assert!(fig.records().is_empty());
        assert_eq!(fig.state(), FigureState::Empty);

        // first error sticks
        fig.set_scale_named(Axis::X, "cubic");
        assert!(matches!(fig.error(), Some(PlotError::ShapeMismatch { .. })));
        assert!(fig.take_error().is_some());
        assert!(fig.error().is_none());
    }

    #[test]
    fn bad_tokens_set_errors() {
        let mut fig = Figure::new(640.0, 480.0);
        assert!(fig.plot_fmt(&[0.0], &[0.0], "q").is_none());
        assert!(matches!(fig.take_error(), Some(PlotError::UnknownColor { .. })));

        fig.set_scale_named(Axis::Y, "cubic");
        assert!(matches!(fig.take_error(), Some(PlotError::UnknownScale { .. })));

        fig.set_symlog_threshold(Axis::X, 0.0);
        assert!(matches!(fig.take_error(), Some(PlotError::InvalidThreshold { .. })));

        fig.set_limits(Axis::X, 2.0, 1.0);
        assert!(matches!(fig.take_error(), Some(PlotError::InvalidLimits { .. })));
    }

    #[test]
    fn log_limits_must_be_positive() {
        let mut fig = Figure::new(640.0, 480.0);
        fig.set_scale(Axis::Y, ScaleKind::Log);
        fig.set_limits(Axis::Y, 0.0, 10.0);
        assert!(matches!(fig.take_error(), Some(PlotError::InvalidLimits { axis: Axis::Y, .. })));
        fig.set_limits(Axis::Y, 0.1, 10.0);
        assert!(fig.error().is_none());
        assert!(fig.current_panel().axis(Axis::Y).is_pinned());
    }

    // ==================== Capacity tests ====================

    #[test]
    fn capacity_drops_with_warning() {
        let mut fig = Figure::with_config(640.0, 480.0, FigureConfig::default().with_max_records(2));
        assert!(fig.plot(&[0.0], &[0.0]).is_some());
        assert!(fig.plot(&[0.0], &[0.0]).is_some());
        assert!(fig.plot(&[0.0], &[0.0]).is_none());
        assert_eq!(fig.records().len(), 2);
        assert_eq!(fig.warnings(), &[PlotError::CapacityExceeded { capacity: 2 }]);
        assert!(fig.error().is_none());
    }

    #[test]
    fn capacity_warning_leaves_the_error_slot_free() {
        let mut fig = Figure::with_config(640.0, 480.0, FigureConfig::default().with_max_records(1));
        fig.plot(&[0.0], &[0.0]);
        fig.plot(&[0.0], &[0.0]);
        assert!(fig.error().is_none());

        fig.plot(&[0.0, 1.0], &[0.0]);
        assert!(matches!(fig.take_error(), Some(PlotError::ShapeMismatch { .. })));
        assert_eq!(fig.warnings().len(), 1);
    }

    // ==================== Subplot tests ====================

    #[test]
    fn subplots_reset_panels_and_reserve_title_space() {
        let mut fig = Figure::new(1000.0, 1000.0);
        fig.plot(&[0.0], &[0.0]);
        let single_top = fig.subplot_rects()[0].y;

        fig.subplots(2, 2);
        assert_eq!(fig.panels().len(), 4);
        assert!(fig.records().is_empty());
        assert_eq!(fig.subplot_rects().len(), 4);
        assert!((fig.subplot_rects()[0].y - (single_top + 40.0)).abs() < 1e-9);
    }

    #[test]
    fn select_subplot_targets_panel() {
        let mut fig = Figure::new(800.0, 600.0);
        fig.subplots(2, 3);
        fig.select_subplot(1, 2);
        let id = fig.plot(&[0.0], &[1.0]).unwrap();
        assert_eq!(id.panel, 5);
        assert_eq!(fig.panels()[5].records().len(), 1);
        assert!(fig.panels()[0].records().is_empty());
    }

    #[test]
    fn out_of_range_subplot_is_an_error() {
        let mut fig = Figure::new(800.0, 600.0);
        fig.subplots(2, 2);
        fig.select_subplot(2, 0);
        assert_eq!(
            fig.take_error(),
            Some(PlotError::InvalidSubplot { row: 2, col: 0, rows: 2, cols: 2 })
        );
        fig.subplots(0, 2);
        assert_eq!(fig.take_error(), Some(PlotError::InvalidGrid { rows: 0, cols: 2 }));
        assert_eq!(fig.panels().len(), 4);
    }

    #[test]
    fn margins_and_gaps_relayout() {
        let mut fig = Figure::new(100.0, 100.0);
        fig.set_margins(Margins::uniform(0.0));
        assert_eq!(fig.subplot_rects()[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        fig.subplots(1, 2);
        fig.set_gaps(Gaps::new(0.1, 0.0));
        let rects = fig.subplot_rects();
        assert!((rects[0].width - 45.0).abs() < 1e-9);
        assert!((rects[1].x - 55.0).abs() < 1e-9);
    }

    // ==================== Range tests ====================

    #[test]
    fn auto_ranges_are_padded() {
        let mut fig = Figure::new(640.0, 480.0);
        fig.plot(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]);
        let (x, _) = fig.axis_ranges();
        assert!((x.data.min + 0.1).abs() < 1e-12);
        assert!((x.data.max - 2.1).abs() < 1e-12);
    }

    #[test]
    fn pinned_ranges_are_not_padded() {
        let mut fig = Figure::new(640.0, 480.0);
        fig.plot(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]);
        fig.set_limits(Axis::X, -5.0, 5.0);
        let (x, _) = fig.axis_ranges();
        assert_eq!(x.data, Range::new(-5.0, 5.0));
        fig.auto_limits(Axis::X);
        assert!(!fig.current_panel().axis(Axis::X).is_pinned());
    }

    #[test]
    fn palette_follows_record_position() {
        let mut fig = Figure::new(640.0, 480.0);
        fig.plot(&[0.0], &[0.0]);
        fig.plot_fmt(&[0.0], &[0.0], "k");
        fig.plot(&[0.0], &[0.0]);
        let panel = fig.current_panel();
        let config = fig.config();
        assert_eq!(panel.record_color(0, config), config.palette[0]);
        assert_eq!(panel.record_color(1, config), Rgb::BLACK);
        assert_eq!(panel.record_color(2, config), config.palette[2]);
    }

    #[test]
    fn contour_orientation_checked_on_add() {
        let mut fig = Figure::new(640.0, 480.0);
        let z = Grid::new(3, 2, vec![0.0; 6]).unwrap();
        assert!(fig.add_contour(ContourPlot::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0], z)).is_none());
        assert!(matches!(fig.error(), Some(PlotError::ShapeMismatch { .. })));
    }
}
