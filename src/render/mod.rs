//! The deferred render pass
//!
//! This module is organized into submodules:
//! - `context`: `PanelContext`, the resolved scales and pixel mapping of one panel
//! - `defaults`: fixed pixel sizes
//! - `ticks`: tick positions and labels per scale kind
//!
//! One pass draws every panel in order: viewport, axes, records in insertion
//! order, legend, colorbar. Records are dispatched by variant; the only
//! backend-dependent branch is the optional heatmap fast path for meshes.

pub mod context;
pub mod defaults;
pub mod ticks;

pub use context::PanelContext;

use glam::{DVec2, dvec2};

use crate::backend::Backend;
use crate::colormap::MappedColors;
use crate::contour;
use crate::dash::{self, DashWalker, LineStyle};
use crate::figure::{Figure, Panel};
use crate::legend::{LegendEntry, LegendRenderer};
use crate::record::{ColorbarSpec, ContourPlot, LinePlot, MeshPlot, Plot, PlotRecord};
use crate::types::{Axis, Range, Rect, Rgb, TextAnchor, finite_point};
use defaults::*;

/// Draw every panel of `figure` into `backend`
pub(crate) fn render_figure(figure: &Figure, backend: &mut dyn Backend) {
    backend.begin(figure.width(), figure.height());
    for (panel, area) in figure.panels().iter().zip(figure.subplot_rects()) {
        let (x, y) = panel.resolve(figure.config().padding);
        let ctx = PanelContext::new(*area, x, y, figure.config(), figure.colormap());
        render_panel(&ctx, panel, figure.legend_renderer(), backend);
    }
}

fn render_panel(ctx: &PanelContext, panel: &Panel, legend: &dyn LegendRenderer, backend: &mut dyn Backend) {
    backend.set_viewport(&ctx.viewport());
    draw_axes(ctx, panel, backend);

    for (index, record) in panel.records().iter().enumerate() {
        let color = panel.record_color(index, ctx.config);
        match record {
            PlotRecord::Line(line) => draw_line(ctx, line, color, backend),
            PlotRecord::Contour(plot) => draw_contour(ctx, plot, color, backend),
            PlotRecord::Mesh(mesh) => draw_mesh(ctx, mesh, backend),
        }
    }

    if panel.legend() {
        let entries: Vec<LegendEntry> = panel
            .records()
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.legend_entry(panel.record_color(i, ctx.config), ctx.config.line_width))
            .collect();
        legend.draw_legend(backend, &entries, ctx.area.top_right());
    }

    if let Some(spec) = panel.records().iter().find_map(|r| r.colorbar()) {
        draw_colorbar(ctx, &spec, backend);
    }
}

/// Stroke a pixel polyline, carrying the dash phase across its segments
fn stroke(points: &[DVec2], style: &LineStyle, backend: &mut dyn Backend) {
    let mut walker = DashWalker::new(style.pattern(dash::extent(points)));
    walker.polyline(points, &mut |a, b| backend.draw_line(a, b));
}

// ============================================================================
// Axes
// ============================================================================

fn draw_axes(ctx: &PanelContext, panel: &Panel, backend: &mut dyn Backend) {
    let area = ctx.area;
    let font = ctx.config.font_size;
    let x_ticks = ticks::ticks(&ctx.x, ctx.config.tick_target);
    let y_ticks = ticks::ticks(&ctx.y, ctx.config.tick_target);

    if panel.grid() {
        backend.set_color(Rgb::GRID);
        backend.set_line_width(GRID_LINE_WIDTH);
        for tick in &x_ticks {
            let x = ctx.px_x(tick.position);
            backend.draw_line(dvec2(x, area.top()), dvec2(x, area.bottom()));
        }
        for tick in &y_ticks {
            let y = ctx.px_y(tick.position);
            backend.draw_line(dvec2(area.left(), y), dvec2(area.right(), y));
        }
    }

    backend.set_color(Rgb::BLACK);
    backend.set_line_width(AXIS_LINE_WIDTH);
    backend.draw_quad_outline(&area.corners(), AXIS_LINE_WIDTH);

    for tick in &x_ticks {
        let x = ctx.px_x(tick.position);
        backend.draw_line(dvec2(x, area.bottom()), dvec2(x, area.bottom() + TICK_LENGTH));
        backend.draw_text(
            dvec2(x, area.bottom() + TICK_LENGTH + TICK_LABEL_GAP + font),
            &tick.label,
            TextAnchor::Middle,
        );
    }
    for tick in &y_ticks {
        let y = ctx.px_y(tick.position);
        backend.draw_line(dvec2(area.left() - TICK_LENGTH, y), dvec2(area.left(), y));
        backend.draw_text(
            dvec2(area.left() - TICK_LENGTH - TICK_LABEL_GAP, y + font / 3.0),
            &tick.label,
            TextAnchor::End,
        );
    }

    if let Some(title) = panel.title() {
        backend.draw_text(dvec2(area.center().x, area.top() - font * 0.5), title, TextAnchor::Middle);
    }
    if let Some(label) = panel.label(Axis::X) {
        backend.draw_text(
            dvec2(area.center().x, area.bottom() + TICK_LENGTH + TICK_LABEL_GAP + font * 2.5),
            label,
            TextAnchor::Middle,
        );
    }
    if let Some(label) = panel.label(Axis::Y) {
        backend.draw_text(dvec2(area.left() - font * 4.0, area.center().y), label, TextAnchor::Middle);
    }
}

// ============================================================================
// Records
// ============================================================================

fn draw_line(ctx: &PanelContext, line: &LinePlot, color: Rgb, backend: &mut dyn Backend) {
    let px: Vec<DVec2> = line.points().map(|p| ctx.to_px(p)).collect();
    let style = line.style.line_style.clone().unwrap_or_default();

    backend.set_color(color);
    if style.is_visible() {
        backend.set_line_width(line.width.unwrap_or(ctx.config.line_width));
        stroke(&px, &style, backend);
    }
    if let Some(marker) = line.style.marker {
        for p in dash::split_runs(&px).into_iter().flatten() {
            backend.draw_marker(*p, marker, ctx.config.marker_size);
        }
    }
}

fn draw_contour(ctx: &PanelContext, plot: &ContourPlot, color: Rgb, backend: &mut dyn Backend) {
    let Some(range) = plot.value_range() else {
        return;
    };
    let levels = plot.resolved_levels();
    if plot.filled {
        fill_bands(ctx, plot, &contour::levels_in_range(&levels, range), range, backend);
    }

    let style = plot.style.line_style.clone().unwrap_or_default();
    if !style.is_visible() {
        return;
    }
    backend.set_line_width(ctx.config.line_width);
    for (level, segments) in contour::trace_levels(&plot.x, &plot.y, &plot.z, &levels) {
        let level_color = if plot.filled {
            ctx.color_for(level, range, &plot.colormap)
        } else {
            color
        };
        backend.set_color(level_color);
        for path in contour::stitch(&segments) {
            let px: Vec<DVec2> = path.points.iter().map(|p| ctx.to_px(*p)).collect();
            stroke(&px, &style, backend);
        }
    }
}

/// Midpoint of the band between consecutive levels that holds `value`
fn band_value(value: f64, sorted_levels: &[f64], range: Range) -> f64 {
    let k = sorted_levels.partition_point(|l| *l <= value);
    let lo = if k == 0 { range.min } else { sorted_levels[k - 1] };
    let hi = sorted_levels.get(k).copied().unwrap_or(range.max);
    (lo + hi) / 2.0
}

/// One filled quad per grid cell, colored by the band of its mean value
fn fill_bands(ctx: &PanelContext, plot: &ContourPlot, levels: &[f64], range: Range, backend: &mut dyn Backend) {
    let mut sorted = levels.to_vec();
    sorted.sort_by(f64::total_cmp);

    let (x, y, z) = (&plot.x, &plot.y, &plot.z);
    for j in 0..z.rows().saturating_sub(1) {
        for i in 0..z.cols().saturating_sub(1) {
            let corners = [z.get(j, i), z.get(j, i + 1), z.get(j + 1, i + 1), z.get(j + 1, i)];
            if corners.iter().any(|v| !v.is_finite()) {
                continue;
            }
            let quad = [
                ctx.to_px(dvec2(x[i], y[j])),
                ctx.to_px(dvec2(x[i + 1], y[j])),
                ctx.to_px(dvec2(x[i + 1], y[j + 1])),
                ctx.to_px(dvec2(x[i], y[j + 1])),
            ];
            if !quad.iter().all(|p| finite_point(*p)) {
                continue;
            }
            let mean = corners.iter().sum::<f64>() / 4.0;
            backend.set_color(ctx.color_for(band_value(mean, &sorted, range), range, &plot.colormap));
            backend.fill_quad(&quad);
        }
    }
}

fn draw_mesh(ctx: &PanelContext, mesh: &MeshPlot, backend: &mut dyn Backend) {
    let Some(range) = mesh.value_range() else {
        return;
    };
    if !mesh.edges && mesh.is_rectilinear() && fill_heatmap(ctx, mesh, range, backend) {
        return;
    }

    for j in 0..mesh.c.rows() {
        for i in 0..mesh.c.cols() {
            let quad = mesh.cell(j, i).map(|p| ctx.to_px(p));
            if !quad.iter().all(|p| finite_point(*p)) {
                continue;
            }
            let value = mesh.c.get(j, i);
            if value.is_finite() {
                backend.set_color(ctx.color_for(value, range, &mesh.colormap));
                backend.fill_quad(&quad);
            }
            if mesh.edges {
                backend.set_color(mesh.edge_color);
                backend.draw_quad_outline(&quad, mesh.edge_width);
            }
        }
    }
}

/// Hand a rectilinear mesh to the backend's heatmap extension.
/// Returns false when the backend has none.
fn fill_heatmap(ctx: &PanelContext, mesh: &MeshPlot, range: Range, backend: &mut dyn Backend) -> bool {
    let Some(fill) = backend.heatmap() else {
        return false;
    };
    let (rows, cols) = mesh.c.shape();
    let x_centers: Vec<f64> = (0..cols)
        .map(|i| (ctx.px_x(ctx.x.apply(mesh.x.get(0, i))) + ctx.px_x(ctx.x.apply(mesh.x.get(0, i + 1)))) / 2.0)
        .collect();
    let y_centers: Vec<f64> = (0..rows)
        .map(|j| (ctx.px_y(ctx.y.apply(mesh.y.get(j, 0))) + ctx.px_y(ctx.y.apply(mesh.y.get(j + 1, 0)))) / 2.0)
        .collect();
    let colors = MappedColors {
        colormap: ctx.colormap,
        name: &mesh.colormap,
        vmin: range.min,
        vmax: range.max,
    };
    crate::log::debug!(rows, cols, "mesh drawn through the heatmap extension");
    fill.fill_heatmap(&x_centers, &y_centers, &mesh.c, range.min, range.max, &colors);
    true
}

// ============================================================================
// Colorbar
// ============================================================================

fn draw_colorbar(ctx: &PanelContext, spec: &ColorbarSpec, backend: &mut dyn Backend) {
    let bar = Rect::new(
        ctx.area.right() + COLORBAR_GAP,
        ctx.area.top(),
        COLORBAR_WIDTH,
        ctx.area.height,
    );
    let step = bar.height / COLORBAR_STEPS as f64;
    for k in 0..COLORBAR_STEPS {
        let value = spec.range.min + spec.range.span() * (k as f64 + 0.5) / COLORBAR_STEPS as f64;
        let bottom = bar.bottom() - step * k as f64;
        let top = bottom - step;
        backend.set_color(ctx.color_for(value, spec.range, &spec.colormap));
        backend.fill_quad(&[
            dvec2(bar.left(), top),
            dvec2(bar.right(), top),
            dvec2(bar.right(), bottom),
            dvec2(bar.left(), bottom),
        ]);
    }

    backend.set_color(Rgb::BLACK);
    backend.draw_quad_outline(&bar.corners(), AXIS_LINE_WIDTH);
    if !(spec.range.span() > 0.0) {
        return;
    }
    let tick_step = ticks::nice_step(spec.range.span(), ctx.config.tick_target);
    for value in ticks::nice_values(spec.range, ctx.config.tick_target) {
        let y = bar.bottom() - spec.range.normalize(value) * bar.height;
        backend.draw_line(dvec2(bar.right(), y), dvec2(bar.right() + TICK_LENGTH, y));
        backend.draw_text(
            dvec2(bar.right() + TICK_LENGTH + TICK_LABEL_GAP, y + ctx.config.font_size / 3.0),
            &ticks::format_linear(value, tick_step),
            TextAnchor::Start,
        );
    }
}
