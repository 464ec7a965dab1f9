use super::{
    label_font,
    palette::{annotation_color, viridis, MISSING},
    title_font,
};
use crate::sources::{label_for, KEY_SOURCES};
use crate::stats::{correlate_columns, CorrelationMatrix};
use crate::table::EnergyTable;
use anyhow::{bail, Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use tracing::info;

pub const FILE_NAME: &str = "energy_correlation_heatmap.png";
const COLORBAR_WIDTH: u32 = 130;
const COLORBAR_STEPS: usize = 100;

/// Correlation of the six key sources, in key-source order.
pub fn key_source_correlation(table: &EnergyTable) -> Result<CorrelationMatrix> {
    let names: Vec<&str> = KEY_SOURCES.iter().map(|s| s.column).collect();
    correlate_columns(table, &names)
}

/// Cell annotation: two decimals, or "nan" for an undefined coefficient.
pub fn cell_text(r: f64) -> String {
    if r.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.2}", r)
    }
}

/// Colour scale bounds from the finite cells.
fn value_range(corr: &CorrelationMatrix) -> (f64, f64) {
    let finite = corr.values.iter().flatten().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() {
        (-1.0, 1.0)
    } else if hi - lo < f64::EPSILON {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

#[tracing::instrument(level = "info", skip(table, out_dir))]
pub fn render(table: &EnergyTable, out_dir: &Path) -> Result<PathBuf> {
    let corr = key_source_correlation(table)?;
    let path = out_dir.join(FILE_NAME);
    draw_heatmap(&path, &corr).with_context(|| format!("drawing {}", path.display()))?;
    info!(path = %path.display(), size = corr.len(), "rendered correlation heatmap");
    Ok(path)
}

fn draw_heatmap(out_path: &Path, corr: &CorrelationMatrix) -> Result<()> {
    let n = corr.len();
    if n == 0 {
        bail!("empty correlation matrix");
    }
    let (lo, hi) = value_range(corr);
    let scale = |v: f64| (v - lo) / (hi - lo);

    let labels: Vec<&str> = corr.labels.iter().map(|l| label_for(l)).collect();
    let last = n as i32 - 1;
    // row 0 sits at the top
    let x_name = |x: &SegmentValue<i32>| match x {
        SegmentValue::CenterOf(j) => label_at(&labels, *j),
        _ => String::new(),
    };
    let y_name = |y: &SegmentValue<i32>| match y {
        SegmentValue::CenterOf(k) => label_at(&labels, last - *k),
        _ => String::new(),
    };

    let root = BitMapBackend::new(out_path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Correlation Heatmap of Energy Sources", title_font())?;
    let (grid_area, bar_area) = root.split_horizontally(1000 - COLORBAR_WIDTH);

    let mut chart = ChartBuilder::on(&grid_area)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(120)
        .build_cartesian_2d((0..last).into_segmented(), (0..last).into_segmented())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .label_style(label_font())
        .x_label_formatter(&x_name)
        .y_label_formatter(&y_name)
        .draw()?;

    let cells: Vec<(i32, i32, f64)> = (0..n)
        .flat_map(|i| (0..n).map(move |j| (j as i32, last - i as i32, corr.values[i][j])))
        .collect();
    let fill_of = |r: f64| if r.is_nan() { MISSING } else { viridis(scale(r)) };
    let corners = |x: i32, y: i32| {
        [
            (SegmentValue::Exact(x), SegmentValue::Exact(y)),
            (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
        ]
    };

    chart.draw_series(
        cells
            .iter()
            .map(|&(x, y, r)| Rectangle::new(corners(x, y), fill_of(r).filled())),
    )?;
    chart.draw_series(
        cells
            .iter()
            .map(|&(x, y, _)| Rectangle::new(corners(x, y), WHITE.stroke_width(1))),
    )?;
    chart.draw_series(cells.iter().map(|&(x, y, r)| {
        Text::new(
            cell_text(r),
            (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
            label_font()
                .color(&annotation_color(fill_of(r)))
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )
    }))?;

    // colour bar
    let mut bar = ChartBuilder::on(&bar_area)
        .margin_top(20)
        .margin_bottom(70)
        .margin_right(20)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..1.0f64, lo..hi)?;
    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .label_style(label_font())
        .y_label_formatter(&|v: &f64| format!("{:.2}", v))
        .draw()?;
    let step = (hi - lo) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|k| {
        let v0 = lo + k as f64 * step;
        Rectangle::new([(0.0, v0), (1.0, v0 + step)], viridis(scale(v0 + step / 2.0)).filled())
    }))?;

    root.present()?;
    Ok(())
}

fn label_at(labels: &[&str], idx: i32) -> String {
    usize::try_from(idx)
        .ok()
        .and_then(|i| labels.get(i))
        .map(|s| s.to_string())
        .unwrap_or_default()
}
