use super::{axis_font, label_font, palette::viridis_steps, title_font, y_upper, Y_DESC};
use crate::sources::KEY_SOURCES;
use crate::table::EnergyTable;
use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use tracing::info;

pub const FILE_NAME: &str = "energy_2020.png";
pub const YEAR: i64 = 2020;
/// Gap between a bar top and its value label, in TWh.
const LABEL_OFFSET: f64 = 50.0;
/// Pixels left empty on each side of a bar.
const BAR_GAP: u32 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
}

impl Bar {
    /// Whole-number annotation drawn above the bar.
    pub fn annotation(&self) -> String {
        format!("{} TWh", self.value.trunc() as i64)
    }
}

/// Key-source values for the row of `year`. Fails when the year or a value is missing.
pub fn snapshot_bars(table: &EnergyTable, year: i64) -> Result<Vec<Bar>> {
    let row = table.row_for_year(year)?;
    KEY_SOURCES
        .iter()
        .map(|s| {
            let value = table
                .value_at(s.column, row)?
                .ok_or_else(|| anyhow!("{} has no value for {}", s.label, year))?;
            Ok(Bar {
                label: s.label,
                value,
            })
        })
        .collect()
}

#[tracing::instrument(level = "info", skip(table, out_dir))]
pub fn render(table: &EnergyTable, out_dir: &Path) -> Result<PathBuf> {
    let bars = snapshot_bars(table, YEAR)?;
    let path = out_dir.join(FILE_NAME);
    draw_bars(&path, &bars).with_context(|| format!("drawing {}", path.display()))?;
    info!(path = %path.display(), bars = bars.len(), "rendered snapshot chart");
    Ok(path)
}

fn draw_bars(out_path: &Path, bars: &[Bar]) -> Result<()> {
    let n = bars.len();
    let y_hi = y_upper(bars.iter().map(|b| b.value + LABEL_OFFSET), 1.15);
    let colors = viridis_steps(n);
    let names: Vec<&str> = bars.iter().map(|b| b.label).collect();
    let name_of = |x: &SegmentValue<i32>| match x {
        SegmentValue::CenterOf(i) => label_at(&names, *i),
        _ => String::new(),
    };

    let root = BitMapBackend::new(out_path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    // one segment per bar, segment i spans Exact(i)..Exact(i + 1)
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Energy Substitution by Source in {}", YEAR), title_font())
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d((0..n as i32 - 1).into_segmented(), 0.0f64..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_desc("Energy Source")
        .y_desc(Y_DESC)
        .axis_desc_style(axis_font())
        .label_style(label_font())
        .x_label_formatter(&name_of)
        .bold_line_style(BLACK.mix(0.2))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(bars.iter().zip(&colors).enumerate().map(|(i, (bar, color))| {
        let i = i as i32;
        let mut rect = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), bar.value),
            ],
            color.filled(),
        );
        rect.set_margin(0, 0, BAR_GAP, BAR_GAP);
        rect
    }))?;

    let text_style = label_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        Text::new(
            bar.annotation(),
            (SegmentValue::CenterOf(i as i32), bar.value + LABEL_OFFSET),
            text_style.clone(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn label_at(names: &[&str], i: i32) -> String {
    usize::try_from(i)
        .ok()
        .and_then(|i| names.get(i))
        .map(|s| s.to_string())
        .unwrap_or_default()
}
