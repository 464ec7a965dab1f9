// src/charts/mod.rs
use anyhow::{bail, Context, Result};
use plotters::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

pub mod biomass;
pub mod heatmap;
pub mod palette;
pub mod snapshot;
pub mod trend;

use crate::sources::EnergySource;
use crate::table::EnergyTable;

pub const Y_DESC: &str = "Energy Substituted (TWh)";

/// A named line series of (year, TWh) points.
///
/// A missing cell breaks the line: points are kept as runs of consecutive
/// present rows, and each run is drawn as its own segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub runs: Vec<Vec<(i64, f64)>>,
}

impl Series {
    /// Pair every year of `table` with the value of `source`.
    pub fn from_source(table: &EnergyTable, source: &EnergySource) -> Result<Self> {
        let values = table
            .numeric_column(source.column)
            .with_context(|| format!("reading {} series", source.label))?;
        Ok(Self::from_values(source.label, table.years(), &values))
    }

    pub fn from_values(label: &str, years: &[i64], values: &[Option<f64>]) -> Self {
        let mut runs = Vec::new();
        let mut run = Vec::new();
        for (y, v) in years.iter().zip(values) {
            match v {
                Some(v) => run.push((*y, *v)),
                None if !run.is_empty() => runs.push(std::mem::take(&mut run)),
                None => {}
            }
        }
        if !run.is_empty() {
            runs.push(run);
        }
        Self {
            label: label.to_string(),
            runs,
        }
    }

    /// Every present point, in row order.
    pub fn points(&self) -> Vec<(i64, f64)> {
        self.runs.iter().flatten().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Upper y bound with headroom; never collapses to zero.
pub(crate) fn y_upper<I: IntoIterator<Item = f64>>(values: I, headroom: f64) -> f64 {
    let max = values.into_iter().fold(0.0f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * headroom
    }
}

pub(crate) fn title_font<'a>() -> FontDesc<'a> {
    ("sans-serif", 28).into_font().style(FontStyle::Bold)
}

pub(crate) fn axis_font<'a>() -> FontDesc<'a> {
    ("sans-serif", 20).into_font().style(FontStyle::Bold)
}

pub(crate) fn label_font<'a>() -> FontDesc<'a> {
    ("sans-serif", 16).into_font().style(FontStyle::Bold)
}

/// Year ticks every `step` years, aligned to multiples of `step`, covering `years`.
pub(crate) fn year_ticks(years: &std::ops::RangeInclusive<i64>, step: i64) -> Vec<i64> {
    let first = years.start().div_euclid(step) * step;
    let first = if first < *years.start() { first + step } else { first };
    (first..=*years.end()).step_by(step as usize).collect()
}

/// Draw the year-vs-TWh line chart shared by the trend and biomass figures.
pub(crate) fn draw_year_lines(
    out_path: &Path,
    caption: &str,
    series: &[(Series, RGBColor)],
    years: std::ops::RangeInclusive<i64>,
    tick_step: i64,
) -> Result<()> {
    if series.iter().all(|(s, _)| s.is_empty()) {
        bail!("nothing to plot for {:?}", caption);
    }
    let y_hi = y_upper(
        series.iter().flat_map(|(s, _)| s.runs.iter().flatten().map(|p| p.1)),
        1.1,
    );
    let ticks = year_ticks(&years, tick_step);
    // a single-year range would give the axis zero width
    let x_end = (*years.end()).max(*years.start() + 1);

    let root = BitMapBackend::new(out_path, (1400, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, title_font())
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(
            (*years.start()..x_end).with_key_points(ticks),
            0.0f64..y_hi,
        )?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(Y_DESC)
        .axis_desc_style(axis_font())
        .label_style(label_font())
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.2))
        .draw()?;

    for (s, color) in series {
        let color = *color;
        for (k, run) in s.runs.iter().enumerate() {
            let drawn = chart.draw_series(LineSeries::new(
                run.iter().copied(),
                color.stroke_width(2),
            ))?;
            // one legend entry per series
            if k == 0 {
                drawn.label(s.label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }
    }

    chart
        .configure_series_labels()
        .label_font(label_font())
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Render all four figures into `out_dir`, in order.
pub fn render_all(table: &EnergyTable, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let paths = vec![
        trend::render(table, out_dir).context("trend chart")?,
        snapshot::render(table, out_dir).context("2020 snapshot chart")?,
        heatmap::render(table, out_dir).context("correlation heatmap")?,
        biomass::render(table, out_dir).context("biomass vs renewables chart")?,
    ];
    info!(count = paths.len(), dir = %out_dir.display(), "saved charts");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::ALL_SOURCES;
    use crate::table::tests::{init_test_logging, table_from};

    /// All eight sources over 1945..=2022, with a gap in Wind.
    fn full_table() -> EnergyTable {
        let mut csv = String::from("Entity,Year");
        for s in ALL_SOURCES {
            csv.push_str(&format!(",\"{}\"", s.column));
        }
        csv.push('\n');
        for y in 1945..=2022i64 {
            let t = (y - 1945) as f64;
            csv.push_str(&format!("World,{y}"));
            for (k, _) in ALL_SOURCES.iter().enumerate() {
                let k = k as f64;
                if k == 4.0 && (1990..=1992).contains(&y) {
                    csv.push(',');
                } else {
                    csv.push_str(&format!(",{:.1}", 100.0 * (k + 1.0) + t * (k + 0.5) + (t * k).sin()));
                }
            }
            csv.push('\n');
        }
        table_from(&csv)
    }

    #[test]
    fn render_all_writes_four_charts_in_order() -> Result<()> {
        init_test_logging();
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("plots");

        let paths = render_all(&full_table(), &out)?;
        let names: Vec<String> = paths
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                trend::FILE_NAME,
                snapshot::FILE_NAME,
                heatmap::FILE_NAME,
                biomass::FILE_NAME
            ]
        );
        for p in &paths {
            assert!(p.starts_with(&out));
            assert!(fs::metadata(p)?.len() > 0, "{} is empty", p.display());
        }
        Ok(())
    }

    #[test]
    fn render_all_stops_at_first_failing_chart() {
        let table = table_from("Year,\"Coal (TWh, substituted energy)\"\n2019,1\n2020,2\n");
        let dir = tempfile::tempdir().unwrap();
        let err = render_all(&table, dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("trend chart"));
        assert!(!dir.path().join(snapshot::FILE_NAME).exists());
    }

    #[test]
    fn missing_cell_breaks_the_line() {
        let s = Series::from_values("Coal", &[2000, 2001, 2002], &[Some(1.0), None, Some(3.0)]);
        assert_eq!(s.runs, vec![vec![(2000, 1.0)], vec![(2002, 3.0)]]);
        assert_eq!(s.points(), vec![(2000, 1.0), (2002, 3.0)]);
    }

    #[test]
    fn runs_follow_present_stretches() {
        let years = [1990, 1991, 1992, 1993, 1994, 1995, 1996];
        let values = [None, Some(1.0), Some(2.0), None, None, Some(5.0), Some(6.0)];
        let s = Series::from_values("Wind", &years, &values);
        assert_eq!(
            s.runs,
            vec![vec![(1991, 1.0), (1992, 2.0)], vec![(1995, 5.0), (1996, 6.0)]]
        );

        let empty = Series::from_values("Wind", &years[..2], &[None, None]);
        assert!(empty.is_empty());
        assert!(empty.points().is_empty());
    }

    #[test]
    fn year_ticks_align_to_step() {
        assert_eq!(
            year_ticks(&(1950..=2020), 10),
            vec![1950, 1960, 1970, 1980, 1990, 2000, 2010, 2020]
        );
        assert_eq!(year_ticks(&(1800..=2023), 25).first(), Some(&1800));
        assert_eq!(year_ticks(&(1803..=1851), 25), vec![1825, 1850]);
    }

    #[test]
    fn y_upper_has_headroom_and_floor() {
        assert!((y_upper([10.0, 20.0], 1.1) - 22.0).abs() < 1e-9);
        assert_eq!(y_upper(Vec::<f64>::new(), 1.1), 1.0);
        assert_eq!(y_upper([-5.0, 0.0], 1.1), 1.0);
    }
}
