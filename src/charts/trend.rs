use super::{draw_year_lines, palette::TAB10, Series};
use crate::sources::KEY_SOURCES;
use crate::table::EnergyTable;
use anyhow::{bail, Context, Result};
use std::{
    ops::RangeInclusive,
    path::{Path, PathBuf},
};
use tracing::info;

pub const FILE_NAME: &str = "energy_trends.png";
pub const YEARS: RangeInclusive<i64> = 1950..=2020;
const TICK_STEP: i64 = 10;

/// One series per key source over 1950..=2020.
pub fn trend_series(table: &EnergyTable) -> Result<Vec<Series>> {
    let window = table.filter_years(YEARS)?;
    if window.is_empty() {
        bail!(
            "no rows between {} and {}",
            YEARS.start(),
            YEARS.end()
        );
    }
    KEY_SOURCES
        .iter()
        .map(|s| Series::from_source(&window, s))
        .collect()
}

#[tracing::instrument(level = "info", skip(table, out_dir))]
pub fn render(table: &EnergyTable, out_dir: &Path) -> Result<PathBuf> {
    let series = trend_series(table)?;
    let colored: Vec<(Series, _)> = series
        .into_iter()
        .zip(TAB10.iter().copied())
        .collect();

    let path = out_dir.join(FILE_NAME);
    let caption = format!(
        "Global Energy Substitution Trends ({}-{})",
        YEARS.start(),
        YEARS.end()
    );
    draw_year_lines(&path, &caption, &colored, YEARS, TICK_STEP)
        .with_context(|| format!("drawing {}", path.display()))?;

    info!(path = %path.display(), "rendered trend chart");
    Ok(path)
}
