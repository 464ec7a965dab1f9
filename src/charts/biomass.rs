use super::{
    draw_year_lines,
    palette::{BROWN, DARK_GREEN},
    Series,
};
use crate::sources::{RENEWABLES, TRADITIONAL_BIOMASS};
use crate::table::EnergyTable;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

pub const FILE_NAME: &str = "biomass_vs_renewables.png";
pub const RENEWABLES_LABEL: &str = "Total Renewables";
const TICK_STEP: i64 = 25;

/// Row-wise Solar + Wind + Hydropower + Biofuels; a missing addend leaves the row empty.
pub fn renewables_total(table: &EnergyTable) -> Result<Vec<Option<f64>>> {
    let mut total: Vec<Option<f64>> = vec![Some(0.0); table.len()];
    for source in RENEWABLES {
        let values = table
            .numeric_column(source.column)
            .with_context(|| format!("summing {}", source.label))?;
        for (acc, v) in total.iter_mut().zip(values) {
            *acc = match (*acc, v) {
                (Some(a), Some(b)) => Some(a + b),
                _ => None,
            };
        }
    }
    Ok(total)
}

/// Traditional biomass and total renewables over the full year range.
pub fn biomass_series(table: &EnergyTable) -> Result<(Series, Series)> {
    let biomass = Series::from_source(table, &TRADITIONAL_BIOMASS)?;
    let renewables = Series::from_values(
        RENEWABLES_LABEL,
        table.years(),
        &renewables_total(table)?,
    );
    Ok((biomass, renewables))
}

#[tracing::instrument(level = "info", skip(table, out_dir))]
pub fn render(table: &EnergyTable, out_dir: &Path) -> Result<PathBuf> {
    let (biomass, renewables) = biomass_series(table)?;
    let (Some(first), Some(last)) = (
        table.years().iter().min().copied(),
        table.years().iter().max().copied(),
    ) else {
        bail!("table has no rows");
    };

    let path = out_dir.join(FILE_NAME);
    let caption = format!(
        "Traditional Biomass vs Renewable Energy Substitution ({}-{})",
        first, last
    );
    draw_year_lines(
        &path,
        &caption,
        &[(biomass, BROWN), (renewables, DARK_GREEN)],
        first..=last,
        TICK_STEP,
    )
    .with_context(|| format!("drawing {}", path.display()))?;

    info!(path = %path.display(), "rendered biomass vs renewables chart");
    Ok(path)
}
