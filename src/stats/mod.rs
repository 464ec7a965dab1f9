// src/stats/mod.rs
use anyhow::Result;
use tracing::debug;

pub mod correlation;
pub mod describe;
pub mod moments;

pub use correlation::{correlate, correlate_columns, CorrelationMatrix};
pub use describe::{summarize, CategoricalSummary, ColumnSummary, NumericSummary, SummaryStatistics};

use crate::table::EnergyTable;

/// One scalar per numeric column, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnVector {
    pub values: Vec<(String, f64)>,
}

impl ColumnVector {
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }
}

pub type SkewnessVector = ColumnVector;
pub type KurtosisVector = ColumnVector;

fn per_numeric_column(table: &EnergyTable, f: fn(&[f64]) -> f64) -> Result<ColumnVector> {
    let mut values = Vec::new();
    for name in table.numeric_column_names() {
        let xs = moments::present(&table.numeric_column(&name)?);
        values.push((name, f(&xs)));
    }
    Ok(ColumnVector { values })
}

pub fn skew(table: &EnergyTable) -> Result<SkewnessVector> {
    per_numeric_column(table, moments::skewness)
}

/// Excess kurtosis (normal distribution = 0).
pub fn kurtosis(table: &EnergyTable) -> Result<KurtosisVector> {
    per_numeric_column(table, moments::excess_kurtosis)
}

/// Everything the reporter prints, computed in one pass.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub summary: SummaryStatistics,
    pub correlation: CorrelationMatrix,
    pub skewness: SkewnessVector,
    pub kurtosis: KurtosisVector,
}

#[tracing::instrument(level = "info", skip(table), fields(rows = table.len()))]
pub fn analyze(table: &EnergyTable) -> Result<Analysis> {
    let summary = summarize(table)?;
    let correlation = correlate(table)?;
    let skewness = skew(table)?;
    let kurtosis = kurtosis(table)?;
    debug!(
        columns = summary.columns.len(),
        numeric = correlation.len(),
        "statistics computed"
    );
    Ok(Analysis {
        summary,
        correlation,
        skewness,
        kurtosis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::table_from;

    #[test]
    fn vectors_cover_numeric_columns_only() -> Result<()> {
        let table =
            table_from("Entity,Year,A\nW,2000,1\nW,2001,2\nW,2002,3\nW,2003,4\nW,2004,5\n");
        let s = skew(&table)?;
        let k = kurtosis(&table)?;
        assert_eq!(
            s.values.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
            vec!["Year", "A"]
        );
        assert!(s.get("A").unwrap().abs() < 1e-9);
        assert!((k.get("A").unwrap() + 1.2).abs() < 1e-9);
        assert!(s.get("Entity").is_none());
        Ok(())
    }

    #[test]
    fn analyze_bundles_all_four_results() -> Result<()> {
        let table = table_from("Year,A,B\n2000,1,2\n2001,2,5\n2002,3,4\n");
        let a = analyze(&table)?;
        assert_eq!(a.summary.columns.len(), 3);
        assert_eq!(a.correlation.len(), 3);
        assert_eq!(a.skewness.values.len(), 3);
        assert!(a.kurtosis.get("A").unwrap().is_nan());
        Ok(())
    }
}
