use super::moments::{mean, present, quantile_sorted, sample_std};
use crate::table::EnergyTable;
use anyhow::Result;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl NumericSummary {
    /// Summarize a numeric column, skipping missing cells.
    pub fn compute(values: &[Option<f64>]) -> Self {
        let mut vals = present(values);
        vals.sort_by(|a, b| a.total_cmp(b));
        Self {
            count: vals.len(),
            mean: mean(&vals),
            std: sample_std(&vals),
            min: vals.first().copied().unwrap_or(f64::NAN),
            q25: quantile_sorted(&vals, 0.25),
            q50: quantile_sorted(&vals, 0.5),
            q75: quantile_sorted(&vals, 0.75),
            max: vals.last().copied().unwrap_or(f64::NAN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first.
    pub top: Option<String>,
    pub freq: usize,
}

impl CategoricalSummary {
    pub fn compute(values: &[Option<String>]) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for v in values.iter().flatten() {
            let c = counts.entry(v.as_str()).or_insert(0);
            if *c == 0 {
                order.push(v.as_str());
            }
            *c += 1;
        }

        let mut top: Option<&str> = None;
        let mut freq = 0;
        for v in &order {
            let c = counts[v];
            if c > freq {
                top = Some(*v);
                freq = c;
            }
        }

        Self {
            count: values.iter().flatten().count(),
            unique: order.len(),
            top: top.map(str::to_string),
            freq,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

impl ColumnSummary {
    pub fn count(&self) -> usize {
        match self {
            ColumnSummary::Numeric(n) => n.count,
            ColumnSummary::Categorical(c) => c.count,
        }
    }
}

/// Describe-all output: one summary per column, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub columns: Vec<(String, ColumnSummary)>,
}

impl SummaryStatistics {
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }
}

pub fn summarize(table: &EnergyTable) -> Result<SummaryStatistics> {
    let mut columns = Vec::new();
    for name in table.column_names() {
        let summary = if table.is_numeric(&name) {
            ColumnSummary::Numeric(NumericSummary::compute(&table.numeric_column(&name)?))
        } else {
            ColumnSummary::Categorical(CategoricalSummary::compute(&table.text_column(&name)?))
        };
        columns.push((name, summary));
    }
    Ok(SummaryStatistics { columns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::table_from;

    #[test]
    fn numeric_summary_bounds_hold() {
        let s = NumericSummary::compute(&[Some(4.0), None, Some(1.0), Some(3.0), Some(2.0)]);
        assert_eq!(s.count, 4);
        assert!(s.min <= s.mean && s.mean <= s.max);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert!((s.q25 - 1.75).abs() < 1e-12);
        assert!((s.q50 - 2.5).abs() < 1e-12);
    }

    #[test]
    fn empty_numeric_column_is_nan() {
        let s = NumericSummary::compute(&[None, None]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan() && s.min.is_nan() && s.max.is_nan());
    }

    #[test]
    fn categorical_top_prefers_first_seen_on_tie() {
        let vals = vec![
            Some("b".to_string()),
            Some("a".to_string()),
            None,
            Some("a".to_string()),
            Some("b".to_string()),
        ];
        let s = CategoricalSummary::compute(&vals);
        assert_eq!(s.count, 4);
        assert_eq!(s.unique, 2);
        assert_eq!(s.top.as_deref(), Some("b"));
        assert_eq!(s.freq, 2);
    }

    #[test]
    fn summarize_covers_every_column() -> Result<()> {
        let table = table_from("Entity,Year,Coal\nWorld,2000,1\nWorld,2001,2\nWorld,2002,\n");
        let stats = summarize(&table)?;
        assert_eq!(stats.columns.len(), 3);
        match stats.get("Entity") {
            Some(ColumnSummary::Categorical(c)) => {
                assert_eq!(c.count, 3);
                assert_eq!(c.top.as_deref(), Some("World"));
                assert_eq!(c.freq, 3);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(stats.get("Year").map(ColumnSummary::count), Some(3));
        assert_eq!(stats.get("Coal").map(ColumnSummary::count), Some(2));
        Ok(())
    }
}
