use crate::table::EnergyTable;
use anyhow::{Context, Result};

/// Symmetric matrix of pairwise Pearson coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == row)?;
        let j = self.labels.iter().position(|l| l == col)?;
        Some(self.values[i][j])
    }
}

/// Pearson correlation over the rows where both values are present.
///
/// NaN when fewer than two such rows exist or either side has zero variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Correlation matrix over every numeric column.
pub fn correlate(table: &EnergyTable) -> Result<CorrelationMatrix> {
    correlate_columns(table, &table.numeric_column_names())
}

/// Correlation matrix over the named columns, in the given order.
pub fn correlate_columns<S: AsRef<str>>(
    table: &EnergyTable,
    names: &[S],
) -> Result<CorrelationMatrix> {
    let columns = names
        .iter()
        .map(|n| {
            table
                .numeric_column(n.as_ref())
                .with_context(|| format!("correlating {:?}", n.as_ref()))
        })
        .collect::<Result<Vec<_>>>()?;

    let k = columns.len();
    let mut values = vec![vec![f64::NAN; k]; k];
    for i in 0..k {
        for j in i..k {
            let r = pearson(&columns[i], &columns[j]);
            // a column with any spread correlates perfectly with itself
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        labels: names.iter().map(|n| n.as_ref().to_string()).collect(),
        values,
    })
}
