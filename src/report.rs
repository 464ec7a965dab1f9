// src/report.rs
use crate::sources::label_for;
use crate::stats::{Analysis, ColumnSummary, ColumnVector, CorrelationMatrix, SummaryStatistics};
use prettytable::{format, Cell, Row, Table};

pub const SUMMARY_HEADER: &str = "Summary Statistics:";
pub const CORRELATION_HEADER: &str = "Correlation Matrix:";
pub const SKEWNESS_HEADER: &str = "Skewness:";
pub const KURTOSIS_HEADER: &str = "Kurtosis:";

fn fmt_num(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", v)
    }
}

fn header_row(names: &[&str]) -> Row {
    Row::new(
        names
            .iter()
            .map(|n| Cell::new(n).style_spec("bFg"))
            .collect(),
    )
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table
}

/// Describe-all table: one row per column, categorical and numeric fields side by side.
pub fn summary_table(summary: &SummaryStatistics) -> Table {
    let mut table = new_table();
    table.add_row(header_row(&[
        "Column", "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%",
        "max",
    ]));

    for (name, col) in &summary.columns {
        let mut cells = vec![Cell::new(name), Cell::new(&col.count().to_string()).style_spec("r")];
        match col {
            ColumnSummary::Categorical(c) => {
                cells.push(Cell::new(&c.unique.to_string()).style_spec("r"));
                cells.push(Cell::new(c.top.as_deref().unwrap_or("NaN")));
                cells.push(Cell::new(&c.freq.to_string()).style_spec("r"));
                for _ in 0..7 {
                    cells.push(Cell::new("NaN").style_spec("r"));
                }
            }
            ColumnSummary::Numeric(n) => {
                for _ in 0..3 {
                    cells.push(Cell::new("NaN").style_spec("r"));
                }
                for v in [n.mean, n.std, n.min, n.q25, n.q50, n.q75, n.max] {
                    cells.push(Cell::new(&fmt_num(v)).style_spec("r"));
                }
            }
        }
        table.add_row(Row::new(cells));
    }
    table
}

pub fn correlation_table(corr: &CorrelationMatrix) -> Table {
    let mut table = new_table();
    let mut head = vec![""];
    head.extend(corr.labels.iter().map(|l| label_for(l)));
    table.add_row(header_row(&head));

    for (label, row) in corr.labels.iter().zip(&corr.values) {
        let mut cells = vec![Cell::new(label_for(label)).style_spec("b")];
        cells.extend(row.iter().map(|v| Cell::new(&fmt_num(*v)).style_spec("r")));
        table.add_row(Row::new(cells));
    }
    table
}

pub fn vector_table(values: &ColumnVector) -> Table {
    let mut table = new_table();
    table.add_row(header_row(&["Column", "value"]));
    for (name, v) in &values.values {
        table.add_row(Row::new(vec![
            Cell::new(name),
            Cell::new(&fmt_num(*v)).style_spec("r"),
        ]));
    }
    table
}

/// The full console report, sections in fixed order.
pub fn render_report(analysis: &Analysis) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}",
        SUMMARY_HEADER,
        summary_table(&analysis.summary),
        CORRELATION_HEADER,
        correlation_table(&analysis.correlation),
        SKEWNESS_HEADER,
        vector_table(&analysis.skewness),
        KURTOSIS_HEADER,
        vector_table(&analysis.kurtosis),
    )
}

pub fn print_report(analysis: &Analysis) {
    println!("{}", render_report(analysis));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::analyze;
    use crate::table::tests::table_from;

    #[test]
    fn sections_appear_in_order() -> anyhow::Result<()> {
        let table = table_from(
            "Entity,Year,\"Coal (TWh, substituted energy)\"\nWorld,2000,1\nWorld,2001,4\nWorld,2002,2\nWorld,2003,8\n",
        );
        let out = render_report(&analyze(&table)?);

        let positions: Vec<usize> = [SUMMARY_HEADER, CORRELATION_HEADER, SKEWNESS_HEADER, KURTOSIS_HEADER]
            .iter()
            .map(|h| out.find(h).expect("header missing"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(out.starts_with(SUMMARY_HEADER));
        Ok(())
    }

    #[test]
    fn tables_carry_values_and_short_labels() -> anyhow::Result<()> {
        let table = table_from(
            "Entity,Year,\"Coal (TWh, substituted energy)\"\nWorld,2000,1\nWorld,2001,3\n",
        );
        let analysis = analyze(&table)?;

        let summary = summary_table(&analysis.summary).to_string();
        assert!(summary.contains("World"));
        assert!(summary.contains("2.000000"));

        let corr = correlation_table(&analysis.correlation).to_string();
        assert!(corr.contains("Coal"));
        assert!(!corr.contains("substituted energy"));
        assert!(corr.contains("1.000000"));

        // two values are too few for skewness
        let skew = vector_table(&analysis.skewness).to_string();
        assert!(skew.contains("NaN"));
        Ok(())
    }
}
