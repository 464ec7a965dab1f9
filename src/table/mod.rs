// src/table/mod.rs
use anyhow::{anyhow, bail, Context, Result};
use arrow::{
    array::{Array, BooleanArray, Float64Array, Int64Array, StringArray},
    compute::{concat_batches, filter_record_batch},
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Read, Seek},
    ops::RangeInclusive,
    path::Path,
    sync::Arc,
};
use tracing::{debug, info};

pub mod convert;
pub mod schema;
pub mod utils;

use crate::sources::YEAR;
use convert::convert_to_final_types;
use schema::analyze_batch_for_schema;

/// The loaded dataset: one row per year, columns as they appear in the file.
///
/// `Year` is an `Int64` column with unique values; numeric columns are
/// `Float64` with nulls for missing cells; everything else is `Utf8`.
#[derive(Debug, Clone)]
pub struct EnergyTable {
    batch: RecordBatch,
    years: Vec<i64>,
}

impl EnergyTable {
    /// Read a CSV file from disk.
    #[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;
        let table = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to load {:?}", path.as_ref()))?;
        info!(
            rows = table.len(),
            columns = table.batch.num_columns(),
            "loaded energy table"
        );
        Ok(table)
    }

    /// Parse CSV text with a header row.
    ///
    /// Every column is first read as text, then typed by scanning all of its
    /// values.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        // 1) header names only
        let (header_schema, _) = Format::default()
            .with_header(true)
            .infer_schema(&mut reader, Some(0))
            .context("reading CSV header")?;
        reader.rewind().context("rewinding CSV reader")?;

        // 2) everything as text
        let fields: Vec<Field> = header_schema
            .fields()
            .iter()
            .map(|f| Field::new(f.name(), DataType::Utf8, true))
            .collect();
        let text_schema = Arc::new(Schema::new(fields));
        let csv = ReaderBuilder::new(text_schema.clone())
            .with_header(true)
            .build(reader)
            .context("creating CSV reader")?;
        let batches = csv
            .collect::<Result<Vec<RecordBatch>, _>>()
            .context("reading CSV records")?;
        let raw = concat_batches(&text_schema, &batches).context("concatenating CSV batches")?;

        // 3) type the columns
        if raw.schema().index_of(YEAR).is_err() {
            bail!("CSV has no {} column", YEAR);
        }
        let schema_info = analyze_batch_for_schema(&raw).context("failed to infer schema")?;
        let batch = convert_to_final_types(&raw, &schema_info)
            .context("failed to convert to final types")?;
        debug!(
            numeric = schema_info
                .kinds
                .iter()
                .filter(|k| **k == schema::ColumnKind::Numeric)
                .count(),
            "typed columns"
        );

        Self::from_batch(batch)
    }

    /// Wrap an already-typed batch, checking the `Year` invariants.
    pub fn from_batch(batch: RecordBatch) -> Result<Self> {
        let col = batch
            .column_by_name(YEAR)
            .ok_or_else(|| anyhow!("table has no {} column", YEAR))?;
        let arr = col
            .as_any()
            .downcast_ref::<Int64Array>()
            .ok_or_else(|| anyhow!("{} column is not Int64", YEAR))?;
        if arr.null_count() > 0 {
            bail!("{} column contains missing values", YEAR);
        }

        let years: Vec<i64> = arr.values().to_vec();
        let mut seen = HashSet::with_capacity(years.len());
        for y in &years {
            if !seen.insert(*y) {
                bail!("duplicate {} {} in table", YEAR, y);
            }
        }

        Ok(Self { batch, years })
    }

    pub fn len(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Year of every row, in file order.
    pub fn years(&self) -> &[i64] {
        &self.years
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// Columns the statistics treat as numeric, `Year` included.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .filter(|f| f.data_type().is_numeric())
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn is_numeric(&self, name: &str) -> bool {
        self.batch
            .schema()
            .field_with_name(name)
            .map(|f| f.data_type().is_numeric())
            .unwrap_or(false)
    }

    /// Values of a numeric column; `None` marks a missing cell.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let col = self
            .batch
            .column_by_name(name)
            .ok_or_else(|| anyhow!("column {:?} not found", name))?;

        if let Some(f) = col.as_any().downcast_ref::<Float64Array>() {
            return Ok(f.iter().collect());
        }
        if let Some(i) = col.as_any().downcast_ref::<Int64Array>() {
            return Ok(i.iter().map(|v| v.map(|v| v as f64)).collect());
        }
        bail!("column {:?} is not numeric", name)
    }

    /// Values of a text column; `None` marks a missing cell.
    pub fn text_column(&self, name: &str) -> Result<Vec<Option<String>>> {
        let col = self
            .batch
            .column_by_name(name)
            .ok_or_else(|| anyhow!("column {:?} not found", name))?;
        let s = col
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| anyhow!("column {:?} is not text", name))?;
        Ok(s.iter().map(|v| v.map(str::to_string)).collect())
    }

    /// Rows whose year lies in `range` (inclusive), original order kept.
    pub fn filter_years(&self, range: RangeInclusive<i64>) -> Result<Self> {
        let mask = BooleanArray::from(
            self.years
                .iter()
                .map(|y| range.contains(y))
                .collect::<Vec<bool>>(),
        );
        let batch = filter_record_batch(&self.batch, &mask)
            .with_context(|| format!("filtering years {}..={}", range.start(), range.end()))?;
        Self::from_batch(batch)
    }

    /// Row index holding `year`.
    pub fn row_for_year(&self, year: i64) -> Result<usize> {
        self.years
            .iter()
            .position(|y| *y == year)
            .ok_or_else(|| anyhow!("no row with {} == {}", YEAR, year))
    }

    /// Single value of a numeric column at `row`.
    pub fn value_at(&self, name: &str, row: usize) -> Result<Option<f64>> {
        let values = self.numeric_column(name)?;
        values
            .get(row)
            .copied()
            .ok_or_else(|| anyhow!("row {} out of range for {:?}", row, name))
    }
}
