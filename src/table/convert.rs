use crate::table::schema::{ColumnKind, SchemaInfo};
use crate::table::utils;
use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{Array, ArrayRef, Float64Builder, Int64Builder, StringArray, StringBuilder},
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// Convert string columns into their final types
pub fn convert_to_final_types(batch: &RecordBatch, schema_info: &SchemaInfo) -> Result<RecordBatch> {
    let mut out = Vec::with_capacity(batch.num_columns());

    for ((arr, fld), kind) in batch
        .columns()
        .iter()
        .zip(schema_info.schema.fields())
        .zip(&schema_info.kinds)
    {
        let sarr = arr
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| anyhow!("column {} was not read as text", fld.name()))?;

        match kind {
            // Year → i64, every row must carry one
            ColumnKind::Year => {
                let mut b = Int64Builder::with_capacity(sarr.len());
                for (row, opt) in sarr.iter().enumerate() {
                    let raw = opt.map(utils::clean_str).unwrap_or_default();
                    let year: i64 = raw.parse().with_context(|| {
                        format!("row {}: {} value {:?} is not an integer", row, fld.name(), raw)
                    })?;
                    b.append_value(year);
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }

            // Numeric → f64
            ColumnKind::Numeric => {
                let mut b = Float64Builder::with_capacity(sarr.len());
                for opt in sarr.iter() {
                    b.append_option(opt.and_then(utils::parse_f64));
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }

            // Text → trimmed, blanks and missing markers become nulls
            ColumnKind::Text => {
                let mut b = StringBuilder::new();
                for opt in sarr.iter() {
                    let v = opt.filter(|s| utils::is_present(s)).map(utils::clean_str);
                    b.append_option(v);
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }
        }
    }

    let schema = Arc::new(schema_info.schema.clone());
    RecordBatch::try_new(schema, out).map_err(Into::into)
}
