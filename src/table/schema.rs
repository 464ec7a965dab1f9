use crate::sources::YEAR;
use crate::table::utils::{is_number, is_present};
use anyhow::{anyhow, Result};
use arrow::{
    array::StringArray,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};

/// How a raw text column is typed once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Year,
    Numeric,
    Text,
}

/// Final schema + the kind decided for each column
pub struct SchemaInfo {
    pub schema: Schema,
    pub kinds: Vec<ColumnKind>,
}

/// Scan every value of a string-typed batch and decide each column's type.
///
/// A column is numeric when every present cell parses as a number. Blank and
/// missing-marker cells ("NaN", "NA", ...) don't count, so a column with no
/// present cell at all is numeric and all-missing. `Year` is always typed as
/// the integer key.
pub fn analyze_batch_for_schema(batch: &RecordBatch) -> Result<SchemaInfo> {
    let raw_schema = batch.schema();
    let mut fields = Vec::with_capacity(batch.num_columns());
    let mut kinds = Vec::with_capacity(batch.num_columns());

    for (i, field) in raw_schema.fields().iter().enumerate() {
        let name = field.name();
        let sarr = batch
            .column(i)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| anyhow!("column {} was not read as text", name))?;

        if name == YEAR {
            fields.push(Field::new(name, DataType::Int64, false));
            kinds.push(ColumnKind::Year);
            continue;
        }

        let numeric = sarr
            .iter()
            .flatten()
            .filter(|s| is_present(s))
            .all(is_number);

        if numeric {
            fields.push(Field::new(name, DataType::Float64, true));
            kinds.push(ColumnKind::Numeric);
        } else {
            fields.push(Field::new(name, DataType::Utf8, true));
            kinds.push(ColumnKind::Text);
        }
    }

    Ok(SchemaInfo {
        schema: Schema::new(fields),
        kinds,
    })
}
