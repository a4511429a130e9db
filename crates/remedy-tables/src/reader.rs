//! Shared CSV plumbing for the relation tables.
//!
//! Tables are read with a header row and required columns resolved by name,
//! so extra or reordered columns are tolerated. Header names are trimmed;
//! cells are returned as written and callers trim the key columns they match
//! on. Rows shorter than the header are padded with empty cells.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use remedy_contracts::error::{RemedyError, RemedyResult};

/// Read every data row of `reader`, returning the cells of `required`
/// columns in the order given.
///
/// Returns `RemedyError::DataUnavailable` when the header lacks a required
/// column or a row cannot be parsed. A missing trailing cell reads as `""`. `table` names the table in messages.
pub(crate) fn read_columns<R: Read, const N: usize>(
    reader: R,
    table: &str,
    required: [&str; N],
) -> RemedyResult<Vec<[String; N]>> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| {
        RemedyError::data_unavailable(format!("failed to read {table} header: {e}"))
    })?;
    let indices = resolve(headers, table, &required)?;

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| {
            RemedyError::data_unavailable(format!(
                "failed to parse {table} row {}: {e}",
                line + 2
            ))
        })?;
        rows.push(std::array::from_fn(|i| {
            record.get(indices[i]).unwrap_or_default().to_string()
        }));
    }
    Ok(rows)
}

fn resolve<const N: usize>(
    headers: &StringRecord,
    table: &str,
    required: &[&str; N],
) -> RemedyResult<[usize; N]> {
    let mut indices = [0usize; N];
    for (slot, column) in indices.iter_mut().zip(required.iter()) {
        *slot = headers
            .iter()
            .position(|h| h == *column)
            .ok_or_else(|| {
                RemedyError::data_unavailable(format!(
                    "{table} is missing required column '{column}'"
                ))
            })?;
    }
    Ok(indices)
}
