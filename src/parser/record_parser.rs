use csv::StringRecord;

use crate::models::{CandidateDeal, DealFields, StructuralError};
use crate::parser::REQUIRED_HEADERS;

/// Positions of the five deal columns within a row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    deal_id: usize,
    from_currency: usize,
    to_currency: usize,
    timestamp: usize,
    amount: usize
}

/// Decomposes raw rows into candidate deals using the header's label positions.
///
/// Labels are matched by name, so column order in the input is irrelevant. A header
/// missing any required label still yields a parser; every row it sees is then a
/// structural error.
#[derive(Debug, Clone)]
pub struct RecordParser {
    columns: Result<ColumnMap, StructuralError>,
    width: usize
}

impl RecordParser {
    pub fn from_headers(headers: &StringRecord) -> Self {
        Self {
            columns: locate_columns(headers),
            width: headers.len()
        }
    }

    /// Extracts the five deal fields from `record`.
    ///
    /// # Errors
    /// Returns `StructuralError` if the header lacks a required label or the row's
    /// column count differs from the header's.
    pub fn parse(&self, line: u64, record: &StringRecord) -> Result<CandidateDeal, StructuralError> {
        let columns = self.columns.as_ref().map_err(Clone::clone)?;

        if record.len() != self.width {
            return Err(StructuralError::ColumnCount { expected: self.width, found: record.len() });
        }

        let field = |index: usize| record.get(index).unwrap_or_default().to_string();

        let raw = DealFields {
            deal_id: field(columns.deal_id),
            from_currency: field(columns.from_currency),
            to_currency: field(columns.to_currency),
            timestamp: field(columns.timestamp),
            amount: field(columns.amount)
        };

        Ok(CandidateDeal {
            line,
            fields: raw.trimmed(),
            raw,
            raw_payload: raw_payload(record)
        })
    }
}

fn locate_columns(headers: &StringRecord) -> Result<ColumnMap, StructuralError> {
    let find = |label: &'static str| {
        headers.iter()
            .position(|header| header.trim() == label)
            .ok_or(StructuralError::MissingHeader { label })
    };

    let mut positions = [0; 5];

    for (position, label) in positions.iter_mut().zip(REQUIRED_HEADERS) {
        *position = find(label)?;
    }

    let [deal_id, from_currency, to_currency, timestamp, amount] = positions;

    Ok(ColumnMap { deal_id, from_currency, to_currency, timestamp, amount })
}

/// The row as submitted, comma joined.
pub fn raw_payload(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}
