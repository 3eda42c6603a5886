use std::io;

use csvjoin_core::column::Column;
use csvjoin_core::scalar::{DataType, ScalarValue};
use csvjoin_core::table::Table;
use csvjoin_error::{JoinError, Result};
use tracing::debug;

use crate::dialect::DialectOptions;

/// Field values read as null regardless of column type.
pub const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_null_marker(field: &str) -> bool {
    NULL_MARKERS.contains(&field)
}

fn parse_bool(field: &str) -> Option<bool> {
    if field.eq_ignore_ascii_case("true") {
        Some(true)
    } else if field.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Optional sign followed by ascii digits.
fn is_integer_literal(field: &str) -> bool {
    let digits = field.strip_prefix(['+', '-']).unwrap_or(field);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn parse_int(field: &str) -> Option<i64> {
    field.parse().ok()
}

/// Parse a finite float.
///
/// Integer literals outside the i64 range and spellings of nan or infinity are
/// not floats, they stay text so the value is kept exactly.
fn parse_float(field: &str) -> Option<f64> {
    if is_integer_literal(field) && parse_int(field).is_none() {
        return None;
    }
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Candidate types for a column.
///
/// A column starts as `Null` and widens as non-null fields are seen. Booleans
/// don't widen into numbers, a column mixing the two becomes `Utf8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CandidateType {
    /// No non-null field seen yet.
    Null,
    Boolean,
    Int64,
    Float64,
    /// Encompasses any field.
    Utf8,
}

impl CandidateType {
    const fn as_datatype(&self) -> DataType {
        match self {
            Self::Null => DataType::Null,
            Self::Boolean => DataType::Boolean,
            Self::Int64 => DataType::Int64,
            Self::Float64 => DataType::Float64,
            Self::Utf8 => DataType::Utf8,
        }
    }

    fn narrowest_for(input: &str) -> Self {
        if parse_bool(input).is_some() {
            Self::Boolean
        } else if parse_int(input).is_some() {
            Self::Int64
        } else if parse_float(input).is_some() {
            Self::Float64
        } else {
            Self::Utf8
        }
    }

    /// Update this candidate type based on some non-null input.
    fn update_from_input(&mut self, input: &str) {
        *self = match *self {
            Self::Null => Self::narrowest_for(input),
            Self::Boolean if parse_bool(input).is_some() => Self::Boolean,
            Self::Int64 if parse_int(input).is_some() => Self::Int64,
            Self::Int64 | Self::Float64 if parse_float(input).is_some() => Self::Float64,
            _ => Self::Utf8,
        }
    }

    /// Convert a field that's valid for this candidate.
    fn parse(&self, input: &str) -> ScalarValue {
        if is_null_marker(input) {
            return ScalarValue::Null;
        }
        let parsed = match self {
            Self::Null => None,
            Self::Boolean => parse_bool(input).map(ScalarValue::Boolean),
            Self::Int64 => parse_int(input).map(ScalarValue::Int64),
            Self::Float64 => parse_float(input).map(ScalarValue::float64),
            Self::Utf8 => None,
        };
        parsed.unwrap_or_else(|| ScalarValue::utf8(input))
    }
}

/// Reads csv data with a header row into a `Table`.
///
/// Column types are inferred from every field in the column.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReader {
    dialect: DialectOptions,
}

impl CsvReader {
    pub fn new(dialect: DialectOptions) -> Self {
        CsvReader { dialect }
    }

    /// Read a table from `reader`.
    ///
    /// `input` names the source in errors.
    pub fn read<R: io::Read>(&self, input: &str, reader: R) -> Result<Table> {
        let mut csv_reader = self.dialect.reader_builder().from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| JoinError::read(input, e))?
            .clone();
        if headers.is_empty() {
            return Err(JoinError::read(input, "missing header row"));
        }

        let mut fields: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        let mut candidates = vec![CandidateType::Null; headers.len()];

        let mut record = csv::StringRecord::new();
        while csv_reader
            .read_record(&mut record)
            .map_err(|e| JoinError::read(input, e))?
        {
            for ((field, candidate), values) in record
                .iter()
                .zip(candidates.iter_mut())
                .zip(fields.iter_mut())
            {
                if !is_null_marker(field) {
                    candidate.update_from_input(field);
                }
                values.push(field.to_string());
            }
        }

        let types: Vec<DataType> = candidates.iter().map(|c| c.as_datatype()).collect();

        let columns = headers
            .iter()
            .zip(candidates)
            .zip(fields)
            .map(|((name, candidate), values)| {
                Column::new(name, values.iter().map(|v| candidate.parse(v)))
            });
        let table = Table::try_new(columns)?;

        debug!(
            %input,
            rows = table.num_rows(),
            columns = table.num_columns(),
            ?types,
            "read csv"
        );

        Ok(table)
    }
}
