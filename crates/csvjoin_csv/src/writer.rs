use std::fs::File;
use std::io::{self, Write as _};
use std::path::Path;

use csv::ByteRecord;
use csvjoin_core::table::Table;
use csvjoin_error::{JoinError, Result};
use tracing::debug;

use crate::dialect::DialectOptions;

/// Writes a `Table` as csv with a header row.
///
/// Nulls are written as empty fields. No index column is written.
#[derive(Debug)]
pub struct CsvWriter {
    /// Dialect of csv we're writing.
    dialect: DialectOptions,

    /// Buffer used for formatting a single value.
    format_buf: Vec<u8>,

    /// Buffer for current record.
    record: ByteRecord,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new(DialectOptions::default())
    }
}

impl CsvWriter {
    pub fn new(dialect: DialectOptions) -> Self {
        CsvWriter {
            dialect,
            format_buf: Vec::with_capacity(64),
            record: ByteRecord::new(),
        }
    }

    /// Create (or truncate) the file at `path` and write the table to it.
    pub fn write_path(&mut self, table: &Table, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| JoinError::write(path, e))?;
        self.write(table, path, io::BufWriter::new(file))
    }

    /// Write the table to `writer`.
    ///
    /// `output` names the destination in errors.
    pub fn write<W: io::Write>(&mut self, table: &Table, output: &Path, writer: W) -> Result<()> {
        let mut csv_writer = self.dialect.writer_builder().from_writer(writer);

        self.record.clear();
        for name in table.column_names() {
            self.record.push_field(name.as_bytes());
        }
        csv_writer
            .write_record(&self.record)
            .map_err(|e| JoinError::write(output, e))?;

        for row in table.iter_rows() {
            self.record.clear();
            for value in row {
                self.format_buf.clear();
                write!(&mut self.format_buf, "{value}")?;
                self.record.push_field(&self.format_buf);
            }
            csv_writer
                .write_record(&self.record)
                .map_err(|e| JoinError::write(output, e))?;
        }

        csv_writer.flush().map_err(|e| JoinError::write(output, e))?;

        debug!(
            output = %output.display(),
            rows = table.num_rows(),
            columns = table.num_columns(),
            "wrote csv"
        );

        Ok(())
    }
}
