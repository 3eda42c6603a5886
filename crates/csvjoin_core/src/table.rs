use std::fmt;

use csvjoin_error::{JoinError, Result};
use hashbrown::HashMap;

use crate::column::Column;
use crate::scalar::ScalarValue;

/// A column-oriented table of data.
///
/// All columns hold the same number of rows, and column names are unique
/// when compared case-insensitively.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    /// Lower-cased column name to column index.
    lookup: HashMap<String, usize>,
    num_rows: usize,
}

impl Table {
    /// Create a new table from some columns.
    pub fn try_new(columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        let columns: Vec<_> = columns.into_iter().collect();
        let num_rows = columns.first().map(|c| c.len()).unwrap_or(0);

        let mut lookup = HashMap::with_capacity(columns.len());
        for (idx, col) in columns.iter().enumerate() {
            if col.len() != num_rows {
                return Err(JoinError::RowCountMismatch {
                    column: col.name().to_string(),
                    expected: num_rows,
                    got: col.len(),
                });
            }
            if lookup.insert(normalize(col.name()), idx).is_some() {
                return Err(JoinError::DuplicateColumn(col.name().to_string()));
            }
        }

        Ok(Table {
            columns,
            lookup,
            num_rows,
        })
    }

    /// Zero-row table with the same columns as `self`.
    pub fn empty_like(&self) -> Self {
        self.with_columns(self.columns.iter().map(|c| c.empty_like()).collect(), 0)
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, idx: usize) -> Option<&Column> {
        self.columns.get(idx)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name())
    }

    /// Find the index of a column, ignoring case.
    pub fn resolve_column(&self, name: &str) -> Option<usize> {
        self.lookup.get(&normalize(name)).copied()
    }

    /// Get a single row.
    pub fn row(&self, idx: usize) -> Option<Vec<&ScalarValue>> {
        if idx >= self.num_rows {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values()[idx]).collect())
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = Vec<&ScalarValue>> {
        (0..self.num_rows).map(|idx| self.columns.iter().map(|c| &c.values()[idx]).collect())
    }

    /// Select rows by index into a new table.
    ///
    /// Indices must be in bounds.
    pub fn take_rows(&self, indices: &[usize]) -> Table {
        let columns = self.columns.iter().map(|c| c.take(indices)).collect();
        self.with_columns(columns, indices.len())
    }

    /// Select rows by index, a `None` produces a row of nulls.
    pub fn take_rows_optional(&self, indices: &[Option<usize>]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| c.take_optional(indices))
            .collect();
        self.with_columns(columns, indices.len())
    }

    /// Row permutation that orders the table ascending by a column.
    ///
    /// The sort is stable, rows with equal values keep their relative order.
    pub fn sort_indices(&self, column: usize) -> Result<Vec<usize>> {
        let col = self
            .columns
            .get(column)
            .ok_or_else(|| csvjoin_error::internal!("sort column {column} out of bounds"))?;

        let values = col.values();
        let mut indices: Vec<usize> = (0..self.num_rows).collect();
        indices.sort_by(|&a, &b| values[a].cmp(&values[b]));

        Ok(indices)
    }

    /// Sort ascending by a column, returning a new table with contiguous row
    /// positions.
    pub fn sort_by_column(&self, column: usize) -> Result<Table> {
        let indices = self.sort_indices(column)?;
        Ok(self.take_rows(&indices))
    }

    /// Remove a column.
    pub fn drop_column(&self, column: usize) -> Result<Table> {
        if column >= self.columns.len() {
            return Err(csvjoin_error::internal!(
                "cannot drop column {column}, table has {} columns",
                self.columns.len()
            ));
        }

        let columns: Vec<_> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != column)
            .map(|(_, c)| c.clone())
            .collect();

        Ok(self.with_columns(columns, self.num_rows))
    }

    /// Horizontally stack two tables where `self` is on the left, and `other`
    /// is on the right.
    ///
    /// Both tables need to have the same number of rows.
    pub fn hstack(self, other: Table) -> Result<Table> {
        if self.num_rows != other.num_rows {
            return Err(JoinError::RowCountMismatch {
                column: other
                    .column_names()
                    .next()
                    .unwrap_or_default()
                    .to_string(),
                expected: self.num_rows,
                got: other.num_rows,
            });
        }

        let num_rows = self.num_rows;
        let mut table = Table::try_new(self.columns.into_iter().chain(other.columns))?;
        // Keep the row count when both sides have no columns.
        table.num_rows = num_rows;

        Ok(table)
    }

    /// Build a table from columns already known to satisfy the invariants of
    /// `self`.
    fn with_columns(&self, columns: Vec<Column>, num_rows: usize) -> Table {
        let lookup = columns
            .iter()
            .enumerate()
            .map(|(idx, c)| (normalize(c.name()), idx))
            .collect();

        Table {
            columns,
            lookup,
            num_rows,
        }
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.num_rows == other.num_rows && self.columns == other.columns
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Widths count chars, the same unit `{:<w$}` pads by.
        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| c.name().chars().count())
            .collect();
        let rendered: Vec<Vec<String>> = self
            .iter_rows()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();

        for row in &rendered {
            for (width, val) in widths.iter_mut().zip(row) {
                *width = (*width).max(val.chars().count());
            }
        }

        let names: Vec<_> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{:<w$}", c.name()))
            .collect();
        writeln!(f, "{}", names.join(" | ").trim_end())?;

        let sep: Vec<_> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write!(f, "{}", sep.join("-+-"))?;

        for row in rendered {
            writeln!(f)?;
            let vals: Vec<_> = row
                .iter()
                .zip(&widths)
                .map(|(v, &w)| format!("{v:<w$}"))
                .collect();
            write!(f, "{}", vals.join(" | ").trim_end())?;
        }

        Ok(())
    }
}
