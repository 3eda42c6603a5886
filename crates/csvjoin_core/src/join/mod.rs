//! Key-equality joins between two in-memory tables.
//!
//! Every join runs in three steps:
//!
//! 1. Compute the set of keys present on both sides (`common_keys`).
//! 2. Build a pair of row-aligned sub-tables with a join strategy. Row `i` of
//!    the secondary side is the partner of row `i` of the primary side, or a
//!    row of nulls when the primary row has no partner.
//! 3. Merge the pair into a single table sorted by the join key, dropping the
//!    secondary copy of the key column.
//!
//! Right joins run the left join strategy with the inputs swapped, so the
//! right table's columns lead the output.

mod inner;
mod keys;
mod merge;
mod outer;

use std::fmt;
use std::str::FromStr;

use csvjoin_error::{JoinError, Result};
pub use inner::inner_join;
pub use keys::{KeySet, common_keys};
pub use merge::merge;
pub use outer::outer_join;
use tracing::debug;

use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
}

impl FromStr for JoinType {
    type Err = JoinError;

    fn from_str(s: &str) -> Result<Self> {
        const TYPES: [(&str, JoinType); 3] = [
            ("inner", JoinType::Inner),
            ("left", JoinType::Left),
            ("right", JoinType::Right),
        ];

        TYPES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, typ)| *typ)
            .ok_or_else(|| JoinError::InvalidJoinType(s.to_string()))
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner => write!(f, "INNER"),
            Self::Left => write!(f, "LEFT"),
            Self::Right => write!(f, "RIGHT"),
        }
    }
}

/// Join column resolved against both inputs.
///
/// "Left" and "right" here are relative to the call the column is passed to.
/// Swapping the inputs of a join requires swapping the column as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinColumn {
    /// Name as requested by the caller.
    name: String,
    left: usize,
    right: usize,
}

impl JoinColumn {
    /// Resolve a column name against both tables, ignoring case.
    pub fn resolve(name: &str, left: &Table, right: &Table) -> Result<Self> {
        let left_idx = left
            .resolve_column(name)
            .ok_or_else(|| JoinError::invalid_column(name, "left"))?;
        let right_idx = right
            .resolve_column(name)
            .ok_or_else(|| JoinError::invalid_column(name, "right"))?;

        Ok(JoinColumn {
            name: name.to_string(),
            left: left_idx,
            right: right_idx,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn left_index(&self) -> usize {
        self.left
    }

    pub const fn right_index(&self) -> usize {
        self.right
    }

    /// The same column with the sides exchanged.
    pub fn swapped(&self) -> Self {
        JoinColumn {
            name: self.name.clone(),
            left: self.right,
            right: self.left,
        }
    }
}

/// Output of a join strategy.
///
/// Both tables have the same number of rows, and row `i` of `secondary`
/// belongs next to row `i` of `primary`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub primary: Table,
    pub secondary: Table,
}

/// Join two tables on a column.
pub fn join_tables(
    left: &Table,
    right: &Table,
    column: &JoinColumn,
    join_type: JoinType,
) -> Result<Table> {
    debug!(
        %join_type,
        column = column.name(),
        left_rows = left.num_rows(),
        right_rows = right.num_rows(),
        "joining tables"
    );

    let out = match join_type {
        JoinType::Inner => merge(inner_join(left, right, column)?, column)?,
        JoinType::Left => merge(outer_join(left, right, column)?, column)?,
        JoinType::Right => {
            let swapped = column.swapped();
            merge(outer_join(right, left, &swapped)?, &swapped)?
        }
    };

    debug!(
        rows = out.num_rows(),
        columns = out.num_columns(),
        "join complete"
    );

    Ok(out)
}
