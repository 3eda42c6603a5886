use csvjoin_error::Result;
use hashbrown::HashSet;
use tracing::trace;

use super::JoinColumn;
use crate::scalar::ScalarValue;
use crate::table::Table;

/// Join key values present in both inputs.
///
/// Nulls are never members, a missing key doesn't match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    keys: HashSet<ScalarValue>,
}

impl KeySet {
    pub fn contains(&self, key: &ScalarValue) -> bool {
        !key.is_null() && self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<ScalarValue> for KeySet {
    fn from_iter<T: IntoIterator<Item = ScalarValue>>(iter: T) -> Self {
        KeySet {
            keys: iter.into_iter().filter(|v| !v.is_null()).collect(),
        }
    }
}

/// Compute the keys found in the join column of both tables.
///
/// Every left value is probed against the distinct right values. Left values
/// that appear more than once are only recorded once.
pub fn common_keys(left: &Table, right: &Table, column: &JoinColumn) -> Result<KeySet> {
    let left_col = key_column(left, column.left_index())?;
    let right_col = key_column(right, column.right_index())?;

    let distinct_right: HashSet<&ScalarValue> = right_col
        .iter()
        .filter(|v| !v.is_null())
        .collect();

    let keys: HashSet<ScalarValue> = left_col
        .iter()
        .filter(|v| distinct_right.contains(v))
        .cloned()
        .collect();

    trace!(
        distinct_right = distinct_right.len(),
        common = keys.len(),
        "computed common keys"
    );

    Ok(KeySet { keys })
}

/// Values of the join column for one side.
pub(super) fn key_column(table: &Table, idx: usize) -> Result<&[ScalarValue]> {
    table
        .column(idx)
        .map(|c| c.values())
        .ok_or_else(|| csvjoin_error::internal!("join column index {idx} out of bounds"))
}
