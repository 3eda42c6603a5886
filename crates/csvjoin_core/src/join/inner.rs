use csvjoin_error::Result;
use hashbrown::HashMap;
use tracing::trace;

use super::keys::key_column;
use super::{AlignedPair, JoinColumn, common_keys};
use crate::scalar::ScalarValue;
use crate::table::Table;

/// Keep only the rows of both tables whose key is in both tables.
///
/// Matched left rows are emitted in their original order. Each one is paired
/// with every right row holding the same key, right rows in their original
/// order. No sorting happens here, `merge` sorts the pair by key.
pub fn inner_join(left: &Table, right: &Table, column: &JoinColumn) -> Result<AlignedPair> {
    let keys = common_keys(left, right, column)?;

    let left_keys = key_column(left, column.left_index())?;
    let right_keys = key_column(right, column.right_index())?;

    // Matching right rows per key.
    let mut buckets: HashMap<&ScalarValue, Vec<usize>> = HashMap::with_capacity(keys.len());
    for (idx, key) in right_keys.iter().enumerate() {
        if keys.contains(key) {
            buckets.entry(key).or_default().push(idx);
        }
    }

    let mut left_rows = Vec::new();
    let mut right_rows = Vec::new();

    for (idx, key) in left_keys.iter().enumerate() {
        if let Some(matches) = buckets.get(key) {
            for &right_idx in matches {
                left_rows.push(idx);
                right_rows.push(right_idx);
            }
        }
    }

    trace!(
        common_keys = keys.len(),
        matched = left_rows.len(),
        "inner join rows matched"
    );

    Ok(AlignedPair {
        primary: left.take_rows(&left_rows),
        secondary: right.take_rows(&right_rows),
    })
}
