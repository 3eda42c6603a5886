use csvjoin_error::Result;
use tracing::trace;

use super::keys::key_column;
use super::{AlignedPair, JoinColumn, KeySet, common_keys};
use crate::scalar::ScalarValue;
use crate::table::Table;

/// Keep every row of `primary`, pairing it with its matches in `opposite`.
///
/// Both sides are sorted by key first. Primary rows without a match are
/// paired with a row of nulls at the same position. A left join is
/// `outer_join(left, right, column)`, a right join is
/// `outer_join(right, left, &column.swapped())`.
pub fn outer_join(primary: &Table, opposite: &Table, column: &JoinColumn) -> Result<AlignedPair> {
    let keys = common_keys(primary, opposite, column)?;

    let primary = primary.sort_by_column(column.left_index())?;
    let opposite = opposite.sort_by_column(column.right_index())?;

    let (primary_rows, opposite_rows) = align_sorted(
        key_column(&primary, column.left_index())?,
        key_column(&opposite, column.right_index())?,
        &keys,
    );

    trace!(
        common_keys = keys.len(),
        rows = primary_rows.len(),
        padded = opposite_rows.iter().filter(|r| r.is_none()).count(),
        "outer join rows aligned"
    );

    // Every primary row appears exactly once unless a key has more than one
    // match, skip the copy when that's the case.
    let primary = if primary_rows.len() == primary.num_rows() {
        primary
    } else {
        primary.take_rows(&primary_rows)
    };

    Ok(AlignedPair {
        primary,
        secondary: opposite.take_rows_optional(&opposite_rows),
    })
}

/// Walk two key-sorted columns with a cursor each.
///
/// For every run of equal keys on the primary side, the matching run on the
/// opposite side is located by advancing its cursor. A run with a partner run
/// emits every combination of the two, a run without one emits each primary
/// row next to `None`.
///
/// Returns row indices into the primary and opposite sides, one entry per
/// output row.
fn align_sorted(
    primary: &[ScalarValue],
    opposite: &[ScalarValue],
    keys: &KeySet,
) -> (Vec<usize>, Vec<Option<usize>>) {
    let mut primary_rows = Vec::with_capacity(primary.len());
    let mut opposite_rows = Vec::with_capacity(primary.len());

    let mut p = 0;
    let mut o = 0;

    while p < primary.len() {
        let key = &primary[p];
        let p_end = run_end(primary, p);

        let mut o_range = o..o;
        if keys.contains(key) {
            while o < opposite.len() && opposite[o] < *key {
                o += 1;
            }
            let o_end = if o < opposite.len() && opposite[o] == *key {
                run_end(opposite, o)
            } else {
                o
            };
            o_range = o..o_end;
            o = o_end;
        }

        if o_range.is_empty() {
            for row in p..p_end {
                primary_rows.push(row);
                opposite_rows.push(None);
            }
        } else {
            for row in p..p_end {
                for opp in o_range.clone() {
                    primary_rows.push(row);
                    opposite_rows.push(Some(opp));
                }
            }
        }

        p = p_end;
    }

    (primary_rows, opposite_rows)
}

/// Index one past the last value equal to `values[start]`.
fn run_end(values: &[ScalarValue], start: usize) -> usize {
    let key = &values[start];
    let mut end = start + 1;
    while end < values.len() && values[end] == *key {
        end += 1;
    }
    end
}
