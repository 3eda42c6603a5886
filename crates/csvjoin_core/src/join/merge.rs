use csvjoin_error::Result;

use super::{AlignedPair, JoinColumn};
use crate::table::Table;

/// Combine an aligned pair into a single table.
///
/// The secondary copy of the join column is dropped, then both sides are
/// sorted by the primary key using the same permutation so the pairing is
/// kept. Output columns are the primary columns followed by the remaining
/// secondary columns in their original order.
pub fn merge(pair: AlignedPair, column: &JoinColumn) -> Result<Table> {
    let AlignedPair { primary, secondary } = pair;

    if primary.num_rows() != secondary.num_rows() {
        return Err(csvjoin_error::internal!(
            "unaligned join output, primary rows: {}, secondary rows: {}",
            primary.num_rows(),
            secondary.num_rows()
        ));
    }

    let secondary = secondary.drop_column(column.right_index())?;

    let order = primary.sort_indices(column.left_index())?;
    let (primary, secondary) = if is_identity(&order) {
        (primary, secondary)
    } else {
        (primary.take_rows(&order), secondary.take_rows(&order))
    };

    primary.hstack(secondary)
}

fn is_identity(order: &[usize]) -> bool {
    order.iter().enumerate().all(|(pos, idx)| pos == *idx)
}
