// src/reader/selection.rs
use crate::error::{NexError, Result};
use crate::header::VariableHeader;
use crate::types::{CaseSensitivity, VariableType};

/// Index-table positions of every entry of `var_type`, in on-disk order.
pub(crate) fn positions_of(variables: &[VariableHeader], var_type: VariableType) -> Vec<usize> {
    variables
        .iter()
        .filter(|v| v.var_type == var_type)
        .map(|v| v.index)
        .collect()
}

/// Map caller positions (0-based, among `candidates`) onto index-table positions.
///
/// `None` selects every candidate. Selected positions keep the caller's order.
pub(crate) fn select(candidates: &[usize], indices: Option<&[usize]>) -> Result<Vec<usize>> {
    match indices {
        None => Ok(candidates.to_vec()),
        Some(indices) => indices
            .iter()
            .map(|&i| {
                candidates.get(i).copied().ok_or(NexError::IndexOutOfRange {
                    index: i,
                    len: candidates.len(),
                })
            })
            .collect(),
    }
}

/// Keep the positions whose entry is named `name`.
pub(crate) fn matching_name(
    variables: &[VariableHeader],
    positions: &[usize],
    name: &str,
    case: CaseSensitivity,
) -> Vec<usize> {
    positions
        .iter()
        .copied()
        .filter(|&p| case.names_match(&variables[p].name, name))
        .collect()
}
