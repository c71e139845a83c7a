//! Recognition of the default state.
//!
//! The default state never occupies a table slot; it is represented by the
//! sentinel key instead. Detection compares values field by field, never
//! keys, so a digest collision can not masquerade as the default.

use crate::types::{Pagination, SortDirection, Sorting, UiState, View};

/// Whether `state` is indistinguishable from `UiState::default()`.
pub fn is_default(state: &UiState) -> bool {
    // Destructured so a new field fails to compile until it is handled here.
    let UiState {
        view,
        form_mode,
        filters,
        sorting,
        pagination,
        show_trash,
        selected_entity_id,
    } = state;

    *view == View::List
        && form_mode.is_none()
        && filters.is_empty()
        && is_default_sorting(sorting)
        && *pagination == Pagination::default()
        && !show_trash
        && selected_entity_id.is_none()
}

fn is_default_sorting(sorting: &Sorting) -> bool {
    sorting.field.is_none() && sorting.direction == SortDirection::Ascending
}
