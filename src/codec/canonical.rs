//! Canonical string form of a UI state.

use crate::types::{EntityId, FilterRange, FilterValue, RangeBound, UiState};
use serde_json::{Map, Number, Value};

/// Render a state as compact JSON with every object's keys in sorted order.
///
/// Keys are inserted in sorted order by hand so the output is stable even if
/// `serde_json` is built with `preserve_order`. Absent optional fields are
/// written as `null`.
pub fn canonicalize(state: &UiState) -> String {
    let mut root = Map::new();
    root.insert("filters".into(), filters_value(state));
    root.insert(
        "formMode".into(),
        state
            .form_mode
            .map_or(Value::Null, |mode| Value::from(mode.as_str())),
    );

    let mut pagination = Map::new();
    pagination.insert("page".into(), state.pagination.page.into());
    pagination.insert("pageSize".into(), state.pagination.page_size.into());
    root.insert("pagination".into(), Value::Object(pagination));

    root.insert(
        "selectedEntityId".into(),
        state
            .selected_entity_id
            .as_ref()
            .map_or(Value::Null, entity_value),
    );
    root.insert("showTrash".into(), state.show_trash.into());

    let mut sorting = Map::new();
    sorting.insert("direction".into(), state.sorting.direction.as_str().into());
    sorting.insert(
        "field".into(),
        state
            .sorting
            .field
            .as_deref()
            .map_or(Value::Null, Value::from),
    );
    root.insert("sorting".into(), Value::Object(sorting));

    root.insert("view".into(), state.view.as_str().into());

    Value::Object(root).to_string()
}

fn filters_value(state: &UiState) -> Value {
    // BTreeMap iteration is already sorted by filter name
    let filters = state
        .filters
        .iter()
        .map(|(name, value)| (name.clone(), filter_value(value)))
        .collect::<Map<String, Value>>();
    Value::Object(filters)
}

fn filter_value(value: &FilterValue) -> Value {
    match value {
        FilterValue::Bool(b) => Value::Bool(*b),
        FilterValue::Number(n) => number_value(n),
        FilterValue::Text(s) => Value::String(s.clone()),
        FilterValue::Range(range) => range_value(range),
    }
}

fn range_value(range: &FilterRange) -> Value {
    let mut map = Map::new();
    map.insert("from".into(), range.from.as_ref().map_or(Value::Null, bound_value));
    map.insert("to".into(), range.to.as_ref().map_or(Value::Null, bound_value));
    Value::Object(map)
}

fn bound_value(bound: &RangeBound) -> Value {
    match bound {
        RangeBound::Number(n) => number_value(n),
        RangeBound::Text(s) => Value::String(s.clone()),
    }
}

/// `-0.0` equals `0.0` but prints differently, so float zero is written as `0.0`.
fn number_value(n: &Number) -> Value {
    if n.is_f64() && n.as_f64() == Some(0.0) {
        Value::from(0.0)
    } else {
        Value::Number(n.clone())
    }
}

fn entity_value(id: &EntityId) -> Value {
    match id {
        EntityId::Number(n) => number_value(n),
        EntityId::Text(s) => Value::String(s.clone()),
    }
}
