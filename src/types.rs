//! Core types for the state store.

use crate::error::{Result, StateError};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Page size of the default state.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Number of hex characters in a non-sentinel key.
pub const KEY_LEN: usize = 16;

/// Which UI mode is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    List,
    Form,
    Detail,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::List => "list",
            View::Form => "form",
            View::Detail => "detail",
        }
    }
}

/// Sub-mode of the form view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FormMode::Create => "create",
            FormMode::Edit => "edit",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Sort column and direction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sorting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl Sorting {
    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: Some(field.into()),
            direction,
        }
    }
}

/// One-based page number and page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One end of a range filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeBound {
    Number(Number),
    Text(String),
}

/// Inclusive range filter; either end may be open.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<RangeBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<RangeBound>,
}

/// Value of a single filter field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(Number),
    Text(String),
    Range(FilterRange),
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Number(n.into())
    }
}

impl From<FilterRange> for FilterValue {
    fn from(range: FilterRange) -> Self {
        FilterValue::Range(range)
    }
}

/// Identifier of the focused record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(Number),
    Text(String),
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Number(n.into())
    }
}

impl From<u64> for EntityId {
    fn from(n: u64) -> Self {
        EntityId::Number(n.into())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// List, filter and pagination state of one UI screen.
///
/// A pure value: two states with the same content are the same state and
/// map to the same key. `UiState::default()` is the canonical default state,
/// which is never stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiState {
    pub view: View,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_mode: Option<FormMode>,
    pub filters: BTreeMap<String, FilterValue>,
    pub sorting: Sorting,
    pub pagination: Pagination,
    pub show_trash: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_entity_id: Option<EntityId>,
}

impl UiState {
    /// Add a filter.
    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }

    /// Set sorting.
    pub fn with_sorting(mut self, sorting: Sorting) -> Self {
        self.sorting = sorting;
        self
    }

    /// Set pagination.
    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.pagination = Pagination { page, page_size };
        self
    }

    /// Switch to the form view in the given mode.
    pub fn with_form(mut self, mode: FormMode) -> Self {
        self.view = View::Form;
        self.form_mode = Some(mode);
        self
    }

    /// Focus a single record.
    pub fn with_selected(mut self, id: impl Into<EntityId>) -> Self {
        self.selected_entity_id = Some(id.into());
        self
    }
}

/// Opaque reference to a stored state.
///
/// The empty key is the sentinel for the default state. Every other key is
/// [`KEY_LEN`] lowercase hex characters.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateKey(String);

impl StateKey {
    /// The key returned for the default state.
    pub fn sentinel() -> Self {
        StateKey(String::new())
    }

    pub fn is_sentinel(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an already-truncated digest.
    pub(crate) fn from_digest(digest: String) -> Self {
        debug_assert_eq!(digest.len(), KEY_LEN);
        StateKey(digest)
    }
}

impl FromStr for StateKey {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(StateKey::sentinel());
        }
        if s.len() != KEY_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(StateError::InvalidKey(s.to_string()));
        }
        Ok(StateKey(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for StateKey {
    type Error = StateError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<StateKey> for String {
    fn from(key: StateKey) -> Self {
        key.0
    }
}

impl fmt::Debug for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sentinel() {
            write!(f, "StateKey(<default>)")
        } else {
            write!(f, "StateKey({})", self.0)
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Time-to-live of a stored entry, in milliseconds. Never zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ttl(u64);

impl Ttl {
    /// 24 hours.
    pub const DEFAULT: Ttl = Ttl(24 * 60 * 60 * 1000);

    pub fn from_millis(millis: u64) -> Result<Self> {
        if millis == 0 {
            return Err(StateError::InvalidTtl(millis));
        }
        Ok(Ttl(millis))
    }

    pub fn from_secs(secs: u64) -> Result<Self> {
        Self::from_millis(secs.saturating_mul(1000))
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for Ttl {
    fn default() -> Self {
        Ttl::DEFAULT
    }
}

impl TryFrom<Duration> for Ttl {
    type Error = StateError;

    fn try_from(duration: Duration) -> Result<Self> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Ttl::from_millis(millis)
    }
}

impl fmt::Debug for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ttl({}ms)", self.0)
    }
}

/// Milliseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current wall-clock time.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp(i64::try_from(duration.as_millis()).unwrap_or(i64::MAX))
    }

    /// Milliseconds elapsed since `earlier`; zero if the clock went backwards.
    pub fn millis_since(self, earlier: Timestamp) -> u64 {
        u64::try_from(self.0.saturating_sub(earlier.0)).unwrap_or(0)
    }

    pub fn plus_millis(self, millis: u64) -> Self {
        let millis = i64::try_from(millis).unwrap_or(i64::MAX);
        Timestamp(self.0.saturating_add(millis))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// Diagnostic counters for the table. Not used for control flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateStats {
    /// Live entries after the sweep.
    pub count: usize,
    /// Sum of key and canonical state lengths of the live entries.
    pub approximate_size_bytes: usize,
}
