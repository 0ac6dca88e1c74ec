//! Two-way binding between [`Selection`] and the page's query string.
//!
//! The URL is the source of truth on load and on browser navigation; the
//! selection is the source of truth on user interaction. Unrelated query
//! keys (filters, other pages' state) survive every write.

use super::selection::{Level, Selection};
use contracts::domain::common::EntityId;
use std::collections::BTreeMap;

pub type QueryMap = BTreeMap<String, String>;

/// Parse `?a=1&b=2` (leading `?` optional). Malformed input yields an empty map.
pub fn parse_query(search: &str) -> QueryMap {
    let raw = search.trim_start_matches('?');
    if raw.is_empty() {
        return QueryMap::new();
    }
    match serde_qs::from_str::<QueryMap>(raw) {
        Ok(map) => map,
        Err(e) => {
            log::warn!("Ignoring malformed query string '{}': {}", raw, e);
            QueryMap::new()
        }
    }
}

/// Serialize without the leading `?`
pub fn to_query(map: &QueryMap) -> String {
    serde_qs::to_string(map).unwrap_or_default()
}

/// Set `key` to the trimmed `value`, or drop it when blank.
pub fn set_param(map: &mut QueryMap, key: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        map.remove(key);
    } else {
        map.insert(key.to_string(), value.to_string());
    }
}

/// Non-numeric or empty values are treated as absent.
pub fn parse_id(map: &QueryMap, key: &str) -> Option<EntityId> {
    map.get(key).and_then(|v| v.trim().parse::<EntityId>().ok())
}

impl Selection {
    pub fn from_query(search: &str) -> Self {
        Self::from_query_map(&parse_query(search))
    }

    pub fn from_query_map(map: &QueryMap) -> Self {
        Selection::from_parts(
            parse_id(map, Level::Factory.query_key()),
            parse_id(map, Level::FactorySection.query_key()),
            parse_id(map, Level::Machine.query_key()),
            parse_id(map, Level::Part.query_key()),
        )
    }

    /// Put the selection into `search`: keys of selected levels are set,
    /// keys of empty levels removed, everything else kept.
    pub fn write_query(&self, search: &str) -> String {
        let mut map = parse_query(search);
        for level in Level::ALL {
            match self.get(level) {
                Some(id) => {
                    map.insert(level.query_key().to_string(), id.to_string());
                }
                None => {
                    map.remove(level.query_key());
                }
            }
        }
        to_query(&map)
    }
}

/// Remembers what was last read from the URL so that echoing it back does not
/// cause a second write.
#[derive(Clone, Debug, Default)]
pub struct QuerySync {
    last_read: Option<Selection>,
}

impl QuerySync {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL changed from outside (page load, back/forward). Returns the
    /// selection to adopt, or `None` when the URL already matches `current`.
    pub fn on_url_change(&mut self, search: &str, current: &Selection) -> Option<Selection> {
        let from_url = Selection::from_query(search);
        if from_url == *current {
            return None;
        }
        self.last_read = Some(from_url);
        Some(from_url)
    }

    /// Selection changed. Returns the new query string (without `?`) to
    /// write, or `None` when nothing needs to be written.
    pub fn on_state_change(&mut self, state: &Selection, search: &str) -> Option<String> {
        if self.last_read.take() == Some(*state) {
            return None;
        }
        if Selection::from_query(search) == *state {
            return None;
        }
        let next = state.write_query(search);
        if next == search.trim_start_matches('?') {
            return None;
        }
        Some(next)
    }
}
