//! Dependent option list for one cascade level.
//!
//! Every fetch is described by a [`FetchTicket`]. Only the ticket of the most
//! recent request may change the list; responses for superseded tickets are
//! dropped, so a slow answer for an old parent never replaces the options of
//! the new one.

use super::selection::Level;
use crate::shared::error::{ApiError, ConsoleError};
use contracts::domain::common::{Entity, EntityId};

/// Identifies one fetch: which level, for which parent, which request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub level: Level,
    pub parent: Option<EntityId>,
    pub generation: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    /// Parent not selected
    Empty,
    /// Fetch in flight. `previous` keeps the old list visible during a reload
    /// for the same parent.
    Loading { previous: Vec<T> },
    Loaded(Vec<T>),
    Error(String),
}

/// Result of handing a response to a level
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Applied,
    Failed(ConsoleError),
    /// Ticket no longer current; nothing changed.
    Stale,
}

#[derive(Clone, Debug)]
pub struct OptionLevel<T> {
    level: Level,
    /// Root level (factories) has no parent and is always loadable.
    root: bool,
    parent: Option<EntityId>,
    generation: u64,
    state: LoadState<T>,
}

impl<T: Entity + Clone> OptionLevel<T> {
    pub fn root(level: Level) -> Self {
        Self {
            level,
            root: true,
            parent: None,
            generation: 0,
            state: LoadState::Empty,
        }
    }

    pub fn dependent(level: Level) -> Self {
        Self {
            level,
            root: false,
            parent: None,
            generation: 0,
            state: LoadState::Empty,
        }
    }

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    /// Options to render. Empty unless loaded (or reloading).
    pub fn options(&self) -> &[T] {
        match &self.state {
            LoadState::Loaded(items) => items,
            LoadState::Loading { previous } => previous,
            LoadState::Empty | LoadState::Error(_) => &[],
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.options().iter().any(|item| item.id() == id)
    }

    /// Mutable access to a loaded list, for the in-place factory edit.
    pub fn loaded_mut(&mut self) -> Option<&mut Vec<T>> {
        match &mut self.state {
            LoadState::Loaded(items) => Some(items),
            _ => None,
        }
    }

    /// Parent selection changed. An absent parent empties the level at once;
    /// a new parent starts a fetch. The same parent again is a no-op unless
    /// the level has nothing to show yet.
    pub fn set_parent(&mut self, parent: Option<EntityId>) -> Option<FetchTicket> {
        if self.root {
            return None;
        }
        if parent == self.parent && !matches!(self.state, LoadState::Empty) {
            return None;
        }
        self.parent = parent;
        self.generation += 1;
        match parent {
            None => {
                self.state = LoadState::Empty;
                None
            }
            Some(_) => {
                self.state = LoadState::Loading { previous: Vec::new() };
                Some(self.ticket())
            }
        }
    }

    /// Re-fetch for the current parent (after a mutation, or the root load).
    pub fn reload(&mut self) -> Option<FetchTicket> {
        if !self.root && self.parent.is_none() {
            return None;
        }
        self.generation += 1;
        let previous = self.options().to_vec();
        self.state = LoadState::Loading { previous };
        Some(self.ticket())
    }

    /// Hand over the response for `ticket`.
    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<Vec<T>, ApiError>) -> Resolution {
        if !self.is_current(ticket) {
            log::debug!(
                "{:?}: dropping stale response (gen {} parent {:?}, now gen {} parent {:?})",
                self.level,
                ticket.generation,
                ticket.parent,
                self.generation,
                self.parent
            );
            return Resolution::Stale;
        }
        match result {
            Ok(items) => {
                self.state = LoadState::Loaded(items);
                Resolution::Applied
            }
            Err(e) => {
                let err = ConsoleError::fetch(T::list_name(), e);
                self.state = LoadState::Error(err.to_string());
                Resolution::Failed(err)
            }
        }
    }

    /// The timer for `ticket` fired. If that request is still pending the
    /// level fails; its late response will be dropped.
    pub fn time_out(&mut self, ticket: FetchTicket, after_ms: u32) -> Option<ConsoleError> {
        if !self.is_current(ticket) {
            return None;
        }
        let err = ConsoleError::fetch(T::list_name(), ApiError::Timeout(after_ms));
        self.state = LoadState::Error(err.to_string());
        Some(err)
    }

    /// `ticket` is the request this level is still waiting for.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.level == self.level
            && ticket.generation == self.generation
            && ticket.parent == self.parent
            && self.is_loading()
    }

    fn ticket(&self) -> FetchTicket {
        FetchTicket {
            level: self.level,
            parent: self.parent,
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_factory_section::aggregate::FactorySection;

    fn section(id: EntityId, factory_id: EntityId) -> FactorySection {
        FactorySection {
            id,
            name: format!("S{}", id),
            factory_id,
        }
    }

    #[test]
    fn test_absent_parent_is_empty() {
        let mut level = OptionLevel::<FactorySection>::dependent(Level::FactorySection);
        assert_eq!(level.set_parent(None), None);
        assert_eq!(level.state(), &LoadState::Empty);
        assert!(level.options().is_empty());
    }

    #[test]
    fn test_load_then_apply() {
        let mut level = OptionLevel::dependent(Level::FactorySection);
        let ticket = level.set_parent(Some(1)).expect("fetch");
        assert!(level.is_loading());
        let res = level.resolve(ticket, Ok(vec![section(10, 1), section(11, 1)]));
        assert_eq!(res, Resolution::Applied);
        assert!(level.contains(11));
        assert!(!level.contains(12));
    }

    #[test]
    fn test_stale_response_for_old_parent_is_dropped() {
        let mut level = OptionLevel::dependent(Level::FactorySection);
        let first = level.set_parent(Some(1)).unwrap();
        let second = level.set_parent(Some(2)).unwrap();

        assert_eq!(level.resolve(first, Ok(vec![section(10, 1)])), Resolution::Stale);
        assert!(level.is_loading());

        level.resolve(second, Ok(vec![section(20, 2)]));
        assert_eq!(level.options(), &[section(20, 2)]);

        // arriving after the current one is no better
        assert_eq!(level.resolve(first, Ok(vec![section(10, 1)])), Resolution::Stale);
        assert_eq!(level.options(), &[section(20, 2)]);
    }

    #[test]
    fn test_clearing_parent_discards_in_flight_fetch() {
        let mut level = OptionLevel::dependent(Level::FactorySection);
        let ticket = level.set_parent(Some(1)).unwrap();
        level.set_parent(None);
        assert_eq!(level.resolve(ticket, Ok(vec![section(10, 1)])), Resolution::Stale);
        assert_eq!(level.state(), &LoadState::Empty);
    }

    #[test]
    fn test_fetch_error_leaves_list_empty() {
        let mut level = OptionLevel::<FactorySection>::dependent(Level::FactorySection);
        let ticket = level.set_parent(Some(1)).unwrap();
        let res = level.resolve(ticket, Err(ApiError::Status(500)));
        assert!(matches!(res, Resolution::Failed(ConsoleError::Fetch { .. })));
        assert!(level.options().is_empty());
        assert!(matches!(level.state(), LoadState::Error(_)));
    }

    #[test]
    fn test_timeout_then_late_response() {
        let mut level = OptionLevel::dependent(Level::FactorySection);
        let ticket = level.set_parent(Some(1)).unwrap();
        let err = level.time_out(ticket, 15_000).expect("still pending");
        assert_eq!(err, ConsoleError::fetch("factory sections", ApiError::Timeout(15_000)));
        assert_eq!(level.resolve(ticket, Ok(vec![section(10, 1)])), Resolution::Stale);
        assert!(level.options().is_empty());
    }

    #[test]
    fn test_timeout_after_response_is_ignored() {
        let mut level = OptionLevel::dependent(Level::FactorySection);
        let ticket = level.set_parent(Some(1)).unwrap();
        level.resolve(ticket, Ok(vec![section(10, 1)]));
        assert_eq!(level.time_out(ticket, 15_000), None);
        assert!(level.contains(10));
    }

    #[test]
    fn test_reload_keeps_previous_options_visible() {
        let mut level = OptionLevel::dependent(Level::FactorySection);
        let ticket = level.set_parent(Some(1)).unwrap();
        level.resolve(ticket, Ok(vec![section(10, 1)]));
        let again = level.reload().unwrap();
        assert_ne!(again, ticket);
        assert!(level.contains(10));
        level.resolve(again, Ok(vec![section(10, 1), section(12, 1)]));
        assert!(level.contains(12));
    }

    #[test]
    fn test_same_parent_does_not_refetch() {
        let mut level = OptionLevel::<FactorySection>::dependent(Level::FactorySection);
        level.set_parent(Some(1)).unwrap();
        assert_eq!(level.set_parent(Some(1)), None);
    }

    #[test]
    fn test_root_level_loads_without_parent() {
        use contracts::domain::a001_factory::aggregate::Factory;
        let mut level = OptionLevel::<Factory>::root(Level::Factory);
        assert_eq!(level.set_parent(Some(3)), None);
        let ticket = level.reload().expect("root always loads");
        assert_eq!(ticket.parent, None);
    }
}
