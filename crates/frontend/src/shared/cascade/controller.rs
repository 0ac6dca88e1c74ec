//! Cascading selection: the selection plus one option list per level.
//!
//! All transitions are plain methods that return the fetches to start; the
//! UI layer runs them and hands the responses back through the `apply_*`
//! methods. Nothing here touches the network or the reactive runtime.

use super::option_loader::{FetchTicket, LoadState, OptionLevel, Resolution};
use super::selection::{Level, Selection};
use crate::shared::error::{ApiError, ConsoleError};
use contracts::domain::a001_factory::aggregate::{Factory, FactoryDto};
use contracts::domain::a002_factory_section::aggregate::FactorySection;
use contracts::domain::a003_machine::aggregate::Machine;
use contracts::domain::a004_machine_part::aggregate::MachinePart;
use contracts::domain::common::{Entity, EntityId};

#[derive(Clone, Debug)]
pub struct Cascade {
    selection: Selection,
    factories: OptionLevel<Factory>,
    sections: OptionLevel<FactorySection>,
    machines: OptionLevel<Machine>,
    machine_parts: OptionLevel<MachinePart>,
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new(Selection::default())
    }
}

impl Cascade {
    /// Option lists are keyed by the level whose ids they hold.
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            factories: OptionLevel::root(Level::Factory),
            sections: OptionLevel::dependent(Level::FactorySection),
            machines: OptionLevel::dependent(Level::Machine),
            machine_parts: OptionLevel::dependent(Level::Part),
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn factories(&self) -> &OptionLevel<Factory> {
        &self.factories
    }

    pub fn sections(&self) -> &OptionLevel<FactorySection> {
        &self.sections
    }

    pub fn machines(&self) -> &OptionLevel<Machine> {
        &self.machines
    }

    pub fn machine_parts(&self) -> &OptionLevel<MachinePart> {
        &self.machine_parts
    }

    /// First render: load the factories and every level the URL selected.
    pub fn start(&mut self) -> Vec<FetchTicket> {
        let mut tickets: Vec<FetchTicket> = self.factories.reload().into_iter().collect();
        tickets.extend(self.follow_selection());
        tickets
    }

    /// User picked a value at `level`; lower levels are cleared.
    pub fn select(&mut self, level: Level, id: Option<EntityId>) -> Vec<FetchTicket> {
        if !self.selection.set(level, id) {
            return Vec::new();
        }
        self.follow_selection()
    }

    /// The URL changed from outside; adopt it as is.
    pub fn replace_selection(&mut self, selection: Selection) -> Vec<FetchTicket> {
        self.selection = selection;
        self.follow_selection()
    }

    /// Re-fetch the list holding ids of `level`.
    pub fn reload(&mut self, level: Level) -> Option<FetchTicket> {
        match level {
            Level::Factory => self.factories.reload(),
            Level::FactorySection => self.sections.reload(),
            Level::Machine => self.machines.reload(),
            Level::Part => self.machine_parts.reload(),
        }
    }

    pub fn apply_factories(&mut self, ticket: FetchTicket, result: Result<Vec<Factory>, ApiError>) -> Resolution {
        let resolution = self.factories.resolve(ticket, result);
        self.after_resolve(&resolution, Level::Factory);
        resolution
    }

    pub fn apply_sections(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<FactorySection>, ApiError>,
    ) -> Resolution {
        let resolution = self.sections.resolve(ticket, result);
        self.after_resolve(&resolution, Level::FactorySection);
        resolution
    }

    pub fn apply_machines(&mut self, ticket: FetchTicket, result: Result<Vec<Machine>, ApiError>) -> Resolution {
        let resolution = self.machines.resolve(ticket, result);
        self.after_resolve(&resolution, Level::Machine);
        resolution
    }

    pub fn apply_machine_parts(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<MachinePart>, ApiError>,
    ) -> Resolution {
        let resolution = self.machine_parts.resolve(ticket, result);
        self.after_resolve(&resolution, Level::Part);
        resolution
    }

    /// The level of `ticket` still waits for exactly this request.
    pub fn is_pending(&self, ticket: FetchTicket) -> bool {
        match ticket.level {
            Level::Factory => self.factories.is_current(ticket),
            Level::FactorySection => self.sections.is_current(ticket),
            Level::Machine => self.machines.is_current(ticket),
            Level::Part => self.machine_parts.is_current(ticket),
        }
    }

    /// Timer of `ticket` fired.
    pub fn time_out(&mut self, ticket: FetchTicket, after_ms: u32) -> Option<ConsoleError> {
        match ticket.level {
            Level::Factory => self.factories.time_out(ticket, after_ms),
            Level::FactorySection => self.sections.time_out(ticket, after_ms),
            Level::Machine => self.machines.time_out(ticket, after_ms),
            Level::Part => self.machine_parts.time_out(ticket, after_ms),
        }
    }

    /// In-place update after a confirmed name/abbreviation edit.
    pub fn patch_factory(&mut self, id: EntityId, dto: &FactoryDto) -> bool {
        match self.factories.loaded_mut() {
            Some(items) => match items.iter_mut().find(|f| f.id == id) {
                Some(factory) => {
                    factory.apply_edit(dto);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// A fresh list for `level` drops a selected id it no longer contains,
    /// together with everything below it.
    fn after_resolve(&mut self, resolution: &Resolution, level: Level) {
        if *resolution != Resolution::Applied {
            return;
        }
        let Some(selected) = self.selection.get(level) else {
            return;
        };
        let still_there = match level {
            Level::Factory => self.factories.contains(selected),
            Level::FactorySection => self.sections.contains(selected),
            Level::Machine => self.machines.contains(selected),
            Level::Part => self.machine_parts.contains(selected),
        };
        if !still_there {
            log::debug!("{:?} {} is gone after reload, clearing selection", level, selected);
            self.selection.clear_from(level);
            // only empties lower levels, no fetch can start here
            let _ = self.follow_selection();
        }
    }

    fn follow_selection(&mut self) -> Vec<FetchTicket> {
        [
            self.sections.set_parent(self.selection.factory()),
            self.machines.set_parent(self.selection.factory_section()),
            self.machine_parts.set_parent(self.selection.machine()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Label of the selected option at `level`, if loaded.
pub fn selected_label<T: Entity + Clone>(level: &OptionLevel<T>, id: Option<EntityId>) -> Option<String> {
    let id = id?;
    level
        .options()
        .iter()
        .find(|item| item.id() == id)
        .map(|item| item.display_name())
}

/// Text shown in place of an option list that has nothing to offer yet.
/// `None` when the list has items or the parent is not chosen.
pub fn status_note<T: Entity + Clone>(level: &OptionLevel<T>) -> Option<String> {
    match level.state() {
        LoadState::Empty => None,
        LoadState::Loading { previous } if previous.is_empty() => {
            Some(format!("Loading {}...", T::list_name()))
        }
        LoadState::Loading { .. } => None,
        LoadState::Loaded(items) if items.is_empty() => Some(format!("No {} yet.", T::list_name())),
        LoadState::Loaded(_) => None,
        LoadState::Error(message) => Some(message.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory(id: EntityId) -> Factory {
        Factory {
            id,
            name: format!("F{}", id),
            abbreviation: format!("F{}", id),
        }
    }

    fn section(id: EntityId, factory_id: EntityId) -> FactorySection {
        FactorySection {
            id,
            name: format!("S{}", id),
            factory_id,
        }
    }

    fn machine(id: EntityId, section_id: EntityId) -> Machine {
        Machine {
            id,
            name: format!("M{}", id),
            factory_section_id: Some(section_id),
        }
    }

    fn only(tickets: Vec<FetchTicket>, level: Level) -> FetchTicket {
        assert_eq!(tickets.len(), 1, "expected a single fetch, got {:?}", tickets);
        assert_eq!(tickets[0].level, level);
        tickets[0]
    }

    #[test]
    fn test_switching_factory_resets_section_and_machine() {
        let mut c = Cascade::default();
        let start = c.start();
        let t = only(start, Level::Factory);
        c.apply_factories(t, Ok(vec![factory(1), factory(2)]));

        let t = only(c.select(Level::Factory, Some(1)), Level::FactorySection);
        c.apply_sections(t, Ok(vec![section(1, 1), section(2, 1)]));

        let t = only(c.select(Level::FactorySection, Some(1)), Level::Machine);
        c.apply_machines(t, Ok(vec![machine(1, 1)]));
        c.select(Level::Machine, Some(1));
        assert_eq!(c.selection().machine(), Some(1));

        let t = only(c.select(Level::Factory, Some(2)), Level::FactorySection);
        assert_eq!(c.selection().factory_section(), None);
        assert_eq!(c.selection().machine(), None);
        assert!(c.machines().options().is_empty());
        assert_eq!(c.machines().state(), &LoadState::Empty);
        assert_eq!(c.machine_parts().state(), &LoadState::Empty);

        c.apply_sections(t, Ok(vec![section(3, 2)]));
        assert_eq!(c.sections().options(), &[section(3, 2)]);
        assert!(c.machines().options().is_empty());
    }

    #[test]
    fn test_url_selection_loads_every_level_at_once() {
        let mut c = Cascade::new(Selection::from_parts(Some(1), Some(5), Some(9), None));
        let tickets = c.start();
        let levels: Vec<Level> = tickets.iter().map(|t| t.level).collect();
        assert_eq!(
            levels,
            vec![Level::Factory, Level::FactorySection, Level::Machine, Level::Part]
        );
    }

    #[test]
    fn test_dangling_url_section_is_cleared_after_load() {
        let mut c = Cascade::new(Selection::from_parts(Some(1), Some(5), Some(9), None));
        let tickets = c.start();
        let sections_ticket = tickets[1];
        let machines_ticket = tickets[2];

        c.apply_sections(sections_ticket, Ok(vec![section(6, 1)]));
        assert_eq!(c.selection(), Selection::from_parts(Some(1), None, None, None));
        assert_eq!(c.machines().state(), &LoadState::Empty);

        // machines for the dropped section arrive late and are ignored
        assert_eq!(c.apply_machines(machines_ticket, Ok(vec![machine(9, 5)])), Resolution::Stale);
        assert!(c.machines().options().is_empty());
    }

    #[test]
    fn test_valid_selection_survives_reload() {
        let mut c = Cascade::new(Selection::from_parts(Some(1), Some(5), None, None));
        let tickets = c.start();
        c.apply_sections(tickets[1], Ok(vec![section(5, 1)]));
        let again = c.reload(Level::FactorySection).unwrap();
        c.apply_sections(again, Ok(vec![section(4, 1), section(5, 1)]));
        assert_eq!(c.selection().factory_section(), Some(5));
    }

    #[test]
    fn test_stale_sections_for_previous_factory_never_show() {
        let mut c = Cascade::default();
        let first = only(c.select(Level::Factory, Some(1)), Level::FactorySection);
        let second = only(c.select(Level::Factory, Some(2)), Level::FactorySection);

        c.apply_sections(second, Ok(vec![section(3, 2)]));
        assert_eq!(c.apply_sections(first, Ok(vec![section(1, 1)])), Resolution::Stale);
        assert_eq!(c.sections().options(), &[section(3, 2)]);
    }

    #[test]
    fn test_fetch_failure_keeps_selection() {
        let mut c = Cascade::new(Selection::from_parts(Some(1), Some(5), None, None));
        let tickets = c.start();
        let res = c.apply_sections(tickets[1], Err(ApiError::Network("down".into())));
        assert!(matches!(res, Resolution::Failed(_)));
        assert_eq!(c.selection().factory_section(), Some(5));
        assert!(c.sections().options().is_empty());
    }

    #[test]
    fn test_patch_factory_in_place() {
        let mut c = Cascade::default();
        let t = only(c.start(), Level::Factory);
        c.apply_factories(t, Ok(vec![factory(1)]));
        let dto = FactoryDto {
            name: "North".into(),
            abbreviation: "N".into(),
        };
        assert!(c.patch_factory(1, &dto));
        assert_eq!(selected_label(c.factories(), Some(1)).as_deref(), Some("North"));
        assert!(!c.patch_factory(2, &dto));
    }

    #[test]
    fn test_replace_selection_from_url() {
        let mut c = Cascade::default();
        let tickets = c.replace_selection(Selection::from_parts(Some(4), None, None, None));
        assert_eq!(only(tickets, Level::FactorySection).parent, Some(4));
    }

    #[test]
    fn test_status_note_follows_load_state() {
        let mut c = Cascade::default();
        assert_eq!(status_note(c.sections()), None);

        let t = only(c.select(Level::Factory, Some(1)), Level::FactorySection);
        assert_eq!(status_note(c.sections()).as_deref(), Some("Loading factory sections..."));
        c.apply_sections(t, Ok(Vec::new()));
        assert_eq!(status_note(c.sections()).as_deref(), Some("No factory sections yet."));
    }
}
