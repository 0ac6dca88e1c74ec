use contracts::domain::common::EntityId;

/// Уровень каскада выбора: завод → участок → станок → запчасть
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Factory,
    FactorySection,
    Machine,
    Part,
}

impl Level {
    /// URL query key mastering this level
    pub fn query_key(self) -> &'static str {
        match self {
            Level::Factory => "factory",
            Level::FactorySection => "factorySection",
            Level::Machine => "machine",
            Level::Part => "part",
        }
    }

    /// Level whose selection this one's options depend on
    pub fn parent(self) -> Option<Level> {
        match self {
            Level::Factory => None,
            Level::FactorySection => Some(Level::Factory),
            Level::Machine => Some(Level::FactorySection),
            Level::Part => Some(Level::Machine),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Factory => "factory",
            Level::FactorySection => "factory section",
            Level::Machine => "machine",
            Level::Part => "part",
        }
    }

    pub const ALL: [Level; 4] = [
        Level::Factory,
        Level::FactorySection,
        Level::Machine,
        Level::Part,
    ];
}

/// Currently selected ids. `None` means nothing chosen yet, never id 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    factory: Option<EntityId>,
    factory_section: Option<EntityId>,
    machine: Option<EntityId>,
    part: Option<EntityId>,
}

impl Selection {
    /// Build a selection as it arrives from the URL, without cascading clears.
    pub fn from_parts(
        factory: Option<EntityId>,
        factory_section: Option<EntityId>,
        machine: Option<EntityId>,
        part: Option<EntityId>,
    ) -> Self {
        Self {
            factory,
            factory_section,
            machine,
            part,
        }
    }

    pub fn factory(&self) -> Option<EntityId> {
        self.factory
    }

    pub fn factory_section(&self) -> Option<EntityId> {
        self.factory_section
    }

    pub fn machine(&self) -> Option<EntityId> {
        self.machine
    }

    pub fn part(&self) -> Option<EntityId> {
        self.part
    }

    pub fn get(&self, level: Level) -> Option<EntityId> {
        match level {
            Level::Factory => self.factory,
            Level::FactorySection => self.factory_section,
            Level::Machine => self.machine,
            Level::Part => self.part,
        }
    }

    /// Set one level. A changed value clears every level below it; setting
    /// the value already held changes nothing. Returns whether anything changed.
    pub fn set(&mut self, level: Level, id: Option<EntityId>) -> bool {
        if self.get(level) == id {
            return false;
        }
        match level {
            Level::Factory => self.factory = id,
            Level::FactorySection => self.factory_section = id,
            Level::Machine => self.machine = id,
            Level::Part => self.part = id,
        }
        self.clear_below(level);
        true
    }

    /// Clear `level` and everything that depends on it.
    pub fn clear_from(&mut self, level: Level) {
        if !self.set(level, None) {
            self.clear_below(level);
        }
    }

    fn clear_below(&mut self, level: Level) {
        for lower in Level::ALL.into_iter().filter(|l| *l > level) {
            match lower {
                Level::Factory => self.factory = None,
                Level::FactorySection => self.factory_section = None,
                Level::Machine => self.machine = None,
                Level::Part => self.part = None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_factory_clears_lower_levels() {
        let mut s = Selection::from_parts(Some(1), Some(2), Some(3), Some(4));
        assert!(s.set(Level::Factory, Some(9)));
        assert_eq!(s, Selection::from_parts(Some(9), None, None, None));
    }

    #[test]
    fn test_setting_machine_clears_only_part() {
        let mut s = Selection::from_parts(Some(1), Some(2), Some(3), Some(4));
        s.set(Level::Machine, Some(5));
        assert_eq!(s, Selection::from_parts(Some(1), Some(2), Some(5), None));
    }

    #[test]
    fn test_same_value_keeps_descendants() {
        let mut s = Selection::from_parts(Some(1), Some(2), Some(3), None);
        assert!(!s.set(Level::Factory, Some(1)));
        assert_eq!(s.machine(), Some(3));
    }

    #[test]
    fn test_zero_is_a_real_id() {
        let mut s = Selection::default();
        assert_eq!(s.factory(), None);
        s.set(Level::Factory, Some(0));
        assert_eq!(s.factory(), Some(0));
    }

    #[test]
    fn test_clear_from_section() {
        let mut s = Selection::from_parts(Some(1), Some(2), Some(3), Some(4));
        s.clear_from(Level::FactorySection);
        assert_eq!(s, Selection::from_parts(Some(1), None, None, None));
    }
}
