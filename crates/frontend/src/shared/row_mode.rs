//! Режим строки таблицы: просмотр или редактирование с черновиком.

use contracts::domain::common::EntityId;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowMode<D> {
    Viewing,
    Editing(D),
}

/// Row modes of one table. Rows not listed are `Viewing`; at most one row is
/// in `Editing` at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowModes<D> {
    modes: HashMap<EntityId, RowMode<D>>,
}

impl<D> Default for RowModes<D> {
    fn default() -> Self {
        Self {
            modes: HashMap::new(),
        }
    }
}

impl<D: Clone> RowModes<D> {
    pub fn mode(&self, id: EntityId) -> RowMode<D> {
        self.modes.get(&id).cloned().unwrap_or(RowMode::Viewing)
    }

    /// Start editing `id`; any other row goes back to viewing.
    pub fn begin_edit(&mut self, id: EntityId, draft: D) {
        self.modes.clear();
        self.modes.insert(id, RowMode::Editing(draft));
    }

    /// Change the draft of a row being edited. No-op for viewing rows.
    pub fn update_draft(&mut self, id: EntityId, f: impl FnOnce(&mut D)) {
        if let Some(RowMode::Editing(draft)) = self.modes.get_mut(&id) {
            f(draft);
        }
    }

    pub fn finish(&mut self, id: EntityId) {
        self.modes.remove(&id);
    }

    pub fn draft(&self, id: EntityId) -> Option<D> {
        match self.modes.get(&id) {
            Some(RowMode::Editing(draft)) => Some(draft.clone()),
            _ => None,
        }
    }
}
