use crate::domain::common::{Entity, EntityId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Entity
// ============================================================================

/// Завод (верхний уровень иерархии)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factory {
    pub id: EntityId,
    pub name: String,
    pub abbreviation: String,
}

impl Factory {
    /// Apply a successful name/abbreviation edit to the cached copy.
    pub fn apply_edit(&mut self, dto: &FactoryDto) {
        self.name = dto.name.clone();
        self.abbreviation = dto.abbreviation.clone();
    }
}

impl Entity for Factory {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn list_name() -> &'static str {
        "factories"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Body of `POST factory` and `PUT factory/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FactoryDto {
    pub name: String,
    pub abbreviation: String,
}

impl FactoryDto {
    /// Both fields are required and stored trimmed.
    pub fn validate(&self) -> Result<Self, String> {
        let name = self.name.trim();
        let abbreviation = self.abbreviation.trim();
        if name.is_empty() {
            return Err("Factory name is required".into());
        }
        if abbreviation.is_empty() {
            return Err("Factory abbreviation is required".into());
        }
        Ok(Self {
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
        })
    }
}
