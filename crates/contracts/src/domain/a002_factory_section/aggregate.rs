use crate::domain::common::{Entity, EntityId};
use serde::{Deserialize, Serialize};

/// Участок завода
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorySection {
    pub id: EntityId,
    pub name: String,
    pub factory_id: EntityId,
}

impl Entity for FactorySection {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn list_name() -> &'static str {
        "factory sections"
    }
}

/// Body of `POST factorySection`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorySectionDto {
    pub name: String,
    pub factory_id: EntityId,
}
