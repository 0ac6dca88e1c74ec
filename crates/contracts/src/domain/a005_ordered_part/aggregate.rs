use crate::domain::common::{Entity, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Заказ, к которому относится строка (только для фильтрации и отображения)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInfo {
    pub id: EntityId,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "crate::shared::serde_helpers::opt_string_or_number")]
    pub req_num: Option<String>,
    #[serde(default)]
    pub factory_id: Option<EntityId>,
    #[serde(default)]
    pub factory_section_id: Option<EntityId>,
    #[serde(default)]
    pub machine_id: Option<EntityId>,
}

/// Строка исторического заказа по запчасти (read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedPart {
    pub id: EntityId,
    pub order_id: EntityId,
    pub part_id: EntityId,
    #[serde(default)]
    pub qty: Option<i32>,
    /// Dates of the purchase workflow, as sent by the API (date or timestamp)
    #[serde(default)]
    pub purchased_date: Option<String>,
    #[serde(default)]
    pub sent_to_factory_date: Option<String>,
    #[serde(default)]
    pub received_by_factory_date: Option<String>,
    #[serde(rename = "orders")]
    pub order: OrderInfo,
}

impl Entity for OrderedPart {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        format!("Order #{}", self.order_id)
    }

    fn list_name() -> &'static str {
        "past orders"
    }
}
