use crate::shared::api_utils::get_json;
use crate::shared::error::ApiError;
use contracts::domain::a005_ordered_part::aggregate::OrderedPart;
use contracts::domain::common::EntityId;

/// История заказов по запчасти
pub async fn fetch_ordered_parts(part_id: EntityId) -> Result<Vec<OrderedPart>, ApiError> {
    get_json(&format!("orderedParts?part={}", part_id)).await
}
