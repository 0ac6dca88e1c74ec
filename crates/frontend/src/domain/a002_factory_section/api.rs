use crate::shared::api_utils::{delete, get_json, send_json};
use crate::shared::error::ApiError;
use contracts::domain::a002_factory_section::aggregate::{FactorySection, FactorySectionDto};
use contracts::domain::common::EntityId;

/// Участки выбранного завода
pub async fn fetch_factory_sections(factory_id: EntityId) -> Result<Vec<FactorySection>, ApiError> {
    get_json(&format!("factorySections?factory={}", factory_id)).await
}

pub async fn add_factory_section(dto: &FactorySectionDto) -> Result<(), ApiError> {
    send_json("POST", "factorySection", dto).await
}

pub async fn delete_factory_section(id: EntityId) -> Result<bool, ApiError> {
    delete(&format!("factorySection/{}", id)).await
}
