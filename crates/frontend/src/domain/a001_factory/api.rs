use crate::shared::api_utils::{get_json, send_json};
use crate::shared::error::ApiError;
use contracts::domain::a001_factory::aggregate::{Factory, FactoryDto};
use contracts::domain::common::EntityId;

/// Все заводы
pub async fn fetch_factories() -> Result<Vec<Factory>, ApiError> {
    get_json("factories").await
}

pub async fn add_factory(dto: &FactoryDto) -> Result<(), ApiError> {
    send_json("POST", "factory", dto).await
}

pub async fn edit_factory(id: EntityId, dto: &FactoryDto) -> Result<(), ApiError> {
    send_json("PUT", &format!("factory/{}", id), dto).await
}
