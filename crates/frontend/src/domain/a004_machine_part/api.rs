use crate::shared::api_utils::{delete, get_json, send_json};
use crate::shared::error::ApiError;
use contracts::domain::a004_machine_part::aggregate::{
    MachinePart, MachinePartQuantitiesDto, MachinePartUpsertDto,
};
use contracts::domain::common::EntityId;

pub async fn fetch_machine_parts(machine_id: EntityId) -> Result<Vec<MachinePart>, ApiError> {
    get_json(&format!("machineParts?machine={}", machine_id)).await
}

/// Insert or update the row for the (machine, part) pair
pub async fn upsert_machine_part(dto: &MachinePartUpsertDto) -> Result<(), ApiError> {
    send_json("POST", "machinePart", dto).await
}

pub async fn update_machine_part_quantities(
    id: EntityId,
    dto: &MachinePartQuantitiesDto,
) -> Result<(), ApiError> {
    send_json("PUT", &format!("machinePart/{}", id), dto).await
}

pub async fn delete_machine_part(id: EntityId) -> Result<bool, ApiError> {
    delete(&format!("machinePart/{}", id)).await
}
