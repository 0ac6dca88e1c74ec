use crate::shared::api_utils::{delete, get_json, send_json};
use crate::shared::error::ApiError;
use contracts::domain::a003_machine::aggregate::{natural_cmp, Machine, MachineDto};
use contracts::domain::common::EntityId;

/// Станки участка, отсортированные по имени ("Press 2" < "Press 10")
pub async fn fetch_machines(factory_section_id: EntityId) -> Result<Vec<Machine>, ApiError> {
    let mut machines: Vec<Machine> =
        get_json(&format!("machines?factorySection={}", factory_section_id)).await?;
    machines.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    Ok(machines)
}

pub async fn add_machine(dto: &MachineDto) -> Result<(), ApiError> {
    send_json("POST", "machine", dto).await
}

pub async fn delete_machine(id: EntityId) -> Result<bool, ApiError> {
    delete(&format!("machine/{}", id)).await
}
