//! Seam between the console state and the remote inventory API.
//!
//! Cards and the mutator are written against [`InventoryApi`]; the browser
//! build uses [`HttpInventoryApi`], tests use an in-memory fake.

use crate::domain::{a001_factory, a002_factory_section, a003_machine, a004_machine_part, a005_ordered_part};
use crate::shared::error::ApiError;
use contracts::domain::a001_factory::aggregate::{Factory, FactoryDto};
use contracts::domain::a002_factory_section::aggregate::{FactorySection, FactorySectionDto};
use contracts::domain::a003_machine::aggregate::{Machine, MachineDto};
use contracts::domain::a004_machine_part::aggregate::{
    MachinePart, MachinePartQuantitiesDto, MachinePartUpsertDto,
};
use contracts::domain::a005_ordered_part::aggregate::OrderedPart;
use contracts::domain::common::EntityId;

// Single-threaded wasm: the futures never need to be Send.
#[allow(async_fn_in_trait)]
pub trait InventoryApi {
    async fn fetch_factories(&self) -> Result<Vec<Factory>, ApiError>;
    async fn add_factory(&self, dto: &FactoryDto) -> Result<(), ApiError>;
    async fn edit_factory(&self, id: EntityId, dto: &FactoryDto) -> Result<(), ApiError>;

    async fn fetch_factory_sections(&self, factory_id: EntityId) -> Result<Vec<FactorySection>, ApiError>;
    async fn add_factory_section(&self, dto: &FactorySectionDto) -> Result<(), ApiError>;
    async fn delete_factory_section(&self, id: EntityId) -> Result<bool, ApiError>;

    async fn fetch_machines(&self, factory_section_id: EntityId) -> Result<Vec<Machine>, ApiError>;
    async fn add_machine(&self, dto: &MachineDto) -> Result<(), ApiError>;
    async fn delete_machine(&self, id: EntityId) -> Result<bool, ApiError>;

    async fn fetch_machine_parts(&self, machine_id: EntityId) -> Result<Vec<MachinePart>, ApiError>;
    async fn upsert_machine_part(&self, dto: &MachinePartUpsertDto) -> Result<(), ApiError>;
    async fn update_machine_part_quantities(
        &self,
        id: EntityId,
        dto: &MachinePartQuantitiesDto,
    ) -> Result<(), ApiError>;
    async fn delete_machine_part(&self, id: EntityId) -> Result<bool, ApiError>;

    async fn fetch_ordered_parts(&self, part_id: EntityId) -> Result<Vec<OrderedPart>, ApiError>;
}

/// REST client over `gloo-net`
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpInventoryApi;

impl InventoryApi for HttpInventoryApi {
    async fn fetch_factories(&self) -> Result<Vec<Factory>, ApiError> {
        a001_factory::api::fetch_factories().await
    }

    async fn add_factory(&self, dto: &FactoryDto) -> Result<(), ApiError> {
        a001_factory::api::add_factory(dto).await
    }

    async fn edit_factory(&self, id: EntityId, dto: &FactoryDto) -> Result<(), ApiError> {
        a001_factory::api::edit_factory(id, dto).await
    }

    async fn fetch_factory_sections(&self, factory_id: EntityId) -> Result<Vec<FactorySection>, ApiError> {
        a002_factory_section::api::fetch_factory_sections(factory_id).await
    }

    async fn add_factory_section(&self, dto: &FactorySectionDto) -> Result<(), ApiError> {
        a002_factory_section::api::add_factory_section(dto).await
    }

    async fn delete_factory_section(&self, id: EntityId) -> Result<bool, ApiError> {
        a002_factory_section::api::delete_factory_section(id).await
    }

    async fn fetch_machines(&self, factory_section_id: EntityId) -> Result<Vec<Machine>, ApiError> {
        a003_machine::api::fetch_machines(factory_section_id).await
    }

    async fn add_machine(&self, dto: &MachineDto) -> Result<(), ApiError> {
        a003_machine::api::add_machine(dto).await
    }

    async fn delete_machine(&self, id: EntityId) -> Result<bool, ApiError> {
        a003_machine::api::delete_machine(id).await
    }

    async fn fetch_machine_parts(&self, machine_id: EntityId) -> Result<Vec<MachinePart>, ApiError> {
        a004_machine_part::api::fetch_machine_parts(machine_id).await
    }

    async fn upsert_machine_part(&self, dto: &MachinePartUpsertDto) -> Result<(), ApiError> {
        a004_machine_part::api::upsert_machine_part(dto).await
    }

    async fn update_machine_part_quantities(
        &self,
        id: EntityId,
        dto: &MachinePartQuantitiesDto,
    ) -> Result<(), ApiError> {
        a004_machine_part::api::update_machine_part_quantities(id, dto).await
    }

    async fn delete_machine_part(&self, id: EntityId) -> Result<bool, ApiError> {
        a004_machine_part::api::delete_machine_part(id).await
    }

    async fn fetch_ordered_parts(&self, part_id: EntityId) -> Result<Vec<OrderedPart>, ApiError> {
        a005_ordered_part::api::fetch_ordered_parts(part_id).await
    }
}
