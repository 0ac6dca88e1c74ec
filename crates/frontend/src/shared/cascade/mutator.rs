//! Add / edit / delete against the inventory API.
//!
//! A mutation is validated first (nothing is sent when that fails), then
//! sent as a single call. On success the caller gets a [`MutationEffect`]
//! telling which list to refresh; on failure nothing local has changed.

use super::selection::Level;
use crate::shared::error::ConsoleError;
use crate::shared::inventory_api::InventoryApi;
use contracts::domain::a001_factory::aggregate::FactoryDto;
use contracts::domain::a002_factory_section::aggregate::FactorySectionDto;
use contracts::domain::a003_machine::aggregate::MachineDto;
use contracts::domain::a004_machine_part::aggregate::{MachinePartQuantitiesDto, MachinePartUpsertDto};
use contracts::domain::common::EntityId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    AddFactory(FactoryDto),
    EditFactory {
        id: EntityId,
        dto: FactoryDto,
    },
    AddFactorySection {
        factory_id: Option<EntityId>,
        name: String,
    },
    DeleteFactorySection {
        id: EntityId,
    },
    AddMachine {
        factory_section_id: Option<EntityId>,
        name: String,
    },
    DeleteMachine {
        id: EntityId,
    },
    UpsertMachinePart {
        machine_id: Option<EntityId>,
        part_id: Option<EntityId>,
        qty: i32,
    },
    UpdateMachinePartQuantities {
        id: EntityId,
        qty: i32,
        req_qty: Option<i32>,
    },
    DeleteMachinePart {
        id: EntityId,
    },
}

/// What the caller does with local state after a successful call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationEffect {
    /// Re-fetch the list holding ids of this level.
    Reload(Level),
    /// Name/abbreviation are fully known client-side, patch the cached row.
    PatchFactory { id: EntityId, dto: FactoryDto },
}

/// Validated request, ready to send
enum Call {
    AddFactory(FactoryDto),
    EditFactory(EntityId, FactoryDto),
    AddFactorySection(FactorySectionDto),
    DeleteFactorySection(EntityId),
    AddMachine(MachineDto),
    DeleteMachine(EntityId),
    UpsertMachinePart(MachinePartUpsertDto),
    UpdateMachinePartQuantities(EntityId, MachinePartQuantitiesDto),
    DeleteMachinePart(EntityId),
}

fn required_name(name: &str, what: &str) -> Result<String, ConsoleError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConsoleError::validation(format!("Enter a {} name.", what)));
    }
    Ok(name.to_string())
}

impl Mutation {
    /// Action label for messages ("Add machine")
    pub fn action(&self) -> &'static str {
        match self {
            Mutation::AddFactory(_) => "Add factory",
            Mutation::EditFactory { .. } => "Update factory",
            Mutation::AddFactorySection { .. } => "Add factory section",
            Mutation::DeleteFactorySection { .. } => "Delete factory section",
            Mutation::AddMachine { .. } => "Add machine",
            Mutation::DeleteMachine { .. } => "Delete machine",
            Mutation::UpsertMachinePart { .. } => "Add machine part",
            Mutation::UpdateMachinePartQuantities { .. } => "Update machine part",
            Mutation::DeleteMachinePart { .. } => "Delete machine part",
        }
    }

    /// Question for the confirmation dialog; only deletes ask.
    pub fn confirmation(&self) -> Option<&'static str> {
        match self {
            Mutation::DeleteFactorySection { .. } => {
                Some("Are you sure you want to delete this factory section?")
            }
            Mutation::DeleteMachine { .. } => Some("Are you sure you want to delete this machine?"),
            Mutation::DeleteMachinePart { .. } => {
                Some("Are you sure you want to delete this machine part?")
            }
            _ => None,
        }
    }

    pub fn success_message(&self) -> String {
        let past = match self {
            Mutation::AddFactory(_) => "Factory added",
            Mutation::EditFactory { .. } => "Factory updated",
            Mutation::AddFactorySection { .. } => "Factory section added",
            Mutation::DeleteFactorySection { .. } => "Factory section deleted",
            Mutation::AddMachine { .. } => "Machine added",
            Mutation::DeleteMachine { .. } => "Machine deleted",
            Mutation::UpsertMachinePart { .. } => "Machine part added/updated",
            Mutation::UpdateMachinePartQuantities { .. } => "Machine part updated",
            Mutation::DeleteMachinePart { .. } => "Machine part deleted",
        };
        format!("{} successfully", past)
    }

    fn validate(&self) -> Result<Call, ConsoleError> {
        Ok(match self {
            Mutation::AddFactory(dto) => Call::AddFactory(dto.validate().map_err(ConsoleError::validation)?),
            Mutation::EditFactory { id, dto } => {
                Call::EditFactory(*id, dto.validate().map_err(ConsoleError::validation)?)
            }
            Mutation::AddFactorySection { factory_id, name } => {
                let factory_id = factory_id
                    .ok_or_else(|| ConsoleError::validation("Please select a factory first."))?;
                Call::AddFactorySection(FactorySectionDto {
                    name: required_name(name, "factory section")?,
                    factory_id,
                })
            }
            Mutation::DeleteFactorySection { id } => Call::DeleteFactorySection(*id),
            Mutation::AddMachine {
                factory_section_id,
                name,
            } => {
                let factory_section_id = factory_section_id
                    .ok_or_else(|| ConsoleError::validation("Please select a factory section first."))?;
                Call::AddMachine(MachineDto {
                    name: required_name(name, "machine")?,
                    factory_section_id,
                })
            }
            Mutation::DeleteMachine { id } => Call::DeleteMachine(*id),
            Mutation::UpsertMachinePart {
                machine_id,
                part_id,
                qty,
            } => match (machine_id, part_id) {
                (Some(machine_id), Some(part_id)) if *qty >= 1 => {
                    Call::UpsertMachinePart(MachinePartUpsertDto {
                        part_id: *part_id,
                        machine_id: *machine_id,
                        qty: *qty,
                    })
                }
                _ => {
                    return Err(ConsoleError::validation(
                        "Select a machine and a part and enter a quantity of at least 1.",
                    ))
                }
            },
            Mutation::UpdateMachinePartQuantities { id, qty, req_qty } => {
                if *qty < 0 || req_qty.is_some_and(|r| r < 0) {
                    return Err(ConsoleError::validation("Quantities cannot be negative."));
                }
                Call::UpdateMachinePartQuantities(
                    *id,
                    MachinePartQuantitiesDto {
                        qty: *qty,
                        req_qty: *req_qty,
                    },
                )
            }
            Mutation::DeleteMachinePart { id } => Call::DeleteMachinePart(*id),
        })
    }

    fn effect(&self) -> MutationEffect {
        match self {
            Mutation::AddFactory(_) => MutationEffect::Reload(Level::Factory),
            Mutation::EditFactory { id, dto } => MutationEffect::PatchFactory {
                id: *id,
                dto: FactoryDto {
                    name: dto.name.trim().to_string(),
                    abbreviation: dto.abbreviation.trim().to_string(),
                },
            },
            Mutation::AddFactorySection { .. } | Mutation::DeleteFactorySection { .. } => {
                MutationEffect::Reload(Level::FactorySection)
            }
            Mutation::AddMachine { .. } | Mutation::DeleteMachine { .. } => {
                MutationEffect::Reload(Level::Machine)
            }
            Mutation::UpsertMachinePart { .. }
            | Mutation::UpdateMachinePartQuantities { .. }
            | Mutation::DeleteMachinePart { .. } => MutationEffect::Reload(Level::Part),
        }
    }
}

/// Validate and send one mutation.
pub async fn execute<A: InventoryApi>(api: &A, mutation: &Mutation) -> Result<MutationEffect, ConsoleError> {
    let call = mutation.validate()?;
    let action = mutation.action();
    let sent = match call {
        Call::AddFactory(dto) => api.add_factory(&dto).await.map(|_| true),
        Call::EditFactory(id, dto) => api.edit_factory(id, &dto).await.map(|_| true),
        Call::AddFactorySection(dto) => api.add_factory_section(&dto).await.map(|_| true),
        Call::DeleteFactorySection(id) => api.delete_factory_section(id).await,
        Call::AddMachine(dto) => api.add_machine(&dto).await.map(|_| true),
        Call::DeleteMachine(id) => api.delete_machine(id).await,
        Call::UpsertMachinePart(dto) => api.upsert_machine_part(&dto).await.map(|_| true),
        Call::UpdateMachinePartQuantities(id, dto) => {
            api.update_machine_part_quantities(id, &dto).await.map(|_| true)
        }
        Call::DeleteMachinePart(id) => api.delete_machine_part(id).await,
    };
    match sent {
        Ok(true) => {
            log::info!("{}: ok", action);
            Ok(mutation.effect())
        }
        Ok(false) => Err(ConsoleError::mutation(action, "the server did not delete the record")),
        Err(e) => {
            log::warn!("{}: {}", action, e);
            Err(ConsoleError::mutation(action, e))
        }
    }
}

/// Like [`execute`], but deletes first ask `confirm`. A declined
/// confirmation returns `None` without touching the API.
pub async fn execute_confirmed<A, C>(
    api: &A,
    mutation: &Mutation,
    confirm: C,
) -> Option<Result<MutationEffect, ConsoleError>>
where
    A: InventoryApi,
    C: FnOnce(&str) -> bool,
{
    if let Some(question) = mutation.confirmation() {
        if !confirm(question) {
            log::debug!("{}: cancelled by user", mutation.action());
            return None;
        }
    }
    Some(execute(api, mutation).await)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::error::ApiError;
    use contracts::domain::a001_factory::aggregate::Factory;
    use contracts::domain::a002_factory_section::aggregate::FactorySection;
    use contracts::domain::a003_machine::aggregate::Machine;
    use contracts::domain::a004_machine_part::aggregate::MachinePart;
    use contracts::domain::a005_ordered_part::aggregate::OrderedPart;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// Records every call; answers with `fail` / `delete_answer`.
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub calls: RefCell<Vec<String>>,
        pub fail: Option<ApiError>,
        pub delete_answer: bool,
    }

    impl FakeApi {
        pub fn ok() -> Self {
            Self {
                delete_answer: true,
                ..Default::default()
            }
        }

        fn record(&self, call: String) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            match &self.fail {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    impl InventoryApi for FakeApi {
        async fn fetch_factories(&self) -> Result<Vec<Factory>, ApiError> {
            self.record("GET factories".into()).map(|_| Vec::new())
        }
        async fn add_factory(&self, dto: &FactoryDto) -> Result<(), ApiError> {
            self.record(format!("POST factory {} {}", dto.name, dto.abbreviation))
        }
        async fn edit_factory(&self, id: EntityId, dto: &FactoryDto) -> Result<(), ApiError> {
            self.record(format!("PUT factory/{} {}", id, dto.name))
        }
        async fn fetch_factory_sections(&self, factory_id: EntityId) -> Result<Vec<FactorySection>, ApiError> {
            self.record(format!("GET factorySections {}", factory_id)).map(|_| Vec::new())
        }
        async fn add_factory_section(&self, dto: &FactorySectionDto) -> Result<(), ApiError> {
            self.record(format!("POST factorySection {} {}", dto.name, dto.factory_id))
        }
        async fn delete_factory_section(&self, id: EntityId) -> Result<bool, ApiError> {
            self.record(format!("DELETE factorySection/{}", id)).map(|_| self.delete_answer)
        }
        async fn fetch_machines(&self, factory_section_id: EntityId) -> Result<Vec<Machine>, ApiError> {
            self.record(format!("GET machines {}", factory_section_id)).map(|_| Vec::new())
        }
        async fn add_machine(&self, dto: &MachineDto) -> Result<(), ApiError> {
            self.record(format!("POST machine {} {}", dto.name, dto.factory_section_id))
        }
        async fn delete_machine(&self, id: EntityId) -> Result<bool, ApiError> {
            self.record(format!("DELETE machine/{}", id)).map(|_| self.delete_answer)
        }
        async fn fetch_machine_parts(&self, machine_id: EntityId) -> Result<Vec<MachinePart>, ApiError> {
            self.record(format!("GET machineParts {}", machine_id)).map(|_| Vec::new())
        }
        async fn upsert_machine_part(&self, dto: &MachinePartUpsertDto) -> Result<(), ApiError> {
            self.record(format!("POST machinePart {} {} {}", dto.part_id, dto.machine_id, dto.qty))
        }
        async fn update_machine_part_quantities(
            &self,
            id: EntityId,
            dto: &MachinePartQuantitiesDto,
        ) -> Result<(), ApiError> {
            let body = serde_json::to_string(dto).unwrap();
            self.record(format!("PUT machinePart/{} {}", id, body))
        }
        async fn delete_machine_part(&self, id: EntityId) -> Result<bool, ApiError> {
            self.record(format!("DELETE machinePart/{}", id)).map(|_| self.delete_answer)
        }
        async fn fetch_ordered_parts(&self, part_id: EntityId) -> Result<Vec<OrderedPart>, ApiError> {
            self.record(format!("GET orderedParts {}", part_id)).map(|_| Vec::new())
        }
    }

    #[test]
    fn test_declined_delete_makes_no_call() {
        let api = FakeApi::ok();
        let result = block_on(execute_confirmed(
            &api,
            &Mutation::DeleteMachine { id: 3 },
            |_| false,
        ));
        assert_eq!(result, None);
        assert!(api.calls.borrow().is_empty());
    }

    #[test]
    fn test_confirmed_delete_reloads_owning_level() {
        let api = FakeApi::ok();
        let result = block_on(execute_confirmed(
            &api,
            &Mutation::DeleteFactorySection { id: 8 },
            |q| q.contains("factory section"),
        ));
        assert_eq!(result, Some(Ok(MutationEffect::Reload(Level::FactorySection))));
        assert_eq!(*api.calls.borrow(), vec!["DELETE factorySection/8".to_string()]);
    }

    #[test]
    fn test_add_without_parent_is_not_sent() {
        let api = FakeApi::ok();
        let err = block_on(execute(
            &api,
            &Mutation::AddMachine {
                factory_section_id: None,
                name: "Lathe".into(),
            },
        ))
        .unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(_)));
        assert!(api.calls.borrow().is_empty());
    }

    #[test]
    fn test_blank_name_is_not_sent() {
        let api = FakeApi::ok();
        let err = block_on(execute(
            &api,
            &Mutation::AddFactorySection {
                factory_id: Some(1),
                name: "   ".into(),
            },
        ))
        .unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(_)));
        assert!(api.calls.borrow().is_empty());
    }

    #[test]
    fn test_names_are_trimmed() {
        let api = FakeApi::ok();
        block_on(execute(
            &api,
            &Mutation::AddFactory(FactoryDto {
                name: "  North plant ".into(),
                abbreviation: " NP".into(),
            }),
        ))
        .unwrap();
        assert_eq!(*api.calls.borrow(), vec!["POST factory North plant NP".to_string()]);
    }

    #[test]
    fn test_failed_call_is_a_mutation_failure() {
        let api = FakeApi {
            fail: Some(ApiError::Status(500)),
            ..FakeApi::ok()
        };
        let err = block_on(execute(
            &api,
            &Mutation::AddFactorySection {
                factory_id: Some(1),
                name: "Assembly".into(),
            },
        ))
        .unwrap_err();
        assert_eq!(
            err,
            ConsoleError::mutation("Add factory section", ApiError::Status(500))
        );
    }

    #[test]
    fn test_delete_answered_false_is_a_failure() {
        let api = FakeApi::default();
        let res = block_on(execute(&api, &Mutation::DeleteMachinePart { id: 2 }));
        assert!(matches!(res, Err(ConsoleError::Mutation { .. })));
    }

    #[test]
    fn test_factory_edit_patches_in_place() {
        let api = FakeApi::ok();
        let effect = block_on(execute(
            &api,
            &Mutation::EditFactory {
                id: 4,
                dto: FactoryDto {
                    name: "South ".into(),
                    abbreviation: "S".into(),
                },
            },
        ))
        .unwrap();
        assert_eq!(
            effect,
            MutationEffect::PatchFactory {
                id: 4,
                dto: FactoryDto {
                    name: "South".into(),
                    abbreviation: "S".into(),
                },
            }
        );
    }

    #[test]
    fn test_quantity_update_sends_sentinel_and_reloads() {
        let api = FakeApi::ok();
        let effect = block_on(execute(
            &api,
            &Mutation::UpdateMachinePartQuantities {
                id: 12,
                qty: 3,
                req_qty: None,
            },
        ))
        .unwrap();
        assert_eq!(effect, MutationEffect::Reload(Level::Part));
        assert_eq!(
            *api.calls.borrow(),
            vec![r#"PUT machinePart/12 {"qty":3,"reqQty":-1}"#.to_string()]
        );
    }

    #[test]
    fn test_upsert_needs_positive_qty() {
        let api = FakeApi::ok();
        let res = block_on(execute(
            &api,
            &Mutation::UpsertMachinePart {
                machine_id: Some(1),
                part_id: Some(2),
                qty: 0,
            },
        ));
        assert!(matches!(res, Err(ConsoleError::Validation(_))));
        assert!(api.calls.borrow().is_empty());
    }
}
