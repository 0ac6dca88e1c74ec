use super::quantity;
use crate::domain::common::{Entity, EntityId};
use serde::{Deserialize, Serialize};

/// Запчасть (только ссылка, каталог запчастей живёт в другом разделе)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRef {
    pub id: EntityId,
    pub name: String,
}

/// Связь запчасти со станком: наличие и потребность.
///
/// At most one row exists per (machine, part) pair; writes go through
/// [`MachinePartUpsertDto`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachinePart {
    /// Id of the association row (used for edit/delete)
    pub id: EntityId,
    pub machine_id: EntityId,
    pub part_id: EntityId,
    pub qty: i32,
    #[serde(default, with = "quantity")]
    pub req_qty: Option<i32>,
    #[serde(rename = "parts")]
    pub part: PartRef,
}

impl Entity for MachinePart {
    /// Selection at the parts level is by part, not by association row.
    fn id(&self) -> EntityId {
        self.part.id
    }

    fn display_name(&self) -> String {
        self.part.name.clone()
    }

    fn list_name() -> &'static str {
        "machine parts"
    }
}

/// Body of `POST machinePart` (upsert by machine/part pair)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachinePartUpsertDto {
    pub part_id: EntityId,
    pub machine_id: EntityId,
    pub qty: i32,
}

/// Body of `PUT machinePart/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachinePartQuantitiesDto {
    pub qty: i32,
    #[serde(with = "quantity")]
    pub req_qty: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cleared_req_qty_is_written_as_sentinel() {
        let dto = MachinePartQuantitiesDto { qty: 4, req_qty: None };
        let body = serde_json::to_value(&dto).unwrap();
        assert_eq!(body, json!({ "qty": 4, "reqQty": -1 }));
    }

    #[test]
    fn test_zero_req_qty_is_not_cleared() {
        let dto = MachinePartQuantitiesDto { qty: 4, req_qty: Some(0) };
        let body = serde_json::to_value(&dto).unwrap();
        assert_eq!(body["reqQty"], json!(0));
    }

    #[test]
    fn test_req_qty_clear_read_clear_is_stable() {
        // server stores the sentinel or null, both read back as unset
        for stored in [json!(-1), json!(null)] {
            let row: MachinePart = serde_json::from_value(json!({
                "id": 7,
                "machine_id": 3,
                "part_id": 11,
                "qty": 2,
                "req_qty": stored,
                "parts": { "id": 11, "name": "Bearing" }
            }))
            .unwrap();
            assert_eq!(row.req_qty, None);

            let again = MachinePartQuantitiesDto { qty: row.qty, req_qty: row.req_qty };
            assert_eq!(serde_json::to_value(&again).unwrap()["reqQty"], json!(-1));
        }
    }

    #[test]
    fn test_missing_req_qty_reads_as_unset() {
        let row: MachinePart = serde_json::from_value(json!({
            "id": 1,
            "machine_id": 1,
            "part_id": 5,
            "qty": 0,
            "parts": { "id": 5, "name": "Belt" }
        }))
        .unwrap();
        assert_eq!(row.req_qty, None);
        assert_eq!(row.id(), 5);
    }
}
