//! Text drafts behind the machine part forms and their conversion into
//! mutations.

use crate::shared::cascade::mutator::Mutation;
use crate::shared::error::ConsoleError;
use contracts::domain::a004_machine_part::aggregate::MachinePart;
use contracts::domain::common::EntityId;

/// Inline edit of one association row
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuantityDraft {
    pub qty: String,
    /// Empty means "no requirement"
    pub req_qty: String,
}

impl QuantityDraft {
    pub fn from_part(part: &MachinePart) -> Self {
        Self {
            qty: part.qty.to_string(),
            req_qty: part.req_qty.map(|r| r.to_string()).unwrap_or_default(),
        }
    }

    /// `id` is the association row id.
    pub fn to_mutation(&self, id: EntityId) -> Result<Mutation, ConsoleError> {
        let qty = parse_quantity(&self.qty, "Quantity")?
            .ok_or_else(|| ConsoleError::validation("Quantity is required."))?;
        let req_qty = parse_quantity(&self.req_qty, "Required quantity")?;
        Ok(Mutation::UpdateMachinePartQuantities { id, qty, req_qty })
    }
}

/// "Add part to machine" form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpsertDraft {
    pub part_id: String,
    pub qty: String,
}

impl UpsertDraft {
    pub fn to_mutation(&self, machine_id: Option<EntityId>) -> Result<Mutation, ConsoleError> {
        let part_id = match self.part_id.trim() {
            "" => None,
            raw => Some(
                raw.parse::<EntityId>()
                    .map_err(|_| ConsoleError::validation("Part id must be a number."))?,
            ),
        };
        let qty = parse_quantity(&self.qty, "Quantity")?.unwrap_or(0);
        Ok(Mutation::UpsertMachinePart {
            machine_id,
            part_id,
            qty,
        })
    }
}

/// Blank is `None`; anything else must be a whole number.
fn parse_quantity(raw: &str, field: &str) -> Result<Option<i32>, ConsoleError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| ConsoleError::validation(format!("{} must be a whole number.", field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_machine_part::aggregate::PartRef;

    fn part(req_qty: Option<i32>) -> MachinePart {
        MachinePart {
            id: 9,
            machine_id: 3,
            part_id: 40,
            qty: 2,
            req_qty,
            part: PartRef {
                id: 40,
                name: "Bearing 6204".into(),
            },
        }
    }

    #[test]
    fn test_blank_required_qty_clears_it() {
        let mut draft = QuantityDraft::from_part(&part(Some(5)));
        assert_eq!(draft.req_qty, "5");
        draft.req_qty = "  ".into();
        assert_eq!(
            draft.to_mutation(9).unwrap(),
            Mutation::UpdateMachinePartQuantities {
                id: 9,
                qty: 2,
                req_qty: None
            }
        );
    }

    #[test]
    fn test_zero_required_qty_is_kept() {
        let draft = QuantityDraft {
            qty: "1".into(),
            req_qty: "0".into(),
        };
        assert_eq!(
            draft.to_mutation(9).unwrap(),
            Mutation::UpdateMachinePartQuantities {
                id: 9,
                qty: 1,
                req_qty: Some(0)
            }
        );
    }

    #[test]
    fn test_non_numeric_quantities_are_rejected() {
        let draft = QuantityDraft {
            qty: "two".into(),
            req_qty: String::new(),
        };
        assert!(matches!(draft.to_mutation(9), Err(ConsoleError::Validation(_))));

        let draft = QuantityDraft::default();
        assert!(matches!(draft.to_mutation(9), Err(ConsoleError::Validation(_))));
    }

    #[test]
    fn test_upsert_draft() {
        let draft = UpsertDraft {
            part_id: " 40 ".into(),
            qty: "3".into(),
        };
        assert_eq!(
            draft.to_mutation(Some(3)).unwrap(),
            Mutation::UpsertMachinePart {
                machine_id: Some(3),
                part_id: Some(40),
                qty: 3
            }
        );

        // empty fields pass through; the mutator rejects them before any call
        let empty = UpsertDraft::default().to_mutation(None).unwrap();
        assert_eq!(
            empty,
            Mutation::UpsertMachinePart {
                machine_id: None,
                part_id: None,
                qty: 0
            }
        );
    }
}
