use crate::domain::common::{Entity, EntityId};
use serde::{Deserialize, Serialize};

/// Станок, установленный на участке завода
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub factory_section_id: Option<EntityId>,
}

impl Entity for Machine {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn list_name() -> &'static str {
        "machines"
    }
}

/// Body of `POST machine`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineDto {
    pub name: String,
    pub factory_section_id: EntityId,
}

/// Machine names carry numbers ("Press 2", "Press 10"), so digit runs compare
/// by value and everything else case-insensitively.
pub fn natural_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let mut ln = String::new();
                while let Some(c) = left.peek().copied().filter(char::is_ascii_digit) {
                    ln.push(c);
                    left.next();
                }
                let mut rn = String::new();
                while let Some(c) = right.peek().copied().filter(char::is_ascii_digit) {
                    rn.push(c);
                    right.next();
                }
                let ln = ln.trim_start_matches('0');
                let rn = rn.trim_start_matches('0');
                let ord = ln.len().cmp(&rn.len()).then_with(|| ln.cmp(rn));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_natural_cmp_orders_numbers_by_value() {
        let mut names = vec!["Press 10", "press 2", "Lathe", "Press 1"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["Lathe", "Press 1", "press 2", "Press 10"]);
    }

    #[test]
    fn test_natural_cmp_leading_zeros() {
        assert_eq!(natural_cmp("M007", "M7"), Ordering::Equal);
        assert_eq!(natural_cmp("M", "M1"), Ordering::Less);
    }
}
