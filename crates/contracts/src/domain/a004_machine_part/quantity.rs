//! Required quantity of a part on a machine.
//!
//! In Rust the value is `Option<i32>`: `None` means "not set". The inventory
//! API has no null on write and expects `-1` to clear the field, so the
//! sentinel exists only inside this module.

use serde::{Deserialize, Deserializer, Serializer};

/// Wire value that clears `req_qty` on the server.
pub const CLEARED_REQ_QTY: i32 = -1;

/// `None` -> `-1`, `Some(n)` -> `n`
pub fn encode(value: Option<i32>) -> i32 {
    value.unwrap_or(CLEARED_REQ_QTY)
}

/// `null` and any negative number read back as unset.
pub fn decode(raw: Option<i32>) -> Option<i32> {
    raw.filter(|v| *v >= 0)
}

pub fn serialize<S>(value: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i32(encode(*value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(decode(Option::<i32>::deserialize(deserializer)?))
}
