//! Wire contracts shared by the console and the inventory API.

pub mod domain;
pub mod shared;
