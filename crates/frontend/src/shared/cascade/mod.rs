//! Factory → section → machine → part selection and everything that keeps
//! it consistent: URL sync, dependent option lists, mutations.

pub mod controller;
pub mod mutator;
pub mod option_loader;
pub mod query_sync;
pub mod selection;

pub use controller::Cascade;
pub use selection::{Level, Selection};
