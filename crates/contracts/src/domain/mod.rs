pub mod common;

pub mod a001_factory;
pub mod a002_factory_section;
pub mod a003_machine;
pub mod a004_machine_part;
pub mod a005_ordered_part;
