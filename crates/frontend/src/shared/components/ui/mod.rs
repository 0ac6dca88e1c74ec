pub mod select;

pub use select::EntitySelect;
