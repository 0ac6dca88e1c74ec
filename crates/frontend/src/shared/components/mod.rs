pub mod filter_panel;
pub mod level_select;
pub mod page_header;
pub mod ui;

pub use filter_panel::{FilterPanel, FilterTag};
pub use level_select::LevelSelect;
pub use page_header::{CardHeader, StatusNote};
