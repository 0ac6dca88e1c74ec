pub mod api_utils;
pub mod cascade;
pub mod components;
pub mod date_utils;
pub mod error;
pub mod icons;
pub mod inventory_api;
pub mod list_utils;
pub mod row_mode;
