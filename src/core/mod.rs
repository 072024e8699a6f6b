pub mod asset_organizer;
pub mod asset_status;
pub mod asset_validator;
pub mod browser;
pub mod file_check;
pub mod port_selector;
pub mod server;

pub use crate::utils::error::Result;
