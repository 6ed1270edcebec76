//! TOML-backed configuration split into typed, named sections.

mod error;
mod manager;
mod section;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use section::{LoadReport, SectionData, SectionHandle};
