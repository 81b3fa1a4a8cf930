pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalModelFile, PosAdminCommand};
pub use config::ProvisionConfig;
pub use self::core::{engine::ProvisioningEngine, parser::ModelBuilder, report::RunReport};
pub use utils::error::{ProvisionError, Result};
