// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod pos_admin;

pub use crate::config::cli::LocalModelFile;
pub use pos_admin::PosAdminCommand;
