pub mod directory;
pub mod engine;
pub mod parser;
pub mod provisioner;
pub mod report;

pub use crate::domain::model::{BranchRecord, RecordModel, WorkstationRecord};
pub use crate::domain::ports::{AdminCommand, ConfigProvider, ModelSource};
pub use crate::utils::error::Result;
