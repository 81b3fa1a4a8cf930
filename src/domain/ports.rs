use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Where the branch model text comes from.
pub trait ModelSource: Send + Sync {
    fn read_model(&self) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// The external directory-administration command.
#[async_trait]
pub trait AdminCommand: Send + Sync {
    /// Runs the command with `args` and waits for it. Ok(true) means exit status 0.
    async fn execute(&self, args: &[String]) -> Result<bool>;

    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn admin_executable(&self) -> &Path;
    fn flush_trailing_block(&self) -> bool;
    fn reject_duplicate_ips(&self) -> bool;
}
