use crate::core::ModelSource;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Branch model read from the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalModelFile {
    path: PathBuf,
}

impl LocalModelFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ModelSource for LocalModelFile {
    async fn read_model(&self) -> Result<String> {
        tracing::debug!("Reading model file {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(text)
    }
}
