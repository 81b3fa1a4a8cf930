use crate::core::ConfigProvider;
use crate::utils::error::{ProvisionError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const DEFAULT_ADMIN_EXECUTABLE: &str = "/usr/sbin/posAdmin";

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    pub admin: AdminConfig,
    pub parser: ParserConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub executable: PathBuf,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_ADMIN_EXECUTABLE),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Commit the last workstation block even without a terminating blank line.
    pub flush_trailing_block: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            flush_trailing_block: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub reject_duplicate_ips: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            reject_duplicate_ips: true,
        }
    }
}

impl ProvisionConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProvisionError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ProvisionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${POS_ADMIN})；未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for ProvisionConfig {
    fn validate(&self) -> Result<()> {
        let executable = self.admin.executable.to_string_lossy();
        crate::utils::validation::validate_path("admin.executable", &executable)?;
        if executable.contains("${") {
            return Err(ProvisionError::InvalidConfigValueError {
                field: "admin.executable".to_string(),
                value: executable.into_owned(),
                reason: "Unresolved environment variable".to_string(),
            });
        }
        Ok(())
    }
}

impl ConfigProvider for ProvisionConfig {
    fn admin_executable(&self) -> &Path {
        &self.admin.executable
    }

    fn flush_trailing_block(&self) -> bool {
        self.parser.flush_trailing_block
    }

    fn reject_duplicate_ips(&self) -> bool {
        self.validation.reject_duplicate_ips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_sections_absent() {
        let config = ProvisionConfig::from_toml_str("").unwrap();
        assert_eq!(config.admin_executable(), Path::new(DEFAULT_ADMIN_EXECUTABLE));
        assert!(config.flush_trailing_block());
        assert!(config.reject_duplicate_ips());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_all_sections() {
        let config = ProvisionConfig::from_toml_str(
            r#"
[admin]
executable = "/opt/slepos/bin/posAdmin"

[parser]
flush_trailing_block = false

[validation]
reject_duplicate_ips = false
"#,
        )
        .unwrap();

        assert_eq!(config.admin_executable(), Path::new("/opt/slepos/bin/posAdmin"));
        assert!(!config.flush_trailing_block());
        assert!(!config.reject_duplicate_ips());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("POS_PROVISION_TEST_ADMIN", "/srv/posAdmin");
        let config = ProvisionConfig::from_toml_str(
            "[admin]\nexecutable = \"${POS_PROVISION_TEST_ADMIN}\"\n",
        )
        .unwrap();
        assert_eq!(config.admin_executable(), Path::new("/srv/posAdmin"));
    }

    #[test]
    fn test_unresolved_env_var_fails_validation() {
        let config = ProvisionConfig::from_toml_str(
            "[admin]\nexecutable = \"${POS_PROVISION_SURELY_UNSET_VAR}\"\n",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ProvisionConfig::from_toml_str("[admin\nexecutable = 1").unwrap_err();
        assert!(matches!(err, ProvisionError::ConfigValidationError { .. }));
    }
}
