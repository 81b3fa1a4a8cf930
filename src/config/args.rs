use super::toml_config::ProvisionConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_report_extension, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "pos-provision")]
#[command(about = "Create POS workstations in the directory from a branch model file")]
pub struct CliConfig {
    /// Branch model file
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Optional TOML settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory admin executable, overrides the settings file
    #[arg(long, value_name = "PATH")]
    pub admin_command: Option<PathBuf>,

    /// Write a run report (.json or .csv)
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Provision even when two workstations share an IP address
    #[arg(long)]
    pub allow_duplicate_ips: bool,

    /// Print the admin commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the settings file, if any, and applies command-line overrides on top.
    pub fn resolve_settings(&self) -> Result<ProvisionConfig> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading settings from: {}", path.display());
                ProvisionConfig::from_file(path)?
            }
            None => ProvisionConfig::default(),
        };

        if let Some(admin) = &self.admin_command {
            settings.admin.executable = admin.clone();
            tracing::debug!("🔧 Admin command overridden to: {}", admin.display());
        }
        if self.allow_duplicate_ips {
            settings.validation.reject_duplicate_ips = false;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input.to_string_lossy())?;
        if let Some(report) = &self.report {
            validate_report_extension("report", &report.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::NamedTempFile;

    #[test]
    fn test_input_flag_is_required() {
        assert!(CliConfig::try_parse_from(["pos-provision"]).is_err());
        let config = CliConfig::try_parse_from(["pos-provision", "-i", "model"]).unwrap();
        assert_eq!(config.input, PathBuf::from("model"));
        assert!(!config.dry_run);
    }

    #[test]
    fn test_cli_overrides_settings_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "[admin]\nexecutable = \"/opt/posAdmin\"\n[validation]\nreject_duplicate_ips = true\n",
        )
        .unwrap();
        let config_path = file.path().to_str().unwrap();

        let cli = CliConfig::try_parse_from([
            "pos-provision",
            "-i",
            "model",
            "-c",
            config_path,
            "--admin-command",
            "/usr/local/bin/posAdmin",
            "--allow-duplicate-ips",
        ])
        .unwrap();
        let settings = cli.resolve_settings().unwrap();

        assert_eq!(settings.admin.executable, Path::new("/usr/local/bin/posAdmin"));
        assert!(!settings.validation.reject_duplicate_ips);
    }

    #[test]
    fn test_report_extension_is_validated() {
        let cli =
            CliConfig::try_parse_from(["pos-provision", "-i", "model", "--report", "out.xml"])
                .unwrap();
        assert!(cli.validate().is_err());
    }
}
