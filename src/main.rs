use clap::Parser;
use pos_provision::core::ConfigProvider;
use pos_provision::utils::{logger, validation::Validate};
use pos_provision::{CliConfig, LocalModelFile, PosAdminCommand, ProvisionError, ProvisioningEngine};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting pos-provision");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Provisioning aborted: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(config: &CliConfig) -> Result<(), ProvisionError> {
    config.validate()?;
    let settings = config.resolve_settings()?;

    let source = LocalModelFile::new(&config.input);
    let admin = PosAdminCommand::new(settings.admin_executable());
    let engine = ProvisioningEngine::new(source, admin, settings).with_dry_run(config.dry_run);

    let report = engine.run().await?;
    println!("{}", report);

    if let Some(path) = &config.report {
        report.write_to(path)?;
    }

    tracing::info!(
        "✅ Done: {} succeeded, {} failed",
        report.summary.succeeded.len(),
        report.summary.failed_count
    );
    Ok(())
}
