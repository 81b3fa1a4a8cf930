use crate::core::directory::build_base;
use crate::core::parser::ModelBuilder;
use crate::core::provisioner::ProvisioningRunner;
use crate::core::report::{ResultAggregator, RunReport};
use crate::domain::ports::{AdminCommand, ConfigProvider, ModelSource};
use crate::utils::error::{ProvisionError, Result};
use crate::utils::validation::duplicate_ip_addresses;

pub struct ProvisioningEngine<S: ModelSource, A: AdminCommand, C: ConfigProvider> {
    source: S,
    admin: A,
    config: C,
    dry_run: bool,
}

impl<S: ModelSource, A: AdminCommand, C: ConfigProvider> ProvisioningEngine<S, A, C> {
    pub fn new(source: S, admin: A, config: C) -> Self {
        Self {
            source,
            admin,
            config,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Reads, validates and provisions the whole branch.
    ///
    /// Fails before any command runs when the branch is incomplete or, if enabled,
    /// when two workstations share an IP address. Per-workstation command
    /// failures only show up in the returned report.
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Reading branch model");
        let text = self.source.read_model().await?;

        let mut builder = ModelBuilder::new();
        for line in text.lines() {
            builder.insert_line(line);
        }
        let model = builder.finish(self.config.flush_trailing_block());
        tracing::info!(
            "Parsed {} workstation(s), {} discarded",
            model.workstations.len(),
            model.discarded.len()
        );

        model.ensure_complete()?;

        if self.config.reject_duplicate_ips() {
            let addresses = duplicate_ip_addresses(&model.workstations);
            if !addresses.is_empty() {
                return Err(ProvisionError::DuplicateIpAddress { addresses });
            }
        }

        let base_dn = build_base(&model.branch)?;
        tracing::info!("Provisioning under {}", base_dn);

        let runner = ProvisioningRunner::new(&self.admin, &base_dn);
        let mut aggregator = ResultAggregator::new();
        if self.dry_run {
            runner.dry_run(&model.workstations);
        } else {
            runner.run(&model.workstations, &mut aggregator).await;
        }

        Ok(RunReport {
            store: model.branch.store.clone().unwrap_or_default(),
            base_dn,
            dry_run: self.dry_run,
            summary: aggregator.summary(),
            discarded: model.discarded,
            generated_at: chrono::Utc::now(),
        })
    }
}
