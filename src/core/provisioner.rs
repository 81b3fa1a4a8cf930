use crate::core::report::ResultAggregator;
use crate::domain::model::{ProvisioningOutcome, WorkstationRecord};
use crate::domain::ports::AdminCommand;

/// Argument vector for one `posAdmin --add --scWorkstation` call.
///
/// `--scRoleBased` follows `roleBased` alone. `--scRoleDn` is added only for a
/// role-based record that carries a `roleDN`; the parser never accepts one without.
pub fn build_arguments(base_dn: &str, workstation: &WorkstationRecord) -> Vec<String> {
    let mac_address = workstation.mac_address.to_uppercase();
    let fixed: [&str; 14] = [
        "--base",
        base_dn,
        "--add",
        "--scWorkstation",
        "--cn",
        &workstation.cn,
        "--ipHostNumber",
        &workstation.ip_address,
        "--macAddress",
        &mac_address,
        "--scRefPcDn",
        &workstation.cash_register_dn,
        "--scPosRegisterType",
        &workstation.cash_register_type,
    ];
    let mut args: Vec<String> = fixed.iter().map(|arg| arg.to_string()).collect();

    args.push("--scRoleBased".to_string());
    if workstation.is_role_based() {
        args.push("TRUE".to_string());
        if let Some(role_dn) = &workstation.role_dn {
            args.push("--scRoleDn".to_string());
            args.push(role_dn.clone());
        }
    } else {
        args.push("FALSE".to_string());
    }

    args
}

/// Runs the admin command once per workstation, one at a time, in list order.
pub struct ProvisioningRunner<'a, A: AdminCommand> {
    admin: &'a A,
    base_dn: &'a str,
}

impl<'a, A: AdminCommand> ProvisioningRunner<'a, A> {
    pub fn new(admin: &'a A, base_dn: &'a str) -> Self {
        Self { admin, base_dn }
    }

    pub async fn provision(&self, workstation: &WorkstationRecord) -> ProvisioningOutcome {
        let args = build_arguments(self.base_dn, workstation);
        tracing::debug!("{} {}", self.admin.describe(), args.join(" "));

        let success = match self.admin.execute(&args).await {
            Ok(success) => success,
            Err(e) => {
                tracing::warn!("could not run admin command for '{}': {}", workstation.cn, e);
                false
            }
        };

        if success {
            println!("✅ {} created", workstation.cn);
        } else {
            tracing::warn!("admin command failed for workstation '{}'", workstation.cn);
            println!("❌ {} failed", workstation.cn);
        }

        ProvisioningOutcome {
            cn: workstation.cn.clone(),
            success,
        }
    }

    pub async fn run(&self, workstations: &[WorkstationRecord], aggregator: &mut ResultAggregator) {
        for workstation in workstations {
            let outcome = self.provision(workstation).await;
            aggregator.record(&outcome);
        }
    }

    /// Prints what would be executed without running anything.
    pub fn dry_run(&self, workstations: &[WorkstationRecord]) {
        for workstation in workstations {
            let args = build_arguments(self.base_dn, workstation);
            println!("🔍 {} {}", self.admin.describe(), args.join(" "));
        }
    }
}
