use serde::Serialize;

/// Directory context (country/organization/unit/store) the workstations belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchRecord {
    pub c: Option<String>,
    pub o: Option<String>,
    pub ou: Option<String>,
    pub store: Option<String>,
}

impl BranchRecord {
    /// Stores `value` under a branch key. Returns false for keys outside the branch schema.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "c" => &mut self.c,
            "o" => &mut self.o,
            "ou" => &mut self.ou,
            "store" => &mut self.store,
            _ => return false,
        };
        *slot = Some(value.to_string());
        true
    }

    pub fn missing_fields(&self) -> Vec<String> {
        [
            ("c", &self.c),
            ("o", &self.o),
            ("ou", &self.ou),
            ("store", &self.store),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name.to_string())
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.c.is_some() && self.o.is_some() && self.ou.is_some() && self.store.is_some()
    }
}

/// A workstation that passed validation and will be provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkstationRecord {
    pub cn: String,
    pub ip_address: String,
    pub mac_address: String,
    pub cash_register_type: String,
    pub cash_register_dn: String,
    /// Raw `roleBased` value as written in the model file.
    pub role_based: Option<String>,
    pub role_dn: Option<String>,
}

impl WorkstationRecord {
    pub fn is_role_based(&self) -> bool {
        self.role_based
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}

/// Workstation fields collected so far for the block being parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkstationDraft {
    pub cn: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub cash_register_type: Option<String>,
    pub cash_register_dn: Option<String>,
    pub role_based: Option<String>,
    pub role_dn: Option<String>,
}

impl WorkstationDraft {
    /// Stores `value` under a workstation key. Returns false for keys outside the workstation schema.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "cn" => &mut self.cn,
            "ipAddress" => &mut self.ip_address,
            "macAddress" => &mut self.mac_address,
            "cashRegisterType" => &mut self.cash_register_type,
            "cashRegisterDN" => &mut self.cash_register_dn,
            "roleBased" => &mut self.role_based,
            "roleDN" => &mut self.role_dn,
            _ => return false,
        };
        *slot = Some(value.to_string());
        true
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn is_role_based(&self) -> bool {
        self.role_based
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    /// Turns the draft into a record, or returns the names of the required fields it lacks.
    pub fn finalize(self) -> std::result::Result<WorkstationRecord, Vec<&'static str>> {
        let mut missing = Vec::new();
        if self.cn.is_none() {
            missing.push("cn");
        }
        if self.ip_address.is_none() {
            missing.push("ipAddress");
        }
        if self.mac_address.is_none() {
            missing.push("macAddress");
        }
        if self.cash_register_type.is_none() {
            missing.push("cashRegisterType");
        }
        if self.cash_register_dn.is_none() {
            missing.push("cashRegisterDN");
        }
        if self.is_role_based() && self.role_dn.is_none() {
            missing.push("roleDN");
        }

        match self {
            Self {
                cn: Some(cn),
                ip_address: Some(ip_address),
                mac_address: Some(mac_address),
                cash_register_type: Some(cash_register_type),
                cash_register_dn: Some(cash_register_dn),
                role_based,
                role_dn,
            } if missing.is_empty() => Ok(WorkstationRecord {
                cn,
                ip_address,
                mac_address,
                cash_register_type,
                cash_register_dn,
                role_based,
                role_dn,
            }),
            _ => Err(missing),
        }
    }
}

/// A workstation block that was dropped while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscardedRecord {
    /// Line on which the block ended.
    pub line: usize,
    pub cn: Option<String>,
    pub reason: String,
}

/// Everything parsed from one model file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordModel {
    pub branch: BranchRecord,
    pub workstations: Vec<WorkstationRecord>,
    pub discarded: Vec<DiscardedRecord>,
}

impl RecordModel {
    pub fn validate(&self) -> bool {
        self.branch.is_complete()
    }

    pub fn ensure_complete(&self) -> crate::utils::error::Result<()> {
        if self.validate() {
            Ok(())
        } else {
            Err(crate::utils::error::ProvisionError::IncompleteBranch {
                missing: self.branch.missing_fields(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisioningOutcome {
    pub cn: String,
    pub success: bool,
}
