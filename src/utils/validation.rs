use crate::domain::model::WorkstationRecord;
use crate::utils::error::{ProvisionError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

pub const BRANCH_FIELDS: [&str; 4] = ["c", "o", "ou", "store"];

pub const WORKSTATION_FIELDS: [&str; 7] = [
    "cn",
    "ipAddress",
    "macAddress",
    "cashRegisterType",
    "cashRegisterDN",
    "roleBased",
    "roleDN",
];

static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
        .expect("IPv4 pattern is valid")
});

// The regex crate has no backreferences, so each separator gets its own branch.
static MAC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:[0-9a-f]{2}(?::[0-9a-f]{2}){5}|[0-9a-f]{2}(?:-[0-9a-f]{2}){5}|[0-9a-f]{12})$",
    )
    .expect("MAC pattern is valid")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn is_branch_field(name: &str) -> bool {
    BRANCH_FIELDS.contains(&name)
}

pub fn is_workstation_field(name: &str) -> bool {
    WORKSTATION_FIELDS.contains(&name)
}

/// Four dotted decimal octets, each 0..=255. Nothing more, nothing less.
pub fn is_valid_ipv4(value: &str) -> bool {
    IPV4_RE.captures(value).is_some_and(|caps| {
        caps.iter()
            .skip(1)
            .flatten()
            .all(|octet| octet.as_str().parse::<u16>().is_ok_and(|n| n <= 255))
    })
}

/// Six two-digit hex groups with one uniform separator (`:` or `-`), or none at all.
pub fn is_valid_mac(value: &str) -> bool {
    MAC_RE.is_match(value)
}

pub fn has_duplicate_ip_addresses(records: &[WorkstationRecord]) -> bool {
    !duplicate_ip_addresses(records).is_empty()
}

/// Every `ipAddress` that appears more than once, in first-seen order.
pub fn duplicate_ip_addresses(records: &[WorkstationRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();

    for record in records {
        let ip = record.ip_address.as_str();
        if !seen.insert(ip) && !duplicates.iter().any(|d| d == ip) {
            duplicates.push(ip.to_string());
        }
    }

    duplicates
}

/// Checks a workstation field value. `Err` carries the reason it was rejected.
pub fn validate_workstation_value(field: &str, value: &str) -> std::result::Result<(), String> {
    if value.is_empty() {
        return Err(format!("{} is empty", field));
    }
    match field {
        "ipAddress" if !is_valid_ipv4(value) => Err(format!("invalid IPv4 address '{}'", value)),
        "macAddress" if !is_valid_mac(value) => Err(format!("invalid MAC address '{}'", value)),
        _ => Ok(()),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_report_extension(field_name: &str, path: &str) -> Result<()> {
    match std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some("json") | Some("csv") => Ok(()),
        Some(other) => Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!("Unsupported report extension: {}. Allowed: json, csv", other),
        }),
        None => Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Report file has no extension".to_string(),
        }),
    }
}
