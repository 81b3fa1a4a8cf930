use crate::domain::model::{DiscardedRecord, ProvisioningOutcome};
use crate::utils::error::{ProvisionError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Collects per-workstation outcomes in the order they arrive.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    outcomes: Vec<ProvisioningOutcome>,
    succeeded: Vec<String>,
    failed: Vec<String>,
    failed_count: usize,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_outcome(&mut self, cn: &str, success: bool) {
        self.outcomes.push(ProvisioningOutcome {
            cn: cn.to_string(),
            success,
        });
        if success {
            self.succeeded.push(cn.to_string());
        } else {
            self.failed_count += 1;
            self.failed.push(cn.to_string());
        }
    }

    pub fn record(&mut self, outcome: &ProvisioningOutcome) {
        self.record_outcome(&outcome.cn, outcome.success);
    }

    pub fn summary(&self) -> ProvisioningSummary {
        ProvisioningSummary {
            outcomes: self.outcomes.clone(),
            succeeded: self.succeeded.clone(),
            failed: self.failed.clone(),
            failed_count: self.failed_count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisioningSummary {
    /// Every outcome in provisioning order.
    pub outcomes: Vec<ProvisioningOutcome>,
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
    pub failed_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub store: String,
    pub base_dn: String,
    pub dry_run: bool,
    pub summary: ProvisioningSummary,
    pub discarded: Vec<DiscardedRecord>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    cn: &'a str,
    status: &'a str,
    detail: &'a str,
}

impl RunReport {
    /// Writes the report as JSON or CSV, chosen by the file extension.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let json = serde_json::to_string_pretty(self)?;
                std::fs::write(path, json)?;
            }
            Some("csv") => {
                let mut writer = csv::Writer::from_path(path)?;
                for outcome in &self.summary.outcomes {
                    let status = if outcome.success { "succeeded" } else { "failed" };
                    writer.serialize(CsvRow {
                        cn: &outcome.cn,
                        status,
                        detail: "",
                    })?;
                }
                for record in &self.discarded {
                    writer.serialize(CsvRow {
                        cn: record.cn.as_deref().unwrap_or(""),
                        status: "discarded",
                        detail: &record.reason,
                    })?;
                }
                writer.flush()?;
            }
            _ => {
                return Err(ProvisionError::InvalidConfigValueError {
                    field: "report".to_string(),
                    value: path.display().to_string(),
                    reason: "Report file must end in .json or .csv".to_string(),
                })
            }
        }

        tracing::info!("📁 Report written to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📋 Summary")?;
        writeln!(f, "  Store: {}", self.store)?;
        writeln!(f, "  Base DN: {}", self.base_dn)?;
        if self.dry_run {
            writeln!(f, "  Mode: dry run, nothing was executed")?;
        }
        writeln!(f, "  Succeeded: {}", self.summary.succeeded.join(", "))?;
        writeln!(f, "  Failed: {}", self.summary.failed.join(", "))?;
        writeln!(f, "  Failed count: {}", self.summary.failed_count)?;
        write!(f, "  Discarded records: {}", self.discarded.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn report(summary: ProvisioningSummary) -> RunReport {
        RunReport {
            store: "mystore".to_string(),
            base_dn: "cn=mystore,ou=myou,o=myorg,c=ar".to_string(),
            dry_run: false,
            summary,
            discarded: vec![DiscardedRecord {
                line: 12,
                cn: Some("REG099".to_string()),
                reason: "invalid IPv4 address '10.0.0'".to_string(),
            }],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_aggregator_keeps_order_per_class() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record_outcome("REG040", true);
        aggregator.record_outcome("REG041", false);
        aggregator.record_outcome("REG042", true);
        aggregator.record(&ProvisioningOutcome {
            cn: "REG043".to_string(),
            success: false,
        });

        let summary = aggregator.summary();
        assert_eq!(summary.succeeded, vec!["REG040", "REG042"]);
        assert_eq!(summary.failed, vec!["REG041", "REG043"]);
        assert_eq!(summary.failed_count, 2);

        let order: Vec<(&str, bool)> = summary
            .outcomes
            .iter()
            .map(|o| (o.cn.as_str(), o.success))
            .collect();
        assert_eq!(
            order,
            vec![("REG040", true), ("REG041", false), ("REG042", true), ("REG043", false)]
        );
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(ResultAggregator::new().summary(), ProvisioningSummary::default());
    }

    #[test]
    fn test_display_lists_names_and_count() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record_outcome("REG040", true);
        aggregator.record_outcome("REG041", false);
        let text = report(aggregator.summary()).to_string();

        assert!(text.contains("Store: mystore"));
        assert!(text.contains("Succeeded: REG040"));
        assert!(text.contains("Failed: REG041"));
        assert!(text.contains("Failed count: 1"));
        assert!(text.contains("Discarded records: 1"));
    }

    #[test]
    fn test_write_json_and_csv_reports() {
        let dir = TempDir::new().unwrap();
        let mut aggregator = ResultAggregator::new();
        aggregator.record_outcome("REG040", true);
        aggregator.record_outcome("REG041", false);
        aggregator.record_outcome("REG042", true);
        let run = report(aggregator.summary());

        let json_path = dir.path().join("nested/run.json");
        run.write_to(&json_path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["summary"]["failed_count"], 1);
        assert_eq!(json["summary"]["succeeded"][1], "REG042");
        assert_eq!(json["summary"]["outcomes"][1]["cn"], "REG041");

        let csv_path = dir.path().join("run.csv");
        run.write_to(&csv_path).unwrap();
        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        let cells: Vec<(&str, &str)> = rows.iter().map(|r| (&r[0], &r[1])).collect();
        assert_eq!(
            cells,
            vec![
                ("REG040", "succeeded"),
                ("REG041", "failed"),
                ("REG042", "succeeded"),
                ("REG099", "discarded"),
            ]
        );

        assert!(run.write_to(dir.path().join("run.txt")).is_err());
    }
}
