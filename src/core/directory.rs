use crate::domain::model::BranchRecord;
use crate::utils::error::{ProvisionError, Result};

/// Base DN the workstations are created under: `cn=<store>,ou=<ou>,o=<o>,c=<c>`.
pub fn build_base(branch: &BranchRecord) -> Result<String> {
    match branch {
        BranchRecord {
            c: Some(c),
            o: Some(o),
            ou: Some(ou),
            store: Some(store),
        } => Ok(format!("cn={},ou={},o={},c={}", store, ou, o, c)),
        _ => Err(ProvisionError::IncompleteBranch {
            missing: branch.missing_fields(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_base() {
        let branch = BranchRecord {
            c: Some("ar".to_string()),
            o: Some("myorg".to_string()),
            ou: Some("myou".to_string()),
            store: Some("mystore".to_string()),
        };
        assert_eq!(build_base(&branch).unwrap(), "cn=mystore,ou=myou,o=myorg,c=ar");
    }

    #[test]
    fn test_build_base_on_incomplete_branch() {
        let branch = BranchRecord {
            c: Some("ar".to_string()),
            ..Default::default()
        };
        match build_base(&branch) {
            Err(ProvisionError::IncompleteBranch { missing }) => {
                assert_eq!(missing, vec!["o", "ou", "store"])
            }
            other => panic!("expected IncompleteBranch, got {:?}", other),
        }
    }
}
