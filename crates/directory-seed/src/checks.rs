//! Cross-table consistency checks run before anything is written.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::generators::{EMPLOYEE_ID_BASE, GeneratedGroup, GeneratedOu, GeneratedUser, OuType};

#[derive(Debug, Error)]
pub enum ConsistencyError {
    #[error("Duplicate {ou_type} OU '{name}' under {parent_path}")]
    DuplicateOu {
        ou_type: &'static str,
        name: String,
        parent_path: String,
    },
    #[error("Group OU {path} appears {groups} times but holds {departments} department OUs")]
    GroupPlacement {
        path: String,
        groups: usize,
        departments: usize,
    },
    #[error("Employee ID {found} at position {index}, expected {expected}")]
    EmployeeId {
        index: usize,
        expected: u64,
        found: u32,
    },
}

/// Fails if two OUs share type, name and parent path.
pub fn check_unique_ous(ous: &[GeneratedOu]) -> Result<(), ConsistencyError> {
    let mut seen = HashSet::new();
    for ou in ous {
        if !seen.insert((ou.ou_type, ou.name.as_str(), ou.parent_path.as_str())) {
            return Err(ConsistencyError::DuplicateOu {
                ou_type: ou.ou_type.as_str(),
                name: ou.name.clone(),
                parent_path: ou.parent_path.clone(),
            });
        }
    }
    Ok(())
}

/// Fails unless the multiset of group `OU` values equals the multiset of
/// department OU parent paths.
pub fn check_group_placement(
    ous: &[GeneratedOu],
    groups: &[GeneratedGroup],
) -> Result<(), ConsistencyError> {
    let mut departments: HashMap<&str, usize> = HashMap::new();
    for ou in ous.iter().filter(|o| o.ou_type == OuType::Department) {
        *departments.entry(ou.parent_path.as_str()).or_insert(0) += 1;
    }

    let mut placed: HashMap<&str, usize> = HashMap::new();
    for group in groups {
        *placed.entry(group.ou.as_str()).or_insert(0) += 1;
    }

    let paths: HashSet<&str> = departments.keys().chain(placed.keys()).copied().collect();
    for path in paths {
        let expected = departments.get(path).copied().unwrap_or(0);
        let found = placed.get(path).copied().unwrap_or(0);
        if expected != found {
            return Err(ConsistencyError::GroupPlacement {
                path: path.to_string(),
                groups: found,
                departments: expected,
            });
        }
    }
    Ok(())
}

/// Fails unless employee IDs run 10000, 10001, ... in batch order.
pub fn check_employee_ids(users: &[GeneratedUser]) -> Result<(), ConsistencyError> {
    for (index, user) in users.iter().enumerate() {
        let expected = u64::from(EMPLOYEE_ID_BASE) + index as u64;
        if u64::from(user.employee_id) != expected {
            return Err(ConsistencyError::EmployeeId {
                index,
                expected,
                found: user.employee_id,
            });
        }
    }
    Ok(())
}
