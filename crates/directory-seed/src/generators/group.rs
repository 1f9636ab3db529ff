//! Security group generation: one group per city and department.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::dn::{account_slug, department_container_path};
use crate::generators::GenerateError;
use crate::output::CsvRecord;
use crate::taxonomy::Taxonomy;

/// Group category matching the directory's `GroupCategory` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupCategory {
    Security,
}

/// Group scope matching the directory's `GroupScope` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupScope {
    Global,
}

/// Generated group row ready for CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedGroup {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SamAccountName")]
    pub sam_account_name: String,
    #[serde(rename = "GroupCategory")]
    pub category: GroupCategory,
    #[serde(rename = "GroupScope")]
    pub scope: GroupScope,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "OU")]
    pub ou: String,
    #[serde(rename = "Email")]
    pub email: String,
}

impl CsvRecord for GeneratedGroup {
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "SamAccountName",
        "GroupCategory",
        "GroupScope",
        "Description",
        "OU",
        "Email",
    ];
}

/// Expands every city × department pair into a security group.
pub struct GroupGenerator {
    taxonomy: Taxonomy,
}

impl GroupGenerator {
    /// Creates a generator over the built-in enterprise taxonomy.
    pub fn new() -> Self {
        Self {
            taxonomy: Taxonomy::enterprise(),
        }
    }

    /// Creates a generator over a custom taxonomy.
    pub fn with_taxonomy(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Generates all groups, city-major, departments in catalog order.
    pub fn generate(&self) -> Result<Vec<GeneratedGroup>, GenerateError> {
        let taxonomy = &self.taxonomy;
        taxonomy.validate()?;

        let mut groups = Vec::with_capacity(taxonomy.cities.len() * taxonomy.departments.len());
        let mut seen = HashSet::new();

        for city in &taxonomy.cities {
            let ou = department_container_path(taxonomy, &city.name)?;
            for department in &taxonomy.departments {
                let group = self.build_group(&city.name, department, &ou);
                if !seen.insert(group.sam_account_name.clone()) {
                    return Err(GenerateError::DuplicateAccount(group.sam_account_name));
                }
                groups.push(group);
            }
        }

        debug!("Expanded {} groups", groups.len());
        Ok(groups)
    }

    fn build_group(&self, city: &str, department: &str, ou: &str) -> GeneratedGroup {
        let sam_account_name = account_slug(&[city, department]);
        let email = format!("{sam_account_name}@{}", self.taxonomy.mail_domain);

        GeneratedGroup {
            name: format!("{city}-{department}"),
            sam_account_name,
            category: GroupCategory::Security,
            scope: GroupScope::Global,
            description: format!("{department} team for {city}"),
            ou: ou.to_string(),
            email,
        }
    }
}

impl Default for GroupGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::City;

    #[test]
    fn test_generate_count() {
        let groups = GroupGenerator::new().generate().unwrap();
        assert_eq!(groups.len(), 156);
    }

    #[test]
    fn test_new_york_it_group() {
        let groups = GroupGenerator::new().generate().unwrap();
        let group = groups.iter().find(|g| g.name == "New York HQ-IT").unwrap();

        assert_eq!(group.sam_account_name, "new-york-hq-it");
        assert_eq!(group.email, "new-york-hq-it@itpositive.com");
        assert_eq!(group.description, "IT team for New York HQ");
        assert_eq!(
            group.ou,
            "OU=New York HQ,OU=USA,OU=Enterprise,DC=itpositive,DC=com"
        );
        assert_eq!(group.category, GroupCategory::Security);
        assert_eq!(group.scope, GroupScope::Global);
    }

    #[test]
    fn test_sam_account_names_unique_and_slugged() {
        let groups = GroupGenerator::new().generate().unwrap();
        let names: HashSet<_> = groups.iter().map(|g| g.sam_account_name.as_str()).collect();
        assert_eq!(names.len(), groups.len());

        for group in &groups {
            assert_eq!(group.sam_account_name, group.sam_account_name.to_lowercase());
            assert!(!group.sam_account_name.contains(' '));
        }
    }

    #[test]
    fn test_slug_collision_rejected() {
        // "Hong Kong" and "hong kong" are distinct cities but share a slug.
        let mut taxonomy = Taxonomy::enterprise();
        taxonomy.cities.push(City {
            country: "China".to_string(),
            name: "hong kong".to_string(),
            description: "Duplicate office".to_string(),
        });

        let err = GroupGenerator::with_taxonomy(taxonomy).generate().unwrap_err();
        assert!(
            matches!(err, GenerateError::DuplicateAccount(ref sam) if sam == "hong-kong-trading")
        );
    }

    #[test]
    fn test_invalid_taxonomy_rejected() {
        let mut taxonomy = Taxonomy::enterprise();
        taxonomy.cities[0].country = "Atlantis".to_string();

        let err = GroupGenerator::with_taxonomy(taxonomy).generate().unwrap_err();
        assert!(matches!(err, GenerateError::Taxonomy(_)));
    }

    #[test]
    fn test_serde_headers_match() {
        let groups = GroupGenerator::new().generate().unwrap();
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&groups[0]).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text.lines().next().unwrap(), GeneratedGroup::HEADERS.join(","));
    }
}
