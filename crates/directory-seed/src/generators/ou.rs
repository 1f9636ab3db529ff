//! Organizational unit generation.

use serde::Serialize;
use tracing::debug;

use crate::dn::{compose_ou_path, country_path, department_container_path, enterprise_path};
use crate::output::CsvRecord;
use crate::taxonomy::{Taxonomy, TaxonomyError};

/// Level of an OU in the enterprise tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OuType {
    Enterprise,
    Country,
    City,
    Department,
}

impl OuType {
    /// Returns the CSV string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OuType::Enterprise => "Enterprise",
            OuType::Country => "Country",
            OuType::City => "City",
            OuType::Department => "Department",
        }
    }
}

/// Generated OU row ready for CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedOu {
    #[serde(rename = "Type")]
    pub ou_type: OuType,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ParentPath")]
    pub parent_path: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl GeneratedOu {
    /// Full path of this OU itself (its own name prepended to its parent).
    ///
    /// For a Department OU this is `OU=<Dept>,OU=<City>,...`, the placement to
    /// use when department groups should live inside the department OU rather
    /// than in its city container.
    pub fn distinguished_name(&self) -> String {
        // parent_path already ends in the base DN, so it acts as the base here.
        compose_ou_path(&[self.name.as_str()], &self.parent_path)
    }
}

impl CsvRecord for GeneratedOu {
    const HEADERS: &'static [&'static str] = &["Type", "Name", "ParentPath", "Description"];
}

/// Expands the taxonomy into the full OU tree.
pub struct OuGenerator {
    taxonomy: Taxonomy,
}

impl OuGenerator {
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

    /// Number of records [`generate`](Self::generate) will produce.
    pub fn expected_count(&self) -> usize {
        let cities = self.taxonomy.cities.len();
        1 + self.taxonomy.countries.len() + cities + cities * self.taxonomy.departments.len()
    }

    /// Generates the root, then every country, then every city, then every
    /// department of every city, in taxonomy order.
    pub fn generate(&self) -> Result<Vec<GeneratedOu>, TaxonomyError> {
        let taxonomy = &self.taxonomy;
        taxonomy.validate()?;

        let mut ous = Vec::with_capacity(self.expected_count());

        ous.push(GeneratedOu {
            ou_type: OuType::Enterprise,
            name: taxonomy.enterprise_root.clone(),
            parent_path: taxonomy.base_dn.clone(),
            description: "Enterprise Root Organization Unit".to_string(),
        });

        let root_path = enterprise_path(taxonomy);
        for country in &taxonomy.countries {
            ous.push(GeneratedOu {
                ou_type: OuType::Country,
                name: country.name.clone(),
                parent_path: root_path.clone(),
                description: country.description.clone(),
            });
        }

        for city in &taxonomy.cities {
            ous.push(GeneratedOu {
                ou_type: OuType::City,
                name: city.name.clone(),
                parent_path: country_path(taxonomy, &city.country),
                description: city.description.clone(),
            });
        }

        for city in &taxonomy.cities {
            let container = department_container_path(taxonomy, &city.name)?;
            for department in &taxonomy.departments {
                ous.push(GeneratedOu {
                    ou_type: OuType::Department,
                    name: department.clone(),
                    parent_path: container.clone(),
                    description: format!("{department} Department in {}", city.name),
                });
            }
        }

        debug!(
            "Expanded {} OUs ({} countries, {} cities, {} departments per city)",
            ous.len(),
            taxonomy.countries.len(),
            taxonomy.cities.len(),
            taxonomy.departments.len()
        );

        Ok(ous)
    }
}

impl Default for OuGenerator {
    fn default() -> Self {
        Self::new()
    }
}
