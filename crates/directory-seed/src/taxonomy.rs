//! The enterprise's geographic and organizational taxonomy.
//!
//! A [`Taxonomy`] holds everything the generators expand: the enterprise
//! root, its countries, the cities bound to each country, the department
//! catalog, and the branch offices users are assigned to. The built-in
//! tables are returned by [`Taxonomy::enterprise`]; a replacement can be
//! loaded from JSON with [`Taxonomy::from_json_path`].

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dn::is_plain_segment;

/// Base DN every generated path ends in.
pub const BASE_DN: &str = "DC=itpositive,DC=com";

/// Name of the enterprise root OU.
pub const ENTERPRISE_ROOT: &str = "Enterprise";

/// Mail domain for group and user addresses.
pub const MAIL_DOMAIN: &str = "itpositive.com";

const COUNTRIES: &[(&str, &str)] = &[
    ("Canada", "Canada Branch"),
    ("France", "France Branch"),
    ("USA", "USA Headquarters"),
    ("Germany", "Germany Branch"),
    ("UK", "United Kingdom Branch"),
    ("UAE", "United Arab Emirates Branch"),
    ("Qatar", "Qatar Branch"),
    ("China", "China Branch"),
    ("Spain", "Spain Branch"),
];

/// (country, city, description)
const CITIES: &[(&str, &str, &str)] = &[
    ("Canada", "Toronto", "Toronto Office"),
    ("Canada", "Vancouver", "Vancouver Office"),
    ("France", "Paris", "Paris Office"),
    ("France", "Lyon", "Lyon Office"),
    ("USA", "New York HQ", "New York Headquarters"),
    ("USA", "Chicago", "Chicago Office"),
    ("Germany", "Frankfurt", "Frankfurt Office"),
    ("Germany", "Berlin", "Berlin Office"),
    ("UK", "London Branch", "London Office"),
    ("UAE", "Dubai", "Dubai Office"),
    ("Qatar", "Doha", "Doha Office"),
    ("China", "Hong Kong", "Hong Kong Office"),
    ("Spain", "Madrid", "Madrid Office"),
];

const DEPARTMENTS: &[&str] = &[
    "Trading",
    "Compliance",
    "IT",
    "HR",
    "Operations",
    "Finance",
    "Legal",
    "Marketing",
    "Customer Service",
    "Treasury Management",
    "Business Banking",
    "Investment Banking",
];

/// Branch offices users are placed in, per country.
const BRANCHES: &[(&str, &[&str])] = &[
    ("USA", &["New York HQ"]),
    ("UK", &["London Branch"]),
    ("Germany", &["Frankfurt"]),
    ("France", &["Paris"]),
    ("Canada", &["Toronto"]),
    ("UAE", &["Dubai"]),
    ("Qatar", &["Doha"]),
    ("China", &["Hong Kong"]),
    ("Spain", &["Madrid"]),
];

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Unknown parent: {kind} '{name}' references unlisted {parent_kind} '{parent}'")]
    UnknownParent {
        kind: &'static str,
        name: String,
        parent_kind: &'static str,
        parent: String,
    },
    #[error("Unknown city: {0}")]
    UnknownCity(String),
    #[error("Duplicate {kind}: {name}")]
    Duplicate { kind: &'static str, name: String },
    #[error("Empty {0} name")]
    EmptyName(&'static str),
    #[error("{kind} name '{name}' contains ',' or '=' and cannot be placed in a path")]
    InvalidSegment { kind: &'static str, name: String },
    #[error("Taxonomy has no {0}")]
    EmptyCatalog(&'static str),
    #[error("Invalid taxonomy JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A country OU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub description: String,
}

/// A city OU, bound to exactly one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub country: String,
    pub name: String,
    pub description: String,
}

/// The branch cities of one country that users may be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchOffice {
    pub country: String,
    pub cities: Vec<String>,
}

/// Full taxonomy expanded by the generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub enterprise_root: String,
    pub base_dn: String,
    pub mail_domain: String,
    pub countries: Vec<Country>,
    pub cities: Vec<City>,
    pub departments: Vec<String>,
    pub branches: Vec<BranchOffice>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::enterprise()
    }
}

impl Taxonomy {
    /// The built-in enterprise taxonomy: 9 countries, 13 cities, 12 departments.
    pub fn enterprise() -> Self {
        Self {
            enterprise_root: ENTERPRISE_ROOT.to_string(),
            base_dn: BASE_DN.to_string(),
            mail_domain: MAIL_DOMAIN.to_string(),
            countries: COUNTRIES
                .iter()
                .map(|(name, description)| Country {
                    name: name.to_string(),
                    description: description.to_string(),
                })
                .collect(),
            cities: CITIES
                .iter()
                .map(|(country, name, description)| City {
                    country: country.to_string(),
                    name: name.to_string(),
                    description: description.to_string(),
                })
                .collect(),
            departments: DEPARTMENTS.iter().map(|d| d.to_string()).collect(),
            branches: BRANCHES
                .iter()
                .map(|(country, cities)| BranchOffice {
                    country: country.to_string(),
                    cities: cities.iter().map(|c| c.to_string()).collect(),
                })
                .collect(),
        }
    }

    /// Parses a taxonomy from JSON and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, TaxonomyError> {
        let taxonomy: Taxonomy = serde_json::from_str(json)?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Reads a taxonomy from a JSON file and validates it.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Returns the country a city is bound to.
    pub fn country_of(&self, city: &str) -> Result<&str, TaxonomyError> {
        self.cities
            .iter()
            .find(|c| c.name == city)
            .map(|c| c.country.as_str())
            .ok_or_else(|| TaxonomyError::UnknownCity(city.to_string()))
    }

    /// Checks that every name is usable as a path segment, that names are
    /// unique per level, and that every city and branch references a listed
    /// parent.
    pub fn validate(&self) -> Result<(), TaxonomyError> {
        check_segment("enterprise root", &self.enterprise_root)?;
        if self.base_dn.trim().is_empty() {
            return Err(TaxonomyError::EmptyName("base DN"));
        }
        if self.mail_domain.trim().is_empty() {
            return Err(TaxonomyError::EmptyName("mail domain"));
        }

        if self.countries.is_empty() {
            return Err(TaxonomyError::EmptyCatalog("countries"));
        }
        if self.departments.is_empty() {
            return Err(TaxonomyError::EmptyCatalog("departments"));
        }

        let mut countries = HashSet::new();
        for country in &self.countries {
            check_segment("country", &country.name)?;
            if !countries.insert(country.name.as_str()) {
                return Err(TaxonomyError::Duplicate {
                    kind: "country",
                    name: country.name.clone(),
                });
            }
        }

        let mut cities = HashSet::new();
        for city in &self.cities {
            check_segment("city", &city.name)?;
            if !countries.contains(city.country.as_str()) {
                return Err(TaxonomyError::UnknownParent {
                    kind: "city",
                    name: city.name.clone(),
                    parent_kind: "country",
                    parent: city.country.clone(),
                });
            }
            if !cities.insert(city.name.as_str()) {
                return Err(TaxonomyError::Duplicate {
                    kind: "city",
                    name: city.name.clone(),
                });
            }
        }

        let mut departments = HashSet::new();
        for department in &self.departments {
            check_segment("department", department)?;
            if !departments.insert(department.as_str()) {
                return Err(TaxonomyError::Duplicate {
                    kind: "department",
                    name: department.clone(),
                });
            }
        }

        for branch in &self.branches {
            if !countries.contains(branch.country.as_str()) {
                return Err(TaxonomyError::UnknownParent {
                    kind: "branch office",
                    name: branch.cities.join(", "),
                    parent_kind: "country",
                    parent: branch.country.clone(),
                });
            }
            if branch.cities.is_empty() {
                return Err(TaxonomyError::EmptyCatalog("branch cities"));
            }
            for city in &branch.cities {
                check_segment("branch", city)?;
                let bound_to = self.country_of(city)?;
                if bound_to != branch.country {
                    return Err(TaxonomyError::UnknownParent {
                        kind: "branch",
                        name: city.clone(),
                        parent_kind: "country",
                        parent: branch.country.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn check_segment(kind: &'static str, name: &str) -> Result<(), TaxonomyError> {
    if name.trim().is_empty() {
        return Err(TaxonomyError::EmptyName(kind));
    }
    if !is_plain_segment(name) {
        return Err(TaxonomyError::InvalidSegment {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enterprise_taxonomy_is_valid() {
        let taxonomy = Taxonomy::enterprise();
        taxonomy.validate().unwrap();

        assert_eq!(taxonomy.countries.len(), 9);
        assert_eq!(taxonomy.cities.len(), 13);
        assert_eq!(taxonomy.departments.len(), 12);
        assert_eq!(taxonomy.branches.len(), 9);
    }

    #[test]
    fn test_country_of() {
        let taxonomy = Taxonomy::enterprise();
        assert_eq!(taxonomy.country_of("Hong Kong").unwrap(), "China");
        assert_eq!(taxonomy.country_of("London Branch").unwrap(), "UK");
        assert!(taxonomy.country_of("Oslo").is_err());
    }

    #[test]
    fn test_city_with_unknown_country() {
        let mut taxonomy = Taxonomy::enterprise();
        taxonomy.cities.push(City {
            country: "Norway".to_string(),
            name: "Oslo".to_string(),
            description: "Oslo Office".to_string(),
        });

        let err = taxonomy.validate().unwrap_err();
        assert!(
            matches!(err, TaxonomyError::UnknownParent { ref parent, .. } if parent == "Norway"),
            "unexpected error: {err}"
        );
        assert!(err.to_string().contains("Unknown parent"));
    }

    #[test]
    fn test_branch_bound_to_wrong_country() {
        let mut taxonomy = Taxonomy::enterprise();
        taxonomy.branches[0].cities.push("Paris".to_string());

        let err = taxonomy.validate().unwrap_err();
        assert!(matches!(err, TaxonomyError::UnknownParent { ref name, .. } if name == "Paris"));
    }

    #[test]
    fn test_duplicate_department() {
        let mut taxonomy = Taxonomy::enterprise();
        taxonomy.departments.push("IT".to_string());

        let err = taxonomy.validate().unwrap_err();
        assert!(matches!(err, TaxonomyError::Duplicate { kind: "department", .. }));
    }

    #[test]
    fn test_segment_with_comma_rejected() {
        let mut taxonomy = Taxonomy::enterprise();
        taxonomy.departments.push("Research, Labs".to_string());

        let err = taxonomy.validate().unwrap_err();
        assert!(matches!(err, TaxonomyError::InvalidSegment { kind: "department", .. }));
    }

    #[test]
    fn test_blank_base_dn_rejected() {
        let mut taxonomy = Taxonomy::enterprise();
        taxonomy.base_dn = "  ".to_string();

        assert!(matches!(
            taxonomy.validate(),
            Err(TaxonomyError::EmptyName("base DN"))
        ));
    }

    #[test]
    fn test_empty_mail_domain_rejected() {
        let mut taxonomy = Taxonomy::enterprise();
        taxonomy.mail_domain = String::new();

        assert!(matches!(
            taxonomy.validate(),
            Err(TaxonomyError::EmptyName("mail domain"))
        ));
    }

    #[test]
    fn test_empty_departments_rejected() {
        let mut taxonomy = Taxonomy::enterprise();
        taxonomy.departments.clear();

        assert!(matches!(
            taxonomy.validate(),
            Err(TaxonomyError::EmptyCatalog("departments"))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let taxonomy = Taxonomy::enterprise();
        let json = serde_json::to_string_pretty(&taxonomy).unwrap();
        let parsed = Taxonomy::from_json_str(&json).unwrap();
        assert_eq!(parsed, taxonomy);
    }

    #[test]
    fn test_json_invalid_taxonomy_rejected() {
        let json = r#"{
            "enterprise_root": "Enterprise",
            "base_dn": "DC=example,DC=org",
            "mail_domain": "example.org",
            "countries": [{"name": "Canada", "description": "Canada Branch"}],
            "cities": [{"country": "Mexico", "name": "Monterrey", "description": "Monterrey Office"}],
            "departments": ["IT"],
            "branches": []
        }"#;

        let err = Taxonomy::from_json_str(json).unwrap_err();
        assert!(matches!(err, TaxonomyError::UnknownParent { .. }));
    }
}
