//! Distinguished-name path construction.
//!
//! Every OU path in the generated data is built here. Paths are written most
//! specific segment first and always end in the base DN:
//!
//! ```text
//! OU=IT,OU=Toronto,OU=Canada,OU=Enterprise,DC=itpositive,DC=com
//! ```
//!
//! Segments are not escaped. Names containing `,` or `=` are rejected when a
//! [`Taxonomy`] is validated, so they never reach these functions from the
//! generators.

use crate::taxonomy::{Taxonomy, TaxonomyError};

/// Composes `OU=<s1>,OU=<s2>,...,<base_dn>` from segments ordered most
/// specific first. With no segments the result is `base_dn` itself.
pub fn compose_ou_path<S: AsRef<str>>(segments: &[S], base_dn: &str) -> String {
    let mut path = String::new();
    for segment in segments {
        path.push_str("OU=");
        path.push_str(segment.as_ref());
        path.push(',');
    }
    path.push_str(base_dn);
    path
}

/// Path of the enterprise root OU.
pub fn enterprise_path(taxonomy: &Taxonomy) -> String {
    compose_ou_path(&[taxonomy.enterprise_root.as_str()], &taxonomy.base_dn)
}

/// Path of a country OU. Country OUs live directly under the enterprise root.
pub fn country_path(taxonomy: &Taxonomy, country: &str) -> String {
    compose_ou_path(&[country, taxonomy.enterprise_root.as_str()], &taxonomy.base_dn)
}

/// Path of a city OU, resolving the city's country from the taxonomy.
pub fn city_path(taxonomy: &Taxonomy, city: &str) -> Result<String, TaxonomyError> {
    let country = taxonomy.country_of(city)?;
    Ok(compose_ou_path(
        &[city, country, taxonomy.enterprise_root.as_str()],
        &taxonomy.base_dn,
    ))
}

/// Container path shared by a city's department OUs and its department
/// groups.
///
/// Department OU records use this as their `ParentPath` and group records use
/// it as their `OU`, so the two tables agree by construction.
pub fn department_container_path(taxonomy: &Taxonomy, city: &str) -> Result<String, TaxonomyError> {
    city_path(taxonomy, city)
}

/// Two-level path used for user accounts: `OU=<department>,OU=<branch>,<base_dn>`.
pub fn user_ou_path(department: &str, branch: &str, base_dn: &str) -> String {
    compose_ou_path(&[department, branch], base_dn)
}

/// Builds an account-style identifier: each part lowercased with spaces
/// replaced by hyphens, parts joined with `-`.
pub fn account_slug<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|part| part.as_ref().to_lowercase().replace(' ', "-"))
        .collect::<Vec<_>>()
        .join("-")
}

/// Returns true if the segment can be placed in a path without escaping.
pub fn is_plain_segment(segment: &str) -> bool {
    !segment.contains([',', '='])
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "DC=itpositive,DC=com";

    #[test]
    fn test_compose_root_only() {
        let none: [&str; 0] = [];
        assert_eq!(compose_ou_path(&none, BASE), BASE);
    }

    #[test]
    fn test_compose_four_levels() {
        let path = compose_ou_path(&["IT", "Toronto", "Canada", "Enterprise"], BASE);
        assert_eq!(
            path,
            "OU=IT,OU=Toronto,OU=Canada,OU=Enterprise,DC=itpositive,DC=com"
        );
    }

    #[test]
    fn test_compose_is_repeatable_and_order_sensitive() {
        let segments = ["Paris", "France", "Enterprise"];
        let first = compose_ou_path(&segments, BASE);
        let second = compose_ou_path(&segments, BASE);
        assert_eq!(first, second);

        let mut reversed = segments;
        reversed.reverse();
        assert_ne!(compose_ou_path(&reversed, BASE), first);
    }

    #[test]
    fn test_compose_does_not_escape() {
        // Known limitation: special characters pass straight through.
        let path = compose_ou_path(&["a,b"], BASE);
        assert_eq!(path, "OU=a,b,DC=itpositive,DC=com");
    }

    #[test]
    fn test_taxonomy_paths() {
        let taxonomy = Taxonomy::enterprise();
        assert_eq!(
            enterprise_path(&taxonomy),
            "OU=Enterprise,DC=itpositive,DC=com"
        );
        assert_eq!(
            country_path(&taxonomy, "USA"),
            "OU=USA,OU=Enterprise,DC=itpositive,DC=com"
        );
        assert_eq!(
            city_path(&taxonomy, "New York HQ").unwrap(),
            "OU=New York HQ,OU=USA,OU=Enterprise,DC=itpositive,DC=com"
        );
        assert_eq!(
            department_container_path(&taxonomy, "Lyon").unwrap(),
            "OU=Lyon,OU=France,OU=Enterprise,DC=itpositive,DC=com"
        );
    }

    #[test]
    fn test_city_path_unknown_city() {
        let taxonomy = Taxonomy::enterprise();
        let err = city_path(&taxonomy, "Atlantis").unwrap_err();
        assert!(matches!(err, TaxonomyError::UnknownCity(ref name) if name == "Atlantis"));
    }

    #[test]
    fn test_user_ou_path() {
        assert_eq!(
            user_ou_path("Customer Service", "London Branch", BASE),
            "OU=Customer Service,OU=London Branch,DC=itpositive,DC=com"
        );
    }

    #[test]
    fn test_account_slug() {
        assert_eq!(account_slug(&["New York HQ", "IT"]), "new-york-hq-it");
        assert_eq!(
            account_slug(&["Hong Kong", "Treasury Management"]),
            "hong-kong-treasury-management"
        );
    }

    #[test]
    fn test_plain_segment() {
        assert!(is_plain_segment("New York HQ"));
        assert!(!is_plain_segment("R&D, Labs"));
        assert!(!is_plain_segment("OU=x"));
    }
}
