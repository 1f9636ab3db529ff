//! User account generation.

use rand::Rng;
use serde::Serialize;
use time::Date;
use tracing::debug;

use crate::dn::user_ou_path;
use crate::generators::GenerateError;
use crate::identity::{IdentityError, IdentitySource, PersonalIdentity};
use crate::output::{CsvRecord, serialize_bool, serialize_date};
use crate::taxonomy::{Taxonomy, TaxonomyError};

/// First employee ID handed out in a batch.
pub const EMPLOYEE_ID_BASE: u32 = 10000;

/// Generated user row ready for CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeneratedUser {
    pub name: String,
    pub user_principal_name: String,
    pub sam_account_name: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub department: String,
    pub title: String,
    pub country: String,
    pub branch: String,
    #[serde(rename = "OU")]
    pub ou: String,
    pub manager: String,
    pub email: String,
    #[serde(rename = "EmployeeID")]
    pub employee_id: u32,
    pub phone_number: String,
    #[serde(serialize_with = "serialize_bool")]
    pub account_enabled: bool,
    pub password: String,
    pub groups: String,
    #[serde(rename = "MFAEnabled", serialize_with = "serialize_bool")]
    pub mfa_enabled: bool,
    #[serde(rename = "GPOPolicyApplied")]
    pub gpo_policy_applied: String,
    #[serde(serialize_with = "serialize_date")]
    pub last_logon_date: Date,
    #[serde(serialize_with = "serialize_date")]
    pub password_last_set: Date,
    #[serde(serialize_with = "serialize_bool")]
    pub account_locked: bool,
    pub notes: String,
}

impl CsvRecord for GeneratedUser {
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "UserPrincipalName",
        "SamAccountName",
        "FirstName",
        "LastName",
        "DisplayName",
        "Department",
        "Title",
        "Country",
        "Branch",
        "OU",
        "Manager",
        "Email",
        "EmployeeID",
        "PhoneNumber",
        "AccountEnabled",
        "Password",
        "Groups",
        "MFAEnabled",
        "GPOPolicyApplied",
        "LastLogonDate",
        "PasswordLastSet",
        "AccountLocked",
        "Notes",
    ];
}

/// Fixed account attributes applied to every generated user.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    pub title: String,
    pub temporary_password: String,
    pub gpo_policy: String,
    /// Probability that MFA is enabled for a user.
    pub mfa_probability: f64,
}

impl UserGenConfig {
    /// Checks that the configured probabilities are usable.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if !(0.0..=1.0).contains(&self.mfa_probability) {
            return Err(GenerateError::InvalidConfig(format!(
                "mfa_probability must be within [0, 1], got {}",
                self.mfa_probability
            )));
        }
        Ok(())
    }
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            title: "Employee".to_string(),
            temporary_password: "TempPass123!".to_string(),
            gpo_policy: "DefaultPolicy".to_string(),
            mfa_probability: 0.5,
        }
    }
}

/// Generates user accounts placed in random branches and departments.
pub struct UserGenerator {
    taxonomy: Taxonomy,
    config: UserGenConfig,
}

impl UserGenerator {
    /// Creates a new user generator over the built-in taxonomy.
    pub fn new() -> Self {
        Self {
            taxonomy: Taxonomy::enterprise(),
            config: UserGenConfig::default(),
        }
    }

    /// Creates a generator over a custom taxonomy.
    pub fn with_taxonomy(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy,
            config: UserGenConfig::default(),
        }
    }

    /// Replaces the fixed account attributes.
    pub fn with_config(mut self, config: UserGenConfig) -> Self {
        self.config = config;
        self
    }

    /// Generates `count` users with employee IDs starting at
    /// [`EMPLOYEE_ID_BASE`]. Any identity failure aborts the whole batch.
    pub fn generate_batch(
        &self,
        count: usize,
        run_date: Date,
        identities: &mut impl IdentitySource,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedUser>, GenerateError> {
        self.taxonomy.validate()?;
        self.config.validate()?;

        let mut users = Vec::with_capacity(count);
        for index in 0..count {
            users.push(self.generate(index, run_date, &mut *identities, &mut *rng)?);
        }

        debug!("Assembled {} users", users.len());
        Ok(users)
    }

    /// Generates the user at position `index` of a batch.
    pub fn generate(
        &self,
        index: usize,
        run_date: Date,
        identities: &mut impl IdentitySource,
        rng: &mut impl Rng,
    ) -> Result<GeneratedUser, GenerateError> {
        self.config.validate()?;

        let office = pick(&self.taxonomy.branches, "branch offices", rng)?;
        let branch = pick(&office.cities, "branch cities", rng)?;
        let department = pick(&self.taxonomy.departments, "departments", rng)?;

        let identity = identities.next_identity()?;
        let username = username_for(&identity)?;
        let email = format!("{username}@{}", self.taxonomy.mail_domain);
        let employee_id = u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(EMPLOYEE_ID_BASE))
            .ok_or(GenerateError::EmployeeIdOverflow(index))?;

        let PersonalIdentity {
            first_name,
            last_name,
            phone_number,
        } = identity;

        Ok(GeneratedUser {
            name: username.clone(),
            user_principal_name: email.clone(),
            sam_account_name: username,
            display_name: format!("{first_name} {last_name}"),
            first_name,
            last_name,
            department: department.clone(),
            title: self.config.title.clone(),
            country: office.country.clone(),
            branch: branch.clone(),
            ou: user_ou_path(department, branch, &self.taxonomy.base_dn),
            manager: String::new(),
            email,
            employee_id,
            phone_number,
            account_enabled: true,
            password: self.config.temporary_password.clone(),
            groups: format!("{department}Team"),
            mfa_enabled: rng.gen_bool(self.config.mfa_probability),
            gpo_policy_applied: self.config.gpo_policy.clone(),
            last_logon_date: run_date,
            password_last_set: run_date,
            account_locked: false,
            notes: String::new(),
        })
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks one item uniformly at random.
fn pick<'a, T>(
    items: &'a [T],
    catalog: &'static str,
    rng: &mut impl Rng,
) -> Result<&'a T, TaxonomyError> {
    if items.is_empty() {
        return Err(TaxonomyError::EmptyCatalog(catalog));
    }
    Ok(&items[rng.gen_range(0..items.len())])
}

/// First initial followed by the last name, lowercased.
fn username_for(identity: &PersonalIdentity) -> Result<String, IdentityError> {
    let first = identity.first_name.trim();
    let last = identity.last_name.trim();

    let Some(initial) = first.chars().next() else {
        return Err(malformed(identity));
    };
    if last.is_empty() {
        return Err(malformed(identity));
    }

    let mut username: String = initial.to_lowercase().collect();
    username.push_str(&last.to_lowercase());
    Ok(username)
}

fn malformed(identity: &PersonalIdentity) -> IdentityError {
    IdentityError::MalformedName {
        first: identity.first_name.clone(),
        last: identity.last_name.clone(),
    }
}
