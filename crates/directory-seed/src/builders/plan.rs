//! Fluent builder running all three generators together.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::Rng;
use thiserror::Error;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::checks::{self, ConsistencyError};
use crate::generators::{
    GenerateError, GeneratedGroup, GeneratedOu, GeneratedUser, GroupGenerator, OuGenerator,
    UserGenConfig, UserGenerator,
};
use crate::identity::IdentitySource;
use crate::output::{self, GROUPS_FILE, OUS_FILE, OutputError, USERS_FILE};
use crate::taxonomy::Taxonomy;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("Inconsistent seed data: {0}")]
    Consistency(#[from] ConsistencyError),
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// All tables produced by one [`SeedPlan`].
#[derive(Debug)]
pub struct SeedResult {
    pub ous: Vec<GeneratedOu>,
    pub groups: Vec<GeneratedGroup>,
    pub users: Vec<GeneratedUser>,
    /// Time spent generating and checking the tables (milliseconds).
    pub generation_time_ms: u64,
}

/// Paths of the files written by [`SeedResult::write_to`].
#[derive(Debug, Clone)]
pub struct WrittenFiles {
    pub ous: PathBuf,
    pub groups: PathBuf,
    pub users: PathBuf,
}

impl SeedResult {
    /// Writes the three CSV files into `dir` using the standard file names.
    ///
    /// Each file is replaced atomically; a failure leaves earlier files
    /// written and later ones untouched.
    pub fn write_to(&self, dir: &Path) -> Result<WrittenFiles, OutputError> {
        let files = WrittenFiles {
            ous: dir.join(OUS_FILE),
            groups: dir.join(GROUPS_FILE),
            users: dir.join(USERS_FILE),
        };

        output::write_csv(&files.ous, &self.ous)?;
        output::write_csv(&files.groups, &self.groups)?;
        output::write_csv(&files.users, &self.users)?;

        Ok(files)
    }
}

/// Builder for a complete seed run.
///
/// # Example
///
/// ```rust,ignore
/// let result = SeedPlan::new()
///     .with_users(25)
///     .with_run_date(date)
///     .build(&mut identities, &mut rng)?;
/// result.write_to(Path::new("out"))?;
/// ```
pub struct SeedPlan {
    taxonomy: Taxonomy,
    user_count: usize,
    user_config: UserGenConfig,
    run_date: Option<Date>,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedPlan {
    /// Creates a plan over the built-in taxonomy with 10 users.
    pub fn new() -> Self {
        Self {
            taxonomy: Taxonomy::enterprise(),
            user_count: 10,
            user_config: UserGenConfig::default(),
            run_date: None,
        }
    }

    /// Replaces the taxonomy.
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    /// Sets the number of users to generate.
    pub fn with_users(mut self, count: usize) -> Self {
        self.user_count = count;
        self
    }

    /// Sets the fixed user account attributes.
    pub fn with_user_config(mut self, config: UserGenConfig) -> Self {
        self.user_config = config;
        self
    }

    /// Pins the date stamped on user logon and password fields.
    /// Defaults to today (UTC).
    pub fn with_run_date(mut self, date: Date) -> Self {
        self.run_date = Some(date);
        self
    }

    /// Generates all tables and verifies they agree with each other.
    pub fn build(
        &self,
        identities: &mut impl IdentitySource,
        rng: &mut impl Rng,
    ) -> Result<SeedResult, SeedError> {
        let start = Instant::now();
        let run_date = self
            .run_date
            .unwrap_or_else(|| OffsetDateTime::now_utc().date());

        let ous = OuGenerator::with_taxonomy(self.taxonomy.clone())
            .generate()
            .map_err(GenerateError::from)?;
        let groups = GroupGenerator::with_taxonomy(self.taxonomy.clone()).generate()?;
        let users = UserGenerator::with_taxonomy(self.taxonomy.clone())
            .with_config(self.user_config.clone())
            .generate_batch(self.user_count, run_date, identities, rng)?;

        checks::check_unique_ous(&ous)?;
        checks::check_group_placement(&ous, &groups)?;
        checks::check_employee_ids(&users)?;

        let generation_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Generated {} OUs, {} groups, {} users in {}ms",
            ous.len(),
            groups.len(),
            users.len(),
            generation_time_ms
        );

        Ok(SeedResult {
            ous,
            groups,
            users,
            generation_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::FakeIdentitySource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::Month;

    #[test]
    fn test_build_default_plan() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut identities = FakeIdentitySource::new(StdRng::seed_from_u64(54321));

        let result = SeedPlan::new()
            .with_run_date(Date::from_calendar_date(2026, Month::October, 18).unwrap())
            .build(&mut identities, &mut rng)
            .unwrap();

        assert_eq!(result.ous.len(), 179);
        assert_eq!(result.groups.len(), 156);
        assert_eq!(result.users.len(), 10);
    }

    #[test]
    fn test_build_with_custom_user_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut identities = FakeIdentitySource::new(StdRng::seed_from_u64(2));

        let result = SeedPlan::new()
            .with_users(3)
            .build(&mut identities, &mut rng)
            .unwrap();

        assert_eq!(result.users.len(), 3);
        let today = OffsetDateTime::now_utc().date();
        // Allow for the test straddling midnight.
        assert!(result.users[0].last_logon_date <= today);
    }

    #[test]
    fn test_build_invalid_taxonomy() {
        let mut taxonomy = Taxonomy::enterprise();
        taxonomy.cities[3].country = "Narnia".to_string();

        let mut rng = StdRng::seed_from_u64(1);
        let mut identities = FakeIdentitySource::new(StdRng::seed_from_u64(2));
        let err = SeedPlan::new()
            .with_taxonomy(taxonomy)
            .build(&mut identities, &mut rng)
            .unwrap_err();

        assert!(matches!(err, SeedError::Generate(GenerateError::Taxonomy(_))));
    }
}
