//! Seed data generation for the enterprise directory.
//!
//! This crate expands a geographic and organizational taxonomy into the CSV
//! files used to populate an Active-Directory-style directory: the OU tree,
//! one security group per city and department, and a sample of user
//! accounts.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use directory_seed::prelude::*;
//!
//! let mut rng = StdRng::seed_from_u64(12345);
//! let mut identities = FakeIdentitySource::new(StdRng::seed_from_u64(1));
//!
//! let result = SeedPlan::new()
//!     .with_users(10)
//!     .build(&mut identities, &mut rng)?;
//! result.write_to(Path::new("."))?;
//! ```

pub mod builders;
pub mod checks;
pub mod config;
pub mod dn;
pub mod generators;
pub mod identity;
pub mod output;
pub mod taxonomy;

/// Installs the `tracing` subscriber used by the seed binaries.
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{SeedError, SeedPlan, SeedResult};
    pub use crate::config::SeedConfig;
    pub use crate::dn::{account_slug, compose_ou_path, department_container_path, user_ou_path};
    pub use crate::generators::{
        GenerateError, GeneratedGroup, GeneratedOu, GeneratedUser, GroupGenerator, OuGenerator,
        OuType, UserGenerator,
    };
    pub use crate::identity::{
        FakeIdentitySource, IdentitySource, PersonalIdentity, ScriptedIdentities,
    };
    pub use crate::output::{GROUPS_FILE, OUS_FILE, USERS_FILE, write_csv};
    pub use crate::taxonomy::Taxonomy;
    pub use rand::SeedableRng;
    pub use rand::rngs::StdRng;
}
