//! Default seed script - writes the OU, group, and user CSVs in one run
//!
//! Run with:
//! ```
//! SEED_RNG_SEED=12345 cargo run -p directory-seed --bin seed
//! ```

use anyhow::Context;
use directory_seed::builders::SeedPlan;
use directory_seed::config::SeedConfig;
use directory_seed::identity::FakeIdentitySource;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> anyhow::Result<()> {
    directory_seed::init_logging();

    let config = SeedConfig::from_env()?;
    let taxonomy = config.taxonomy().context("loading taxonomy")?;

    let mut rng = config.rng();
    let mut identities = FakeIdentitySource::new(StdRng::from_rng(&mut rng)?);

    let result = SeedPlan::new()
        .with_taxonomy(taxonomy)
        .with_users(config.user_count)
        .build(&mut identities, &mut rng)?;

    let files = result
        .write_to(&config.output_dir)
        .with_context(|| format!("writing into {}", config.output_dir.display()))?;

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  OUs: {} -> {}", result.ous.len(), files.ous.display());
    tracing::info!("  Groups: {} -> {}", result.groups.len(), files.groups.display());
    tracing::info!("  Users: {} -> {}", result.users.len(), files.users.display());

    Ok(())
}
