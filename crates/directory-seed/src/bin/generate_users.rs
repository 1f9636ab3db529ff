//! Writes a sample of user accounts to `enterprise_users.csv`.
//!
//! Run with:
//! ```
//! SEED_USER_COUNT=10 cargo run -p directory-seed --bin generate-users
//! ```

use anyhow::Context;
use directory_seed::config::SeedConfig;
use directory_seed::generators::UserGenerator;
use directory_seed::identity::FakeIdentitySource;
use directory_seed::output::{USERS_FILE, write_csv};
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::OffsetDateTime;

fn main() -> anyhow::Result<()> {
    directory_seed::init_logging();

    let config = SeedConfig::from_env()?;
    let taxonomy = config.taxonomy().context("loading taxonomy")?;

    let mut rng = config.rng();
    let mut identities = FakeIdentitySource::new(StdRng::from_rng(&mut rng)?);
    let today = OffsetDateTime::now_utc().date();

    let users = UserGenerator::with_taxonomy(taxonomy).generate_batch(
        config.user_count,
        today,
        &mut identities,
        &mut rng,
    )?;

    let path = config.output_dir.join(USERS_FILE);
    write_csv(&path, &users).with_context(|| format!("writing {}", path.display()))?;

    tracing::info!("CSV '{}' generated successfully!", path.display());
    tracing::info!("Created {} user entries", users.len());

    Ok(())
}
