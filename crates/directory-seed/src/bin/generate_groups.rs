//! Writes one security group per city and department to `enterprise_groups.csv`.
//!
//! Run with:
//! ```
//! cargo run -p directory-seed --bin generate-groups
//! ```

use anyhow::Context;
use directory_seed::config::SeedConfig;
use directory_seed::generators::GroupGenerator;
use directory_seed::output::{GROUPS_FILE, write_csv};

fn main() -> anyhow::Result<()> {
    directory_seed::init_logging();

    let config = SeedConfig::from_env()?;
    let taxonomy = config.taxonomy().context("loading taxonomy")?;

    let groups = GroupGenerator::with_taxonomy(taxonomy).generate()?;

    let path = config.output_dir.join(GROUPS_FILE);
    write_csv(&path, &groups).with_context(|| format!("writing {}", path.display()))?;

    tracing::info!("CSV '{}' generated successfully!", path.display());
    tracing::info!("Created {} group entries", groups.len());

    Ok(())
}
