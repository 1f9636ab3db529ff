//! Writes the OU tree to `enterprise_ous.csv`.
//!
//! Run with:
//! ```
//! cargo run -p directory-seed --bin generate-ous
//! ```

use anyhow::Context;
use directory_seed::config::SeedConfig;
use directory_seed::generators::OuGenerator;
use directory_seed::output::{OUS_FILE, write_csv};

fn main() -> anyhow::Result<()> {
    directory_seed::init_logging();

    let config = SeedConfig::from_env()?;
    let taxonomy = config.taxonomy().context("loading taxonomy")?;

    let ous = OuGenerator::with_taxonomy(taxonomy).generate()?;

    let path = config.output_dir.join(OUS_FILE);
    write_csv(&path, &ous).with_context(|| format!("writing {}", path.display()))?;

    tracing::info!("CSV '{}' generated successfully!", path.display());
    tracing::info!("Created {} OU entries", ous.len());

    Ok(())
}
