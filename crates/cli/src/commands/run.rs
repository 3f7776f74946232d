use std::path::Path;

use stratum_migrate::{runner, MigrateResult};

use super::load_config;

pub async fn run(dir: &Path, local: bool) -> MigrateResult<()> {
    let config = load_config(local)?;
    println!(
        "🗄️  Applying migrations from {} to {}",
        dir.display(),
        config.display_target()
    );

    let report = runner::run_directory(&config, dir).await?;

    if report.applied_count == 0 {
        println!("✅ Nothing to do: no migration files found");
        return Ok(());
    }

    println!(
        "✅ Applied {} migration(s) in {}ms",
        report.applied_count, report.execution_time_ms
    );
    for file in &report.applied_files {
        println!("   {}", file);
    }

    Ok(())
}
