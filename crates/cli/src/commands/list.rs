use std::path::Path;

use stratum_migrate::discovery;
use stratum_migrate::MigrateResult;

pub async fn list(dir: &Path, json: bool) -> MigrateResult<()> {
    let plan = discovery::discover(dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if plan.is_empty() {
        println!("No migrations found in {}", dir.display());
        return Ok(());
    }

    println!("Found {} migration(s):", plan.len());
    for migration in &plan {
        println!("  {:>5}  {}", migration.version, migration.filename);
    }

    Ok(())
}
