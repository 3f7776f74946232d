use std::path::Path;

use stratum_migrate::{runner, ApplyOutcome, MigrateResult};

use super::load_config;

pub async fn apply(file: &Path, local: bool) -> MigrateResult<()> {
    let config = load_config(local)?;

    match runner::apply_single(&config, file).await? {
        ApplyOutcome::Applied => println!("✅ Applied {}", file.display()),
        ApplyOutcome::AlreadyPresent => println!(
            "⚠️  {} reported existing objects; nothing to do",
            file.display()
        ),
    }

    Ok(())
}
