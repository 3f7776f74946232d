//! Migration discovery
//!
//! Lists `.sql` files in the migrations directory and builds the execution
//! plan. Ordering comes from a numeric filename prefix that is parsed and
//! validated up front: duplicate versions and mixed-width prefixes abort
//! discovery instead of silently reordering the plan.

use std::fs;
use std::path::Path;

use crate::definitions::MigrationFile;
use crate::error::{MigrateError, MigrateResult};

/// Discover migration files in `dir`, sorted by numeric version.
///
/// Filenames must follow `<version>_<name>.sql` with a decimal version
/// prefix. Non-`.sql` entries are ignored. A missing or empty directory
/// yields an empty plan, which the runner treats as a no-op success.
pub fn discover(dir: &Path) -> MigrateResult<Vec<MigrationFile>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| MigrateError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MigrateError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() || path.extension().map_or(true, |ext| ext != "sql") {
            continue;
        }

        let filename = match path.file_name().and_then(|s| s.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        candidates.push((filename, path));
    }

    // Deterministic processing order, independent of read_dir order
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    let mut prefix_width: Option<(usize, String)> = None;
    let mut migrations = Vec::with_capacity(candidates.len());

    for (filename, path) in candidates {
        let (version, width, name) = parse_filename(&filename)?;

        match &prefix_width {
            None => prefix_width = Some((width, filename.clone())),
            Some((first_width, first)) if *first_width != width => {
                return Err(MigrateError::AmbiguousOrder {
                    first: first.clone(),
                    second: filename,
                });
            }
            Some(_) => {}
        }

        migrations.push(MigrationFile {
            version,
            name,
            filename,
            path,
        });
    }

    migrations.sort_by_key(|m| m.version);

    for pair in migrations.windows(2) {
        if pair[0].version == pair[1].version {
            return Err(MigrateError::DuplicateVersion {
                version: pair[0].version,
                first: pair[0].filename.clone(),
                second: pair[1].filename.clone(),
            });
        }
    }

    Ok(migrations)
}

/// Parse `<version>_<name>.sql` into (version, prefix width, name).
fn parse_filename(filename: &str) -> MigrateResult<(u64, usize, String)> {
    let stem = filename.strip_suffix(".sql").unwrap_or(filename);

    let (prefix, rest) = stem
        .split_once('_')
        .ok_or_else(|| invalid(filename, "expected '<version>_<name>.sql'"))?;

    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(filename, "version prefix must be decimal digits"));
    }
    if rest.is_empty() {
        return Err(invalid(filename, "migration name must not be empty"));
    }

    let version = prefix
        .parse::<u64>()
        .map_err(|_| invalid(filename, "version prefix out of range"))?;

    Ok((version, prefix.len(), rest.replace('_', " ")))
}

fn invalid(filename: &str, reason: &str) -> MigrateError {
    MigrateError::InvalidFilename {
        filename: filename.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), "SELECT 1;").unwrap();
    }

    #[test]
    fn test_orders_by_version_not_directory_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "010_seed.sql");
        write(&dir, "001_init.sql");
        write(&dir, "002_add_col.sql");

        let files = discover(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, ["001_init.sql", "002_add_col.sql", "010_seed.sql"]);
    }

    #[test]
    fn test_empty_directory_yields_empty_plan() {
        let dir = TempDir::new().unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_yields_empty_plan() {
        let dir = TempDir::new().unwrap();
        assert!(discover(&dir.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn test_ignores_files_without_sql_extension() {
        let dir = TempDir::new().unwrap();
        write(&dir, "001_init.sql");
        write(&dir, "README.md");
        write(&dir, "notes.txt");

        let files = discover(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "001_init.sql");
    }

    #[test]
    fn test_ignores_subdirectories() {
        let dir = TempDir::new().unwrap();
        write(&dir, "001_init.sql");
        fs::create_dir(dir.path().join("archive.sql")).unwrap();

        assert_eq!(discover(dir.path()).unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_filename_without_version_prefix() {
        let dir = TempDir::new().unwrap();
        write(&dir, "init.sql");

        let err = discover(dir.path()).unwrap_err();
        assert!(matches!(err, MigrateError::InvalidFilename { .. }));
    }

    #[test]
    fn test_rejects_duplicate_versions() {
        let dir = TempDir::new().unwrap();
        write(&dir, "002_add_users.sql");
        write(&dir, "002_add_orders.sql");

        let err = discover(dir.path()).unwrap_err();
        match err {
            MigrateError::DuplicateVersion { version, .. } => assert_eq!(version, 2),
            other => panic!("expected DuplicateVersion, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_mixed_width_prefixes() {
        let dir = TempDir::new().unwrap();
        write(&dir, "9_add_index.sql");
        write(&dir, "10_backfill.sql");

        let err = discover(dir.path()).unwrap_err();
        assert!(matches!(err, MigrateError::AmbiguousOrder { .. }));
    }

    #[test]
    fn test_parses_version_and_name() {
        let dir = TempDir::new().unwrap();
        write(&dir, "0007_add_user_index.sql");

        let files = discover(dir.path()).unwrap();
        assert_eq!(files[0].version, 7);
        assert_eq!(files[0].name, "add user index");
    }
}
