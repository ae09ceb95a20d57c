use crate::digest::DigestAlgorithm;
use crate::error::CleanError;
use crate::filter::{clean_with, CleanReport, LineFilter};
use std::path::{Path, PathBuf};

/// Dumps picked up when the tool runs without an explicit input
pub const DEFAULT_TARGETS: &[&str] = &["viora_pluse_v1_data.sql", "viora_pluse_v1_schema.sql"];

/// Suffix inserted before the extension of a cleaned file
pub const CLEANED_SUFFIX: &str = "_cleaned";

/// Sibling path for the cleaned form of `path`
///
/// `dump.sql` becomes `dump_cleaned.sql`; `dump` becomes `dump_cleaned`.
pub fn cleaned_path_for(path: &Path) -> PathBuf {
    let Some(stem) = path.file_stem() else {
        let mut name = path.as_os_str().to_os_string();
        name.push(CLEANED_SUFFIX);
        return PathBuf::from(name);
    };

    let mut name = stem.to_os_string();
    name.push(CLEANED_SUFFIX);
    if let Some(extension) = path.extension() {
        name.push(".");
        name.push(extension);
    }
    path.with_file_name(name)
}

/// Clean every default target present in `dir` into its `_cleaned` sibling
///
/// Missing targets are skipped without a message. Stops at the first error.
pub fn clean_default_targets(
    dir: &Path,
    filter: &LineFilter,
    digest_algorithm: Option<DigestAlgorithm>,
) -> Result<Vec<(PathBuf, CleanReport)>, CleanError> {
    let mut cleaned = Vec::new();

    for target in DEFAULT_TARGETS {
        let input = dir.join(target);
        if !input.exists() {
            continue;
        }

        let output = cleaned_path_for(&input);
        let report = clean_with(&input, &output, filter, digest_algorithm)?;
        cleaned.push((output, report));
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaned_path_for_default_targets() {
        assert_eq!(
            cleaned_path_for(Path::new("viora_pluse_v1_data.sql")),
            PathBuf::from("viora_pluse_v1_data_cleaned.sql")
        );
        assert_eq!(
            cleaned_path_for(Path::new("viora_pluse_v1_schema.sql")),
            PathBuf::from("viora_pluse_v1_schema_cleaned.sql")
        );
    }

    #[test]
    fn test_cleaned_path_keeps_directory() {
        assert_eq!(
            cleaned_path_for(Path::new("/var/backups/db/dump.sql")),
            PathBuf::from("/var/backups/db/dump_cleaned.sql")
        );
    }

    #[test]
    fn test_cleaned_path_without_extension() {
        assert_eq!(
            cleaned_path_for(Path::new("dumps/schema")),
            PathBuf::from("dumps/schema_cleaned")
        );
    }
}
