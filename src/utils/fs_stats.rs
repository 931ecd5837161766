use anyhow::{bail, Result};
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// Count non-directory entries below `root`, recursively.
///
/// Symlinks are not descended into; a link that resolves to a directory counts
/// as a directory, not a file.
///
/// Unreadable subdirectories are skipped with a warning; a missing root is an error.
pub fn count_files(root: &Path) -> Result<usize> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let mut count = 0;
    for entry in WalkDir::new(root) {
        match entry {
            Ok(entry) if !entry.path().is_dir() => count += 1,
            Ok(_) => {}
            Err(err) => warn!("Skipping unreadable entry: {}", err),
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_count_files_recursive() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.csv"), "").unwrap();
        fs::create_dir_all(dir.path().join("nested").join("deeper")).unwrap();
        fs::write(dir.path().join("nested").join("b.txt"), "").unwrap();
        fs::write(dir.path().join("nested").join("deeper").join("c"), "").unwrap();

        assert_eq!(count_files(dir.path()).unwrap(), 3);
    }

    #[test]
    fn test_count_files_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert_eq!(count_files(dir.path()).unwrap(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_count_files_dir_symlink_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        assert_eq!(count_files(dir.path()).unwrap(), 0);

        fs::write(dir.path().join("real").join("a.csv"), "").unwrap();
        assert_eq!(count_files(dir.path()).unwrap(), 1);
    }

    #[test]
    fn test_count_files_missing_root() {
        let dir = TempDir::new().unwrap();
        assert!(count_files(&dir.path().join("nope")).is_err());
    }
}
