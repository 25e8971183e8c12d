use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use tracing::debug;

use crate::error::{Result, TariffError};

pub const TARIFF_EXTENSION: &str = ".txt";

/// Returns the most recently modified `.txt` file in `dir`.
///
/// Files sharing the newest modification time are ordered by path and the
/// smallest one wins, so repeated runs over an unchanged directory always
/// pick the same file.
pub fn latest_tariff_file<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let mut candidates: Vec<(SystemTime, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let matches_extension = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(TARIFF_EXTENSION));
        if !matches_extension {
            continue;
        }

        // Follows symlinks, so a linked tariff counts with its target's mtime.
        let metadata = fs::metadata(&path)?;
        if !metadata.is_file() {
            continue;
        }

        debug!(path = %path.display(), "tariff candidate");
        candidates.push((metadata.modified()?, path));
    }

    candidates
        .into_iter()
        .max_by_key(|(modified, path)| (*modified, Reverse(path.clone())))
        .map(|(_, path)| path)
        .ok_or_else(|| TariffError::NoMatchingFile {
            dir: dir.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        fs::File,
        time::{Duration, UNIX_EPOCH},
    };

    fn touch(dir: &Path, name: &str, secs: u64) -> PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        file.set_modified(UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
        path
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = latest_tariff_file(dir.path());

        assert!(matches!(result, Err(TariffError::NoMatchingFile { .. })));
    }

    #[test]
    fn other_extensions_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "tarif.csv", 1_000);
        touch(dir.path(), "tarif.TXT", 2_000);
        fs::create_dir(dir.path().join("archive.txt")).unwrap();

        let result = latest_tariff_file(dir.path());

        assert!(matches!(result, Err(TariffError::NoMatchingFile { .. })));
    }

    #[test]
    fn picks_most_recently_modified() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "tarif_janvier.txt", 1_000);
        let newest = touch(dir.path(), "tarif_fevrier.txt", 2_000);
        touch(dir.path(), "notes.md", 3_000);

        assert_eq!(latest_tariff_file(dir.path()).unwrap(), newest);
    }

    #[test]
    fn equal_timestamps_resolve_to_smallest_path() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.txt", 5_000);
        let first = touch(dir.path(), "a.txt", 5_000);
        touch(dir.path(), "c.txt", 5_000);

        for _ in 0..3 {
            assert_eq!(latest_tariff_file(dir.path()).unwrap(), first);
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_tariff_uses_target_mtime() {
        let store = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let target = touch(store.path(), "real.dat", 9_000);
        let link = dir.path().join("tarif.txt");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert_eq!(latest_tariff_file(dir.path()).unwrap(), link);

        // Newer than the target, older than the link itself.
        let recent = touch(dir.path(), "recent.txt", 10_000);
        assert_eq!(latest_tariff_file(dir.path()).unwrap(), recent);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = latest_tariff_file(dir.path().join("absent"));

        assert!(matches!(result, Err(TariffError::Io(_))));
    }
}
