//! Log directory manager.
//!
//! Guarantees that the log directory exists and holds no `.log` file from a
//! previous run before the fleet starts writing. Files without the `.log`
//! suffix are left alone.

use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Idempotent: a missing directory is created, an existing one is swept of
/// `.log` entries. Never fails the run because the directory was absent.
pub fn prepare(dir: &Path) -> io::Result<()> {
    match fs::read_dir(dir) {
        Ok(entries) => {
            for entry in entries {
                let entry = entry?;
                if entry.file_name().to_string_lossy().ends_with(".log") {
                    debug!(path = %entry.path().display(), "removing stale log");
                    fs::remove_file(entry.path())?;
                }
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir)?;
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(dir: &Path) -> Vec<String> {
        let mut v: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        v.sort();
        v
    }

    #[test]
    fn creates_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("logs");

        prepare(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(names(&dir), Vec::<String>::new());
    }

    #[test]
    fn removes_only_log_files() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("logs");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("0.log"), "old").unwrap();
        fs::write(dir.join("1.log"), "old").unwrap();
        fs::write(dir.join("notes.txt"), "keep").unwrap();

        prepare(&dir).unwrap();
        assert_eq!(names(&dir), vec!["notes.txt"]);
    }

    #[test]
    fn prepare_twice_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("logs");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("0.log"), "old").unwrap();
        fs::write(dir.join("keep.json"), "{}").unwrap();

        prepare(&dir).unwrap();
        let first = names(&dir);
        prepare(&dir).unwrap();
        assert_eq!(names(&dir), first);
        assert_eq!(first, vec!["keep.json"]);
    }
}
