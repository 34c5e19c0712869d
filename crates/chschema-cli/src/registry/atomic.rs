use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{RegistryError, RegistryResult};

/// Write `data` to a sibling temp file, then rename it over `path`.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> RegistryResult<()> {
    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path)?;
    if let Err(err) = write_and_rename(&tmp_path, path, data) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    if let Some(parent) = parent {
        sync_dir(parent)?;
    }

    Ok(())
}

fn write_and_rename(tmp_path: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(tmp_path, path)
}

fn temp_path(path: &Path) -> RegistryResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| RegistryError::InvalidPath(path.display().to_string()))?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(unix)]
fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "chschema-{name}-{}",
            uuid::Uuid::new_v4()
        ));
        create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn replaces_existing_file() {
        let dir = scratch_dir("atomic");
        let path = dir.join("nested").join("report.txt");

        write_bytes_atomic(&path, b"first").expect("first write");
        write_bytes_atomic(&path, b"second").expect("second write");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "second");
        assert!(!dir.join("nested").join("report.txt.tmp").exists());
        std::fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = scratch_dir("atomic-fail");
        let target = dir.join("occupied");
        create_dir_all(target.join("child")).expect("create non-empty dir");

        let result = write_bytes_atomic(&target, b"report");

        assert!(matches!(result, Err(RegistryError::Io(_))));
        assert!(!dir.join("occupied.tmp").exists());
        assert!(target.join("child").is_dir());
        std::fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn rejects_path_without_file_name() {
        assert!(matches!(
            write_bytes_atomic(Path::new("/"), b"x"),
            Err(RegistryError::InvalidPath(_))
        ));
    }
}
