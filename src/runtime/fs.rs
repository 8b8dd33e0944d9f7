//! File system operations (write, rename, permissions).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self, contents))]
    pub(crate) fn write_impl(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write to file {:?}", path))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn rename_impl(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to)
            .with_context(|| format!("Failed to rename {:?} to {:?}", from, to))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_file_impl(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn set_permissions_impl(&self, path: &Path, mode: u32) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(mode);
            fs::set_permissions(path, permissions)
                .with_context(|| format!("Failed to set permissions on {:?}", path))?;
        }
        #[cfg(not(unix))]
        {
            let _ = (path, mode); // Suppress unused warnings on non-Unix
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("vivadb.part");

        runtime.write(&file_path, b"hello").unwrap();
        assert!(runtime.exists(&file_path));

        let new_path = dir.path().join("vivadb");
        runtime.rename(&file_path, &new_path).unwrap();
        assert!(!runtime.exists(&file_path));
        assert_eq!(std::fs::read(&new_path).unwrap(), b"hello");

        runtime.remove_file(&new_path).unwrap();
        assert!(!runtime.exists(&new_path));
    }

    #[test]
    fn test_real_runtime_rename_overwrites() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let staged = dir.path().join("new");
        let target = dir.path().join("old");

        runtime.write(&target, b"old").unwrap();
        runtime.write(&staged, b"new").unwrap();
        runtime.rename(&staged, &target).unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn test_real_runtime_create_dir_all() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");

        runtime.create_dir_all(&nested).unwrap();
        assert!(nested.is_dir());

        // Existing directories are fine
        runtime.create_dir_all(&nested).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_real_runtime_set_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("vivadb");

        runtime.write(&file_path, b"#!/bin/sh\n").unwrap();
        runtime.set_permissions(&file_path, 0o755).unwrap();

        let mode = std::fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_real_runtime_errors() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        assert!(runtime.remove_file(&missing).is_err());
        assert!(runtime.rename(&missing, &dir.path().join("new")).is_err());
        assert!(runtime.write(&missing.join("nested/file"), b"x").is_err());
    }
}
