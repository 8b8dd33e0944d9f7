//! Runtime abstraction for system operations.
//!
//! The fetcher never touches the host directly: OS identity, the location
//! of the running executable and every file-system call go through
//! [`Runtime`], so tests can substitute `MockRuntime`.
//!
//! # Structure
//!
//! - `env` - Operating system and process information
//! - `fs` - File system operations (write, rename, permissions)

mod env;
mod fs;

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Runtime: Send + Sync {
    // Environment
    /// Name of the host operating system, e.g. `linux`, `macos`, `windows`.
    fn os_name(&self) -> String;
    /// Absolute path of the running executable.
    fn current_exe(&self) -> Result<PathBuf>;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;

    /// Set file permissions (mode) on Unix systems. No-op on Windows.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;
}

pub struct RealRuntime;

#[async_trait]
impl Runtime for RealRuntime {
    fn os_name(&self) -> String {
        self.os_name_impl()
    }

    fn current_exe(&self) -> Result<PathBuf> {
        self.current_exe_impl()
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.rename_impl(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove_file_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        self.set_permissions_impl(path, mode)
    }
}
