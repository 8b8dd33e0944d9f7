//! Operating system and process information.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn os_name_impl(&self) -> String {
        env::consts::OS.to_string()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn current_exe_impl(&self) -> Result<PathBuf> {
        env::current_exe().context("Failed to locate the running executable")
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};

    #[test]
    fn test_real_runtime_os_and_exe() {
        let runtime = RealRuntime;

        let os = runtime.os_name();
        assert!(!os.is_empty());

        #[cfg(target_os = "linux")]
        assert_eq!(os, "linux");

        #[cfg(target_os = "macos")]
        assert_eq!(os, "macos");

        let exe = runtime.current_exe().unwrap();
        assert!(exe.is_absolute());
        assert!(exe.parent().is_some());
    }
}
