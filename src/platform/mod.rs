//! Host platform detection.
//!
//! Maps the operating system name reported by the [`Runtime`] onto the
//! identifier used in release artifact names (`vivadb-linux`, `vivadb-macos`).

use log::{debug, warn};

use crate::error::FetchError;
use crate::runtime::Runtime;

/// Platforms with a published vivadb build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
}

impl Platform {
    /// Normalizes an OS name into a platform.
    ///
    /// `windows` is rejected. `darwin` and `macos` map to [`Platform::MacOs`].
    /// Every other name falls back to [`Platform::Linux`].
    pub fn from_os_name(os: &str) -> Result<Self, FetchError> {
        let normalized = os.trim().to_lowercase();
        match normalized.as_str() {
            "windows" => Err(FetchError::UnsupportedPlatform("Windows".to_string())),
            "darwin" | "macos" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            other => {
                warn!(
                    "Unrecognized operating system {:?}, falling back to the linux build",
                    other
                );
                Ok(Platform::Linux)
            }
        }
    }

    /// Identifier used in the artifact file name.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Detects the platform of the host the runtime reports.
#[tracing::instrument(skip(runtime))]
pub fn detect_platform<R: Runtime>(runtime: &R) -> Result<Platform, FetchError> {
    let os = runtime.os_name();
    debug!("Host operating system: {}", os);
    Platform::from_os_name(&os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, RealRuntime};

    #[test]
    fn test_windows_is_unsupported() {
        let result = Platform::from_os_name("windows");
        assert!(matches!(result, Err(FetchError::UnsupportedPlatform(_))));
    }

    #[test]
    fn test_windows_is_unsupported_case_insensitive() {
        let result = Platform::from_os_name("Windows");
        assert!(matches!(result, Err(FetchError::UnsupportedPlatform(_))));
    }

    #[test]
    fn test_darwin_maps_to_macos() {
        assert_eq!(Platform::from_os_name("Darwin").unwrap(), Platform::MacOs);
        assert_eq!(Platform::from_os_name("macos").unwrap(), Platform::MacOs);
    }

    #[test]
    fn test_linux() {
        assert_eq!(Platform::from_os_name("Linux").unwrap(), Platform::Linux);
    }

    #[test]
    fn test_unknown_os_falls_back_to_linux() {
        assert_eq!(Platform::from_os_name("freebsd").unwrap(), Platform::Linux);
        assert_eq!(Platform::from_os_name("").unwrap(), Platform::Linux);
    }

    #[test]
    fn test_platform_id_and_display() {
        assert_eq!(Platform::Linux.id(), "linux");
        assert_eq!(Platform::MacOs.id(), "macos");
        assert_eq!(Platform::MacOs.to_string(), "macos");
    }

    #[test]
    fn test_detect_platform_uses_runtime() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_os_name()
            .times(1)
            .returning(|| "darwin".to_string());

        assert_eq!(detect_platform(&runtime).unwrap(), Platform::MacOs);
    }

    #[test]
    fn test_detect_platform_real_host() {
        let result = detect_platform(&RealRuntime);

        #[cfg(target_os = "linux")]
        assert_eq!(result.unwrap(), Platform::Linux);

        #[cfg(target_os = "macos")]
        assert_eq!(result.unwrap(), Platform::MacOs);

        #[cfg(windows)]
        assert!(matches!(result, Err(FetchError::UnsupportedPlatform(_))));
    }
}
