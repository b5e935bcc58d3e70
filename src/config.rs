use std::path::{Path, PathBuf};

use crate::policy::ErrorPolicy;

/// Default location of the kernel's GPIO sysfs interface.
pub static SYSFS_ROOT: &str = "/sys/class/gpio";

/// Settings for a [`GPIO`](crate::GPIO) controller.
///
/// * `sysfs_root` - directory holding `export`, `unexport` and the `gpio<N>` directories
/// * `policy` - what to do when a sysfs operation fails
/// * `warnings` - warn when a pin was already exported by someone else
///
/// # Example
///
/// ```rust
/// use sysfs_gpio_out::{Config, ErrorPolicy};
///
/// let config = Config::default()
///     .sysfs_root("/tmp/fake-gpio")
///     .policy(ErrorPolicy::Report)
///     .warnings(false);
/// assert_eq!(config.root().to_str(), Some("/tmp/fake-gpio"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) sysfs_root: PathBuf,
    pub(crate) policy: ErrorPolicy,
    pub(crate) warnings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sysfs_root: PathBuf::from(SYSFS_ROOT),
            policy: ErrorPolicy::default(),
            warnings: true,
        }
    }
}

impl Config {
    pub fn sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = root.into();
        self
    }

    pub fn policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn warnings(mut self, warnings: bool) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn root(&self) -> &Path {
        &self.sysfs_root
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn warnings_enabled(&self) -> bool {
        self.warnings
    }
}
