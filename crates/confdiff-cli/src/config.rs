use std::path::Path;

use anyhow::Context;
use confdiff_types::TreeLimits;
use serde::{Deserialize, Serialize};

use crate::cli::DiffArgs;

/// Defaults read from a `--config` TOML file. Flags override these.
///
/// ```toml
/// color = false
/// exit_code = true
///
/// [limits]
/// max_depth = 64
/// max_nodes = 100000
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub color: bool,
    pub exit_code: bool,
    pub limits: TreeLimits,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            color: true,
            exit_code: false,
            limits: TreeLimits::unbounded(),
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load from `path` if given, otherwise use the defaults.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Tree limits with any command-line overrides applied.
    pub fn limits_for(&self, args: &DiffArgs) -> TreeLimits {
        TreeLimits {
            max_depth: args.max_depth.or(self.limits.max_depth),
            max_nodes: args.max_nodes.or(self.limits.max_nodes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> DiffArgs {
        DiffArgs {
            left: PathBuf::from("a.json"),
            right: PathBuf::from("b.json"),
            left_format: None,
            right_format: None,
            max_depth: None,
            max_nodes: None,
            exit_code: false,
        }
    }

    #[test]
    fn default_config() {
        let c = CliConfig::default();
        assert!(c.color);
        assert!(!c.exit_code);
        assert!(c.limits.is_unbounded());
    }

    #[test]
    fn load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("confdiff.toml");
        std::fs::write(&path, "color = false\n[limits]\nmax_depth = 8\n").unwrap();

        let c = CliConfig::load(&path).unwrap();
        assert!(!c.color);
        assert!(!c.exit_code);
        assert_eq!(c.limits.max_depth, Some(8));
        assert_eq!(c.limits.max_nodes, None);
    }

    #[test]
    fn unknown_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("confdiff.toml");
        std::fs::write(&path, "colour = false\n").unwrap();
        assert!(CliConfig::load(&path).is_err());
    }

    #[test]
    fn resolve_without_path_is_default() {
        assert_eq!(CliConfig::resolve(None).unwrap(), CliConfig::default());
    }

    #[test]
    fn flags_override_file_limits() {
        let config = CliConfig {
            limits: TreeLimits {
                max_depth: Some(8),
                max_nodes: Some(50),
            },
            ..CliConfig::default()
        };
        let mut a = args();
        a.max_depth = Some(3);
        let limits = config.limits_for(&a);
        assert_eq!(limits.max_depth, Some(3));
        assert_eq!(limits.max_nodes, Some(50));
    }
}
