//! Console configuration stored as TOML (default `cmdmap.toml`).

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryOptions;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "cmdmap.toml";

/// Console configuration (TOML).
///
/// Edited by hand; missing fields fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Written before each console read. Empty disables the prompt.
    pub prompt: String,

    /// Labels from the built-in catalog that are not registered.
    pub disabled: BTreeSet<String>,

    /// Extra aliases per label, e.g. `echo = ["print"]`.
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            disabled: BTreeSet::new(),
            aliases: BTreeMap::new(),
        }
    }
}

impl ConsoleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.prompt.contains('\n') {
            return Err(anyhow!("prompt must not contain a newline"));
        }
        if let Some(label) = self.disabled.iter().find(|label| !is_valid_key(label)) {
            return Err(anyhow!("disabled entry {label:?} is not a valid label"));
        }
        for (label, aliases) in &self.aliases {
            if !is_valid_key(label) {
                return Err(anyhow!("aliases key {label:?} is not a valid label"));
            }
            if let Some(alias) = aliases.iter().find(|alias| !is_valid_key(alias)) {
                return Err(anyhow!("alias {alias:?} for {label} is not a valid label"));
            }
        }
        Ok(())
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            disabled: self.disabled.clone(),
            extra_aliases: self.aliases.clone(),
        }
    }
}

/// A key the line parser can produce: non-empty, no spaces.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(char::is_whitespace)
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ConsoleConfig::default()`.
pub fn load_config(path: &Path) -> Result<ConsoleConfig> {
    if !path.exists() {
        let cfg = ConsoleConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ConsoleConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ConsoleConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, ConsoleConfig::default());
    }

    #[test]
    fn write_then_load_preserves_fields() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("cmdmap.toml");
        let cfg = ConsoleConfig {
            prompt: String::new(),
            disabled: BTreeSet::from(["version".to_string()]),
            aliases: BTreeMap::from([("echo".to_string(), vec!["print".to_string()])]),
        };

        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("cmdmap.toml");
        fs::write(&path, "disabled = [\"whoami\"]\n").expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.prompt, "> ");
        assert!(cfg.disabled.contains("whoami"));
    }

    #[test]
    fn rejects_alias_with_space() {
        let cfg = ConsoleConfig {
            aliases: BTreeMap::from([("echo".to_string(), vec!["two words".to_string()])]),
            ..ConsoleConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("two words"), "{err}");
    }
}
