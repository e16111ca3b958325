//! Optional `kivar.toml` policy file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kivar_core::VariantPolicy;

pub const CONFIG_FILE_NAME: &str = "kivar.toml";

/// `kivar.toml` in the directory holding `schematic`.
fn adjacent_config(schematic: &Path) -> PathBuf {
    schematic
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CONFIG_FILE_NAME)
}

/// Load the variant policy from `explicit`, else from a `kivar.toml` next to
/// the schematic, else fall back to the built-in defaults.
pub fn load_policy(explicit: Option<&Path>, schematic: &Path) -> Result<VariantPolicy> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let adjacent = adjacent_config(schematic);
            if !adjacent.is_file() {
                log::debug!("No {} found, using default policy", adjacent.display());
                return Ok(VariantPolicy::default());
            }
            adjacent
        }
    };

    log::debug!("Loading policy from {}", path.display());
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let policy: VariantPolicy = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    if policy.marker.is_empty() {
        anyhow::bail!("Config {}: marker must not be empty", path.display());
    }
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let schematic = dir.path().join("board.kicad_sch");
        assert_eq!(load_policy(None, &schematic).unwrap(), VariantPolicy::default());
    }

    #[test]
    fn reads_adjacent_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "marker = \"VAR_\"\n").unwrap();
        let policy = load_policy(None, &dir.path().join("board.kicad_sch")).unwrap();
        assert_eq!(policy.marker, "VAR_");
        assert_eq!(policy.value_token, "Value");
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = load_policy(Some(&missing), &dir.path().join("board.kicad_sch")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config"));
    }

    #[test]
    fn rejects_empty_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.toml");
        fs::write(&path, "marker = \"\"\n").unwrap();
        assert!(load_policy(Some(&path), &dir.path().join("board.kicad_sch")).is_err());
    }
}
