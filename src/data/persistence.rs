use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Set once at startup by main() from the --data-dir argument.
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Call this from main() before any load/save operations.
pub fn set_data_dir(path: PathBuf) {
    let _ = DATA_DIR.set(path);
}

pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = DATA_DIR.get() {
        return Ok(dir.clone());
    }
    // Fallback when running tests or if set_data_dir was not called
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    Ok(cwd.join("config"))
}

/// A config document stored as a single YAML file in the data directory.
pub trait Persistable: Sized + Default + Serialize + for<'de> Deserialize<'de> {
    fn filename() -> &'static str;

    /// Load from an explicit directory. A missing file yields `Default`.
    fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::filename());
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_norway::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Save to an explicit directory, creating it when missing.
    fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let path = dir.join(Self::filename());
        let contents = serde_norway::to_string(self)
            .with_context(|| format!("failed to serialize {}", Self::filename()))?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct TestYamlData {
        count: u32,
        label: String,
    }

    impl Persistable for TestYamlData {
        fn filename() -> &'static str {
            "test_data.yaml"
        }
    }

    #[test]
    fn test_get_data_dir_returns_a_path() {
        assert!(get_data_dir().is_ok());
    }

    #[test]
    fn test_load_from_returns_default_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let result = TestYamlData::load_from(tmp.path()).unwrap();
        assert_eq!(result, TestYamlData::default());
    }

    #[test]
    fn test_save_to_writes_yaml() {
        let tmp = TempDir::new().unwrap();
        let data = TestYamlData {
            count: 3,
            label: "three".to_string(),
        };
        data.save_to(tmp.path()).unwrap();
        let text = fs::read_to_string(tmp.path().join("test_data.yaml")).unwrap();
        assert!(text.contains("count: 3"));
        assert!(text.contains("label: three"));
    }

    #[test]
    fn test_yaml_save_to_and_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let data = TestYamlData {
            count: 99,
            label: "x".to_string(),
        };
        data.save_to(tmp.path()).unwrap();
        let loaded = TestYamlData::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_save_to_creates_directory_if_missing() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        let data = TestYamlData {
            count: 7,
            label: String::new(),
        };
        data.save_to(&nested).unwrap();
        assert_eq!(TestYamlData::load_from(&nested).unwrap(), data);
    }

    #[test]
    fn test_load_from_reports_parse_error_with_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("test_data.yaml"), "count: [not a number").unwrap();
        let err = TestYamlData::load_from(tmp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("test_data.yaml"));
    }
}
