//! Build configuration record and its on-disk cache.
//!
//! The configuration is computed once by `build` and saved as `setup.json` in
//! the object directory. Later `clean`, `install` and `uninstall` invocations
//! reuse it instead of probing the toolchain again.
//!
//! # Cache Layout
//!
//! ```text
//! {object_dir}/setup.json
//! {
//!   "source_dir": "/src/lzma",
//!   "object_dir": "/build",
//!   "target": "x86_64-linux-gnu",
//!   "library_types": ["static", "static-pic", "relocatable"],
//!   "gprbuild": { "BUILD": "PROD", "VERSION": "25.0" },
//!   ...
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{BUILD_VAR, CACHE_FILENAME, VERSION_VAR};
use crate::error::{Result, SetupError};
use crate::library::LibraryType;

/// Everything the GPR tools need to know about one configured build tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfiguration {
  /// Absolute directory holding the project file.
  pub source_dir: PathBuf,

  /// Absolute directory the tools run from; holds the cache.
  pub object_dir: PathBuf,

  /// Target triplet as given by the user or reported by the host compiler.
  pub target: String,

  /// Target name as normalized by gprconfig.
  pub canonical_target: String,

  /// Installation prefix.
  pub prefix: PathBuf,

  /// gprbuild parallelism (`0` lets gprbuild pick).
  pub jobs: u32,

  /// Install into a target specific subdirectory of the prefix.
  pub integrated: bool,

  /// Library kinds to build. The first one is the project's default kind.
  pub library_types: Vec<LibraryType>,

  /// Scenario variables passed as `-X` to every GPR tool invocation.
  #[serde(rename = "gprbuild", default)]
  pub gpr_vars: BTreeMap<String, String>,
}

impl BuildConfiguration {
  /// Create an unprobed configuration for the given directories.
  pub fn new(source_dir: impl Into<PathBuf>, object_dir: impl Into<PathBuf>) -> Self {
    Self {
      source_dir: source_dir.into(),
      object_dir: object_dir.into(),
      target: String::new(),
      canonical_target: String::new(),
      prefix: PathBuf::new(),
      jobs: 0,
      integrated: false,
      library_types: LibraryType::ALL.to_vec(),
      gpr_vars: BTreeMap::new(),
    }
  }

  /// Path of the cache file for an object directory.
  pub fn cache_path(object_dir: &Path) -> PathBuf {
    object_dir.join(CACHE_FILENAME)
  }

  /// Load the cached configuration of a previous `build`.
  ///
  /// Returns `None` when there is no cache, when it cannot be parsed, when
  /// it was written for another source/object directory pair, or when its
  /// library kinds are empty or repeated.
  pub fn load_cached(source_dir: &Path, object_dir: &Path) -> Option<Self> {
    let path = Self::cache_path(object_dir);

    let content = match fs::read_to_string(&path) {
      Ok(content) => content,
      Err(e) => {
        debug!(path = %path.display(), error = %e, "no configuration cache");
        return None;
      }
    };

    let config: Self = match serde_json::from_str(&content) {
      Ok(config) => config,
      Err(e) => {
        debug!(path = %path.display(), error = %e, "ignoring unreadable configuration cache");
        return None;
      }
    };

    if config.source_dir != source_dir || config.object_dir != object_dir {
      debug!(path = %path.display(), "configuration cache belongs to another build tree");
      return None;
    }

    let unique: HashSet<_> = config.library_types.iter().collect();
    if config.library_types.is_empty() || unique.len() != config.library_types.len() {
      debug!(path = %path.display(), "configuration cache has empty or repeated library kinds");
      return None;
    }

    Some(config)
  }

  /// Write the configuration to `setup.json` in the object directory.
  pub fn save(&self) -> Result<()> {
    let path = Self::cache_path(&self.object_dir);
    let content = serde_json::to_string_pretty(self)?;
    fs::write(&path, content).map_err(|source| SetupError::CacheWrite {
      path: path.clone(),
      source,
    })?;
    debug!(path = %path.display(), "saved configuration cache");
    Ok(())
  }

  /// Set a scenario variable of the `gprbuild` group.
  pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.gpr_vars.insert(name.into(), value.into());
  }

  pub fn var(&self, name: &str) -> Option<&str> {
    self.gpr_vars.get(name).map(String::as_str)
  }

  pub fn version(&self) -> Option<&str> {
    self.var(VERSION_VAR)
  }

  pub fn build_mode(&self) -> Option<&str> {
    self.var(BUILD_VAR)
  }

  /// The library kind the project defaults to.
  pub fn default_library_type(&self) -> Option<LibraryType> {
    self.library_types.first().copied()
  }

  /// Effective installation prefix.
  ///
  /// In integrated mode installation always goes to a target specific
  /// subdirectory of the configured prefix.
  pub fn install_prefix(&self) -> PathBuf {
    if self.integrated {
      self.prefix.join(&self.canonical_target)
    } else {
      self.prefix.clone()
    }
  }

  /// Whether the build tree lives outside of the source directory.
  pub fn is_out_of_tree(&self) -> bool {
    self.source_dir != self.object_dir
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn sample(object_dir: &Path) -> BuildConfiguration {
    let mut config = BuildConfiguration::new("/src/lzma", object_dir);
    config.target = "x86_64-linux-gnu".to_string();
    config.canonical_target = "x86_64-pc-linux-gnu".to_string();
    config.prefix = PathBuf::from("/opt/gnat");
    config.jobs = 4;
    config.set_var(VERSION_VAR, "25.0");
    config.set_var(BUILD_VAR, "PROD");
    config
  }

  #[test]
  fn new_defaults_to_all_library_types() {
    let config = BuildConfiguration::new("/src", "/obj");
    assert_eq!(config.library_types, LibraryType::ALL.to_vec());
    assert_eq!(config.default_library_type(), Some(LibraryType::Static));
    assert!(config.gpr_vars.is_empty());
  }

  #[test]
  fn save_then_load_cached() {
    let temp = TempDir::new().unwrap();
    let config = sample(temp.path());

    config.save().unwrap();
    let loaded = BuildConfiguration::load_cached(Path::new("/src/lzma"), temp.path()).unwrap();

    assert_eq!(loaded, config);
    assert_eq!(loaded.version(), Some("25.0"));
    assert_eq!(loaded.build_mode(), Some("PROD"));
  }

  #[test]
  fn cache_uses_gprbuild_group() {
    let temp = TempDir::new().unwrap();
    sample(temp.path()).save().unwrap();

    let raw: serde_json::Value =
      serde_json::from_str(&fs::read_to_string(temp.path().join(CACHE_FILENAME)).unwrap()).unwrap();
    assert_eq!(raw["gprbuild"][VERSION_VAR], "25.0");
    assert_eq!(raw["library_types"][1], "static-pic");
  }

  #[test]
  fn load_cached_missing_file() {
    let temp = TempDir::new().unwrap();
    assert!(BuildConfiguration::load_cached(Path::new("/src/lzma"), temp.path()).is_none());
  }

  #[test]
  fn load_cached_ignores_other_source_dir() {
    let temp = TempDir::new().unwrap();
    sample(temp.path()).save().unwrap();

    assert!(BuildConfiguration::load_cached(Path::new("/src/other"), temp.path()).is_none());
  }

  #[test]
  fn load_cached_ignores_garbage() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(CACHE_FILENAME), "{ not json").unwrap();

    assert!(BuildConfiguration::load_cached(Path::new("/src/lzma"), temp.path()).is_none());
  }

  #[test]
  fn load_cached_rejects_unknown_library_type() {
    let temp = TempDir::new().unwrap();
    let config = sample(temp.path());
    let json = serde_json::to_string(&config)
      .unwrap()
      .replace("\"relocatable\"", "\"dynamic\"");
    fs::write(temp.path().join(CACHE_FILENAME), json).unwrap();

    assert!(BuildConfiguration::load_cached(Path::new("/src/lzma"), temp.path()).is_none());
  }

  #[test]
  fn load_cached_rejects_empty_library_types() {
    let temp = TempDir::new().unwrap();
    let mut config = sample(temp.path());
    config.library_types.clear();
    config.save().unwrap();

    assert!(BuildConfiguration::load_cached(Path::new("/src/lzma"), temp.path()).is_none());
  }

  #[test]
  fn load_cached_rejects_duplicate_library_types() {
    let temp = TempDir::new().unwrap();
    let mut config = sample(temp.path());
    config.library_types = vec![LibraryType::Static, LibraryType::Static];
    config.save().unwrap();

    assert!(BuildConfiguration::load_cached(Path::new("/src/lzma"), temp.path()).is_none());
  }

  #[test]
  fn install_prefix_integrated() {
    let temp = TempDir::new().unwrap();
    let mut config = sample(temp.path());

    assert_eq!(config.install_prefix(), PathBuf::from("/opt/gnat"));

    config.integrated = true;
    assert_eq!(
      config.install_prefix(),
      PathBuf::from("/opt/gnat").join("x86_64-pc-linux-gnu")
    );
  }

  #[test]
  fn out_of_tree_detection() {
    assert!(BuildConfiguration::new("/src", "/obj").is_out_of_tree());
    assert!(!BuildConfiguration::new("/src", "/src").is_out_of_tree());
  }
}
