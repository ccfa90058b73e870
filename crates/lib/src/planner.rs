//! Variant planning.
//!
//! Turns the user's build flags into a derived [`BuildConfiguration`], and a
//! derived configuration into the ordered list of [`BuildVariant`]s that each
//! GPR tool invocation is repeated over.
//!
//! Both steps are single-pass and stateless: the configuration is taken by
//! value and returned updated, and variants are projected from it without
//! touching anything else.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::BuildConfiguration;
use crate::consts::{
  BUILD_VAR, GPR_BUILD_VAR, LABEL_WIDTH, LIBRARY_TYPE_VAR, VERSION_FILENAME, VERSION_VAR,
};
use crate::error::{Result, SetupError};
use crate::library::{self, LibraryType};

/// Build flags as validated by the argument parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildFlags {
  /// Build the shared (relocatable) and PIC variants in addition to static.
  pub enable_shared: bool,
  /// Build in debug mode instead of production mode.
  pub debug: bool,
}

impl Default for BuildFlags {
  fn default() -> Self {
    Self {
      enable_shared: true,
      debug: false,
    }
  }
}

/// Optimization profile selected through the project's `BUILD` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
  Debug,
  Prod,
}

impl BuildMode {
  pub fn from_debug(debug: bool) -> Self {
    if debug { BuildMode::Debug } else { BuildMode::Prod }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      BuildMode::Debug => "DEBUG",
      BuildMode::Prod => "PROD",
    }
  }
}

impl fmt::Display for BuildMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The GPR tool subcommand a list of variants is planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
  Build,
  Clean,
  Install,
  Uninstall,
}

impl CommandKind {
  pub fn as_str(self) -> &'static str {
    match self {
      CommandKind::Build => "build",
      CommandKind::Clean => "clean",
      CommandKind::Install => "install",
      CommandKind::Uninstall => "uninstall",
    }
  }
}

impl fmt::Display for CommandKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One concrete library kind to build, clean or install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVariant {
  /// Extra arguments for the GPR tool.
  pub args: Vec<String>,
  /// Scenario variables specific to this variant.
  pub vars: BTreeMap<String, String>,
}

impl BuildVariant {
  /// The variant's `LIBRARY_TYPE` value.
  pub fn library_type(&self) -> Option<&str> {
    self.vars.get(LIBRARY_TYPE_VAR).map(String::as_str)
  }
}

/// Location of the version file for a project source directory.
pub fn version_file_path(source_dir: &Path) -> PathBuf {
  source_dir.join("..").join(VERSION_FILENAME)
}

/// Library kinds to build for the given flags.
///
/// The first entry is the kind the project defaults to, so the order is part
/// of the contract and does not depend on anything but `enable_shared`.
pub fn library_types_for(flags: &BuildFlags) -> Vec<LibraryType> {
  if flags.enable_shared {
    vec![LibraryType::Static, LibraryType::StaticPic, LibraryType::Relocatable]
  } else {
    vec![LibraryType::Static]
  }
}

/// Whitespace stripped around a version token: ASCII whitespace plus
/// vertical tab, which `u8::is_ascii_whitespace` leaves out.
fn is_version_space(b: &u8) -> bool {
  b.is_ascii_whitespace() || *b == 0x0b
}

fn trim_version(bytes: &[u8]) -> &[u8] {
  let start = bytes.iter().position(|b| !is_version_space(b)).unwrap_or(bytes.len());
  let end = bytes.iter().rposition(|b| !is_version_space(b)).map_or(start, |i| i + 1);
  &bytes[start..end]
}

/// Read a version file, trimming surrounding whitespace.
pub fn read_version(path: &Path) -> Result<String> {
  let bytes = fs::read(path).map_err(|source| SetupError::VersionFile {
    path: path.to_path_buf(),
    source,
  })?;

  let version = std::str::from_utf8(trim_version(&bytes)).map_err(|_| SetupError::VersionEncoding {
    path: path.to_path_buf(),
  })?;

  Ok(version.to_string())
}

/// Derive the project configuration from the user's flags.
///
/// Sets the library kinds, the `VERSION` variable read from `version_file`
/// and the `BUILD` mode. A missing or unreadable version file aborts the
/// derivation and no configuration is returned.
pub fn derive_configuration(
  base: BuildConfiguration,
  flags: &BuildFlags,
  version_file: &Path,
) -> Result<BuildConfiguration> {
  let mut config = base;

  config.library_types = library_types_for(flags);
  info!(
    "{:<width$} {}",
    "Libraries kind",
    library::join(&config.library_types),
    width = LABEL_WIDTH
  );

  let version = read_version(version_file)?;
  config.set_var(VERSION_VAR, version);

  let mode = BuildMode::from_debug(flags.debug);
  config.set_var(BUILD_VAR, mode.as_str());
  info!("{:<width$} {}", "Build mode", mode, width = LABEL_WIDTH);

  Ok(config)
}

/// Plan one variant per configured library kind, in configuration order.
///
/// Installing a variant also needs gprinstall to record it under its own
/// build name, keyed by `LIBRARY_TYPE`.
pub fn plan_variants(config: &BuildConfiguration, command: CommandKind) -> Vec<BuildVariant> {
  config
    .library_types
    .iter()
    .map(|library_type| {
      let kind = library_type.as_str();

      let mut vars = BTreeMap::new();
      vars.insert(LIBRARY_TYPE_VAR.to_string(), kind.to_string());
      vars.insert(GPR_BUILD_VAR.to_string(), kind.to_string());

      let args = match command {
        CommandKind::Install => vec![
          format!("--build-name={}", kind),
          format!("--build-var={}", LIBRARY_TYPE_VAR),
        ],
        _ => Vec::new(),
      };

      BuildVariant { args, vars }
    })
    .collect()
}
