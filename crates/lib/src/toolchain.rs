//! Toolchain discovery.
//!
//! Locates programs on `PATH` and asks the host compiler and gprconfig about
//! the target, its normalized name and the default installation prefix.

use std::path::{Path, PathBuf};
use std::process::Command;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, SetupError};

const NORMALIZED_TARGET_PATTERN: &str = r" 1 normalized_target:(\S*)";
const COMPILER_PATH_PATTERN: &str = r" 1 path:(.*)";

/// Resolve a program name to an executable path using `PATH`.
pub fn find_program(name: &str) -> Result<PathBuf> {
  which::which(name).map_err(|_| SetupError::ProgramNotFound(name.to_string()))
}

/// Extract the first capture group of the first match of `pattern`.
pub fn grab(output: &str, pattern: &str) -> Result<Option<String>> {
  let re = Regex::new(pattern)?;
  Ok(
    re.captures(output)
      .and_then(|caps| caps.get(1))
      .map(|m| m.as_str().to_string()),
  )
}

/// Run a program and return its trimmed standard output.
///
/// With a `pattern`, only the first capture group of its first match is
/// returned.
pub fn capture(program: &str, args: &[&str], pattern: Option<&str>) -> Result<String> {
  let path = find_program(program)?;
  debug!(program = %path.display(), ?args, "capturing output");

  let output = Command::new(&path)
    .args(args)
    .output()
    .map_err(|source| SetupError::Spawn {
      program: program.to_string(),
      source,
    })?;

  if !output.status.success() {
    return Err(SetupError::CommandFailed {
      program: program.to_string(),
      code: output.status.code(),
    });
  }

  let stdout = String::from_utf8(output.stdout).map_err(|_| SetupError::OutputEncoding {
    program: program.to_string(),
  })?;
  let stdout = stdout.trim();

  match pattern {
    None => Ok(stdout.to_string()),
    Some(pattern) => grab(stdout, pattern)?.ok_or_else(|| SetupError::GrabFailed {
      program: program.to_string(),
      pattern: pattern.to_string(),
    }),
  }
}

/// Target triplet of the host compiler.
pub fn host_target() -> Result<String> {
  capture("gcc", &["-dumpmachine"], None)
}

fn show_compilers(target: &str, pattern: &str) -> Result<String> {
  let target_arg = format!("--target={}", target);
  capture(
    "gprconfig",
    &["--config=ada", &target_arg, "--mi-show-compilers"],
    Some(pattern),
  )
}

/// Target name as normalized by gprconfig for the first Ada compiler.
pub fn canonical_target(target: &str) -> Result<String> {
  show_compilers(target, NORMALIZED_TARGET_PATTERN)
}

/// Installation prefix of the first Ada compiler for `target`.
pub fn default_prefix(target: &str) -> Result<PathBuf> {
  let compiler_path = show_compilers(target, COMPILER_PATH_PATTERN)?;
  Ok(prefix_from_compiler_path(&compiler_path))
}

/// Compiler prefix from the path reported by gprconfig.
///
/// The reported path is the compiler's `bin` directory, usually with a
/// trailing separator. The prefix is the directory above it.
pub fn prefix_from_compiler_path(raw: &str) -> PathBuf {
  let path = Path::new(raw);
  let bin_dir = if raw.ends_with(['/', '\\']) {
    path
  } else {
    path.parent().unwrap_or(path)
  };
  bin_dir.parent().unwrap_or(bin_dir).to_path_buf()
}
