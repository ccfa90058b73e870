//! Error types for configuring and driving a GPR project build.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring or building a project.
#[derive(Debug, Error)]
pub enum SetupError {
  /// The version file is missing or unreadable.
  #[error("failed to read version file {path}: {source}")]
  VersionFile {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The trimmed version file content is not valid UTF-8.
  #[error("version file {path} is not valid UTF-8")]
  VersionEncoding { path: PathBuf },

  /// A library type name outside of static, static-pic and relocatable.
  #[error("unsupported library type: {0}")]
  UnsupportedLibraryType(String),

  /// A required program could not be located on PATH.
  #[error("cannot find program: {0}")]
  ProgramNotFound(String),

  /// A program was found but could not be started.
  #[error("failed to launch {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  /// A program exited with a non-zero status.
  #[error("process failed with status {code:?}: {program}")]
  CommandFailed { program: String, code: Option<i32> },

  /// Captured program output is not valid UTF-8.
  #[error("output of {program} is not valid UTF-8")]
  OutputEncoding { program: String },

  /// A grab pattern did not match the captured output.
  #[error("no match for pattern {pattern:?} in output of {program}")]
  GrabFailed { program: String, pattern: String },

  /// A grab pattern is not a valid regular expression.
  #[error("invalid pattern: {0}")]
  Pattern(#[from] regex::Error),

  /// The configuration cache could not be written.
  #[error("failed to write configuration cache {path}: {source}")]
  CacheWrite {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The configuration could not be serialized.
  #[error("failed to serialize configuration: {0}")]
  Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SetupError>;
