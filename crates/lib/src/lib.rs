//! gprsetup-lib: configuration and variant planning for GPR library projects
//!
//! This crate provides the pieces the `gprsetup` command is built from:
//! - `planner`: derives the build configuration from user flags and plans
//!   one build variant per library kind
//! - `config`: the configuration record and its `setup.json` cache
//! - `toolchain`: program lookup and target/prefix probing
//! - `gpr`: gprbuild, gprclean and gprinstall command lines
//! - `project`: the build, clean, install and uninstall flows

pub mod config;
pub mod consts;
pub mod error;
pub mod gpr;
pub mod library;
pub mod planner;
pub mod project;
pub mod toolchain;

pub use config::BuildConfiguration;
pub use error::{Result, SetupError};
pub use library::LibraryType;
pub use planner::{
  BuildFlags, BuildMode, BuildVariant, CommandKind, derive_configuration, plan_variants,
};
pub use project::{BuildOptions, InstallOptions, Outcome, Project, ToolchainOptions};
