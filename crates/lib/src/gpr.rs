//! GPR tool invocations.
//!
//! Composes `gprbuild`, `gprclean` and `gprinstall` command lines from a
//! [`BuildConfiguration`] and runs them from the object directory.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::config::BuildConfiguration;
use crate::error::{Result, SetupError};
use crate::planner::CommandKind;
use crate::toolchain::find_program;

/// A fully composed GPR tool command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GprInvocation {
  program: &'static str,
  args: Vec<String>,
}

impl GprInvocation {
  /// Compose the command line for `command` on `project_file`.
  ///
  /// Argument order: tool specific switches, `extra`, the project (relocated
  /// for out of tree builds), the canonical target, then `-X` assignments for
  /// the configuration variables followed by the variant variables.
  pub fn compose(
    command: CommandKind,
    project_file: &str,
    config: &BuildConfiguration,
    extra: &[String],
    variant_vars: &BTreeMap<String, String>,
  ) -> Self {
    let prefix = config.install_prefix();
    let (program, mut args) = match command {
      CommandKind::Build => ("gprbuild", vec![format!("-j{}", config.jobs), "-p".to_string()]),
      CommandKind::Clean => ("gprclean", vec!["-q".to_string()]),
      CommandKind::Install => (
        "gprinstall",
        vec![
          "-p".to_string(),
          "-f".to_string(),
          format!("--prefix={}", prefix.display()),
          format!("--sources-subdir=include/{}", project_name(project_file)),
        ],
      ),
      CommandKind::Uninstall => (
        "gprinstall",
        vec![
          "-p".to_string(),
          "-f".to_string(),
          format!("--prefix={}", prefix.display()),
          "--uninstall".to_string(),
        ],
      ),
    };

    args.extend(extra.iter().cloned());

    if config.is_out_of_tree() {
      args.push(format!("-P{}", config.source_dir.join(project_file).display()));
      args.push("--relocate-build-tree".to_string());
    } else {
      args.push(format!("-P{}", project_file));
    }

    args.push(format!("--target={}", config.canonical_target));

    for (name, value) in config.gpr_vars.iter().chain(variant_vars) {
      args.push(format!("-X{}={}", name, value));
    }

    Self { program, args }
  }

  pub fn program(&self) -> &str {
    self.program
  }

  pub fn args(&self) -> &[String] {
    &self.args
  }

  /// Run the tool from `working_dir` and wait for it to finish.
  pub fn run(&self, working_dir: &Path) -> Result<()> {
    let path = find_program(self.program)?;
    info!("Launch: {} {}", path.display(), self.args.join(" "));
    debug!(working_dir = %working_dir.display(), "spawning process");

    let status = Command::new(&path)
      .args(&self.args)
      .current_dir(working_dir)
      .status()
      .map_err(|source| SetupError::Spawn {
        program: self.program.to_string(),
        source,
      })?;

    if !status.success() {
      return Err(SetupError::CommandFailed {
        program: self.program.to_string(),
        code: status.code(),
      });
    }

    Ok(())
  }
}

/// Project name used for the shared sources directory: the file name
/// without its `.gpr` extension.
pub fn project_name(project_file: &str) -> &str {
  project_file.strip_suffix(".gpr").unwrap_or(project_file)
}
