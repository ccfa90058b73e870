//! Implementation of the `gprsetup build` command.
//!
//! Configures the project on first use (or with `--reconfigure`), then runs
//! gprbuild once per library kind.

use anyhow::{Context, Result};

use gprsetup_lib::library;
use gprsetup_lib::{BuildOptions, Outcome, Project};

use crate::output::{count_noun, print_stat, print_success};

pub fn cmd_build(project: &Project, options: &BuildOptions) -> Result<()> {
  let outcome = project
    .build(options)
    .with_context(|| format!("Failed to build {}", project.name))?;

  if let Outcome::Completed { invocations } = outcome {
    print_success(&format!("Built {} ({})", project.name, count_noun(invocations, "variant")));

    if let Some(config) = project.cached_configuration() {
      print_stat("Version", config.version().unwrap_or("unknown"));
      print_stat("Build mode", config.build_mode().unwrap_or("unknown"));
      print_stat("Libraries", &library::join(&config.library_types));
    }
  }

  Ok(())
}
