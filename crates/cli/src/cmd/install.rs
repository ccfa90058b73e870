//! Implementation of the `gprsetup install` command.
//!
//! Installs each configured library kind under its own build name so that
//! users of the installed project can select it through `LIBRARY_TYPE`.

use anyhow::{Context, Result};

use gprsetup_lib::{InstallOptions, Outcome, Project};

use crate::output::{count_noun, print_info, print_success};

pub fn cmd_install(project: &Project, options: &InstallOptions) -> Result<()> {
  let outcome = project
    .install(options)
    .with_context(|| format!("Failed to install {}", project.name))?;

  match outcome {
    Outcome::NotConfigured => print_info("Run 'gprsetup build' before installing."),
    Outcome::Completed { invocations } => {
      print_success(&format!("Installed {} ({})", project.name, count_noun(invocations, "variant")));
    }
  }

  Ok(())
}
