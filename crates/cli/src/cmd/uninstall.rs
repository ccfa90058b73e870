use anyhow::{Context, Result};

use gprsetup_lib::{InstallOptions, Outcome, Project};

use crate::output::print_success;

pub fn cmd_uninstall(project: &Project, options: &InstallOptions) -> Result<()> {
  let outcome = project
    .uninstall(options)
    .with_context(|| format!("Failed to uninstall {}", project.name))?;

  if let Outcome::Completed { .. } = outcome {
    print_success(&format!("Uninstalled {}", project.name));
  }

  Ok(())
}
