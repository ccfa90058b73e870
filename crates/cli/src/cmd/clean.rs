use anyhow::{Context, Result};

use gprsetup_lib::{Outcome, Project};

use crate::output::{count_noun, print_success};

pub fn cmd_clean(project: &Project, gpr_opts: &[String]) -> Result<()> {
  let outcome = project
    .clean(gpr_opts)
    .with_context(|| format!("Failed to clean {}", project.name))?;

  if let Outcome::Completed { invocations } = outcome {
    print_success(&format!("Cleaned {} ({})", project.name, count_noun(invocations, "variant")));
  }

  Ok(())
}
