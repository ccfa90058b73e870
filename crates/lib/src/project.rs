//! Project descriptor and the build, clean, install and uninstall flows.
//!
//! `build` is the only flow that configures: it probes the toolchain, derives
//! the configuration and caches it in the object directory. The other flows
//! only ever read that cache and report [`Outcome::NotConfigured`] without it.

use std::path::PathBuf;

use tracing::info;

use crate::config::BuildConfiguration;
use crate::consts::LABEL_WIDTH;
use crate::error::Result;
use crate::gpr::GprInvocation;
use crate::planner::{
  BuildFlags, CommandKind, derive_configuration, plan_variants, version_file_path,
};
use crate::toolchain;

/// A GPR library project driven by this tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
  /// Short name used in messages.
  pub name: String,
  /// Project file, relative to `source_dir`.
  pub project_file: String,
  /// Absolute directory holding the project file.
  pub source_dir: PathBuf,
  /// Absolute directory the tools run from.
  pub object_dir: PathBuf,
}

/// How the toolchain dependent part of the configuration is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainOptions {
  /// Target triplet; the host compiler's when `None`.
  pub target: Option<String>,
  /// Installation prefix; the compiler's prefix when `None`.
  pub prefix: Option<PathBuf>,
  pub jobs: u32,
  pub integrated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
  pub flags: BuildFlags,
  /// Ignore a previously cached configuration.
  pub reconfigure: bool,
  pub toolchain: ToolchainOptions,
  /// Extra arguments forwarded to gprbuild.
  pub gpr_opts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOptions {
  /// Overrides the cached installation prefix.
  pub prefix: Option<PathBuf>,
  /// Extra arguments forwarded to gprinstall.
  pub gpr_opts: Vec<String>,
}

/// Result of running one of the project flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// There is no configuration to act on yet.
  NotConfigured,
  /// All tool invocations succeeded.
  Completed { invocations: usize },
}

impl Project {
  pub fn new(
    name: impl Into<String>,
    project_file: impl Into<String>,
    source_dir: impl Into<PathBuf>,
    object_dir: impl Into<PathBuf>,
  ) -> Self {
    Self {
      name: name.into(),
      project_file: project_file.into(),
      source_dir: source_dir.into(),
      object_dir: object_dir.into(),
    }
  }

  /// The GNATColl LZMA bindings.
  pub fn gnatcoll_lzma(source_dir: impl Into<PathBuf>, object_dir: impl Into<PathBuf>) -> Self {
    Self::new("gnatcoll_lzma", "gnatcoll_lzma.gpr", source_dir, object_dir)
  }

  pub fn version_file(&self) -> PathBuf {
    version_file_path(&self.source_dir)
  }

  /// The configuration cached by a previous `build`, if any.
  pub fn cached_configuration(&self) -> Option<BuildConfiguration> {
    BuildConfiguration::load_cached(&self.source_dir, &self.object_dir)
  }

  /// Probe the toolchain and derive a fresh configuration.
  pub fn configure(&self, options: &BuildOptions) -> Result<BuildConfiguration> {
    let mut base = BuildConfiguration::new(&self.source_dir, &self.object_dir);
    probe_toolchain(&mut base, &options.toolchain)?;
    derive_configuration(base, &options.flags, &self.version_file())
  }

  /// Build every planned variant, configuring first when needed.
  pub fn build(&self, options: &BuildOptions) -> Result<Outcome> {
    let cached = if options.reconfigure {
      None
    } else {
      self.cached_configuration()
    };

    let config = match cached {
      Some(config) => {
        let cache = BuildConfiguration::cache_path(&self.object_dir);
        info!("{:<width$} {}", "Using configuration", cache.display(), width = LABEL_WIDTH);
        config
      }
      None => {
        let config = self.configure(options)?;
        config.save()?;
        config
      }
    };

    let mut extra_tail = options.gpr_opts.clone();
    extra_tail.push("-gargs".to_string());

    self.run_variants(&config, CommandKind::Build, &extra_tail)
  }

  /// Clean every planned variant.
  pub fn clean(&self, gpr_opts: &[String]) -> Result<Outcome> {
    let Some(config) = self.cached_configuration() else {
      info!("nothing to clean");
      return Ok(Outcome::NotConfigured);
    };

    self.run_variants(&config, CommandKind::Clean, gpr_opts)
  }

  /// Install every planned variant under its own build name.
  pub fn install(&self, options: &InstallOptions) -> Result<Outcome> {
    let Some(mut config) = self.cached_configuration() else {
      info!("nothing to install");
      return Ok(Outcome::NotConfigured);
    };
    if let Some(prefix) = &options.prefix {
      config.prefix = prefix.clone();
    }

    info!(
      "{:<width$} {}",
      "Installation directory",
      config.prefix.display(),
      width = LABEL_WIDTH
    );
    self.run_variants(&config, CommandKind::Install, &options.gpr_opts)
  }

  /// Remove a previous installation. gprinstall tracks the installed
  /// variants itself, so this is a single invocation.
  pub fn uninstall(&self, options: &InstallOptions) -> Result<Outcome> {
    let Some(mut config) = self.cached_configuration() else {
      info!("nothing to uninstall");
      return Ok(Outcome::NotConfigured);
    };
    if let Some(prefix) = &options.prefix {
      config.prefix = prefix.clone();
    }

    GprInvocation::compose(
      CommandKind::Uninstall,
      &self.project_file,
      &config,
      &options.gpr_opts,
      &Default::default(),
    )
    .run(&self.object_dir)?;

    Ok(Outcome::Completed { invocations: 1 })
  }

  fn run_variants(&self, config: &BuildConfiguration, command: CommandKind, extra_tail: &[String]) -> Result<Outcome> {
    let variants = plan_variants(config, command);

    for variant in &variants {
      let mut extra = variant.args.clone();
      extra.extend(extra_tail.iter().cloned());

      GprInvocation::compose(command, &self.project_file, config, &extra, &variant.vars).run(&self.object_dir)?;
    }

    Ok(Outcome::Completed {
      invocations: variants.len(),
    })
  }
}

/// Fill in the target, canonical target, prefix and build settings.
fn probe_toolchain(config: &mut BuildConfiguration, options: &ToolchainOptions) -> Result<()> {
  config.target = match &options.target {
    Some(target) => target.clone(),
    None => toolchain::host_target()?,
  };
  config.canonical_target = toolchain::canonical_target(&config.target)?;
  config.prefix = match &options.prefix {
    Some(prefix) => prefix.clone(),
    None => toolchain::default_prefix(&config.target)?,
  };
  config.jobs = options.jobs;
  config.integrated = options.integrated;
  Ok(())
}
