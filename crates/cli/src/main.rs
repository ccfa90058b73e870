mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gprsetup_lib::gpr::project_name;
use gprsetup_lib::{BuildFlags, BuildOptions, InstallOptions, Project, ToolchainOptions};

use crate::cmd::{cmd_build, cmd_clean, cmd_install, cmd_uninstall};
use crate::output::print_error;

/// Configure, build and install a GPR library project
#[derive(Parser)]
#[command(name = "gprsetup")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Directory holding the project file
  #[arg(long, global = true, default_value = ".")]
  source_dir: PathBuf,

  /// Project file, relative to the source directory (default: gnatcoll_lzma.gpr)
  #[arg(long, global = true)]
  project: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Configure if needed, then build every library kind
  Build(BuildArgs),

  /// Clean every library kind
  Clean {
    /// Arguments passed to gprclean (after `--`)
    #[arg(last = true)]
    gpr_opts: Vec<String>,
  },

  /// Install every library kind
  Install(InstallArgs),

  /// Remove a previous installation
  Uninstall(InstallArgs),
}

#[derive(Args)]
struct BuildArgs {
  /// Disable build of shared libraries
  #[arg(long = "disable-shared", action = ArgAction::SetFalse)]
  enable_shared: bool,

  /// Build project in debug mode
  #[arg(long)]
  debug: bool,

  /// gprbuild parallelism
  #[arg(short, long, default_value_t = 0)]
  jobs: u32,

  /// Ignore previous setup results
  #[arg(long)]
  reconfigure: bool,

  /// Target triplet (default: reported by gcc -dumpmachine)
  #[arg(long)]
  target: Option<String>,

  /// Installation prefix, or `auto` for the compiler's prefix
  #[arg(long, default_value = "auto")]
  prefix: String,

  /// Install in a target specific subdirectory of the prefix
  #[arg(long)]
  integrated: bool,

  /// Arguments passed to gprbuild (after `--`)
  #[arg(last = true)]
  gpr_opts: Vec<String>,
}

#[derive(Args)]
struct InstallArgs {
  /// Installation prefix (default: the configured one)
  #[arg(long)]
  prefix: Option<PathBuf>,

  /// Arguments passed to gprinstall (after `--`)
  #[arg(last = true)]
  gpr_opts: Vec<String>,
}

impl From<BuildArgs> for BuildOptions {
  fn from(args: BuildArgs) -> Self {
    let prefix = match args.prefix.as_str() {
      "auto" => None,
      other => Some(PathBuf::from(other)),
    };

    BuildOptions {
      flags: BuildFlags {
        enable_shared: args.enable_shared,
        debug: args.debug,
      },
      reconfigure: args.reconfigure,
      toolchain: ToolchainOptions {
        target: args.target,
        prefix,
        jobs: args.jobs,
        integrated: args.integrated,
      },
      gpr_opts: args.gpr_opts,
    }
  }
}

impl From<InstallArgs> for InstallOptions {
  fn from(args: InstallArgs) -> Self {
    InstallOptions {
      prefix: args.prefix,
      gpr_opts: args.gpr_opts,
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

/// Log to stderr, message only. `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .with_target(false)
    .with_level(false)
    .init();
}

fn run(cli: Cli) -> Result<()> {
  let project = load_project(&cli)?;

  match cli.command {
    Commands::Build(args) => cmd_build(&project, &args.into()),
    Commands::Clean { gpr_opts } => cmd_clean(&project, &gpr_opts),
    Commands::Install(args) => cmd_install(&project, &args.into()),
    Commands::Uninstall(args) => cmd_uninstall(&project, &args.into()),
  }
}

/// The object directory is the working directory.
fn load_project(cli: &Cli) -> Result<Project> {
  let source_dir = dunce::canonicalize(&cli.source_dir)
    .with_context(|| format!("Source directory not found: {}", cli.source_dir.display()))?;
  let cwd = std::env::current_dir().context("Failed to determine working directory")?;
  let object_dir = dunce::canonicalize(&cwd).unwrap_or(cwd);

  let mut project = Project::gnatcoll_lzma(source_dir, object_dir);
  if let Some(project_file) = &cli.project {
    project.name = project_name(project_file).to_string();
    project.project_file = project_file.clone();
  }

  Ok(project)
}
