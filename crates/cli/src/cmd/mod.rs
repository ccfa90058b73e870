mod build;
mod clean;
mod install;
mod uninstall;

pub use build::cmd_build;
pub use clean::cmd_clean;
pub use install::cmd_install;
pub use uninstall::cmd_uninstall;
