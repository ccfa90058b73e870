//! Names shared between the configuration, planning and command layers.

/// Name of the configuration cache written to the object directory.
pub const CACHE_FILENAME: &str = "setup.json";

/// Version file, looked up one level above the project source directory.
pub const VERSION_FILENAME: &str = "version_information";

pub const VERSION_VAR: &str = "VERSION";
pub const BUILD_VAR: &str = "BUILD";
pub const LIBRARY_TYPE_VAR: &str = "LIBRARY_TYPE";
pub const GPR_BUILD_VAR: &str = "GPR_BUILD";

/// Width of the label column in informational log lines.
pub const LABEL_WIDTH: usize = 26;
