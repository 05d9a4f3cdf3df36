//! Fixed loader identity and default locations

use hat_types::Version;

/// Reserved dependency name that refers to the loader itself
pub const LOADER_NAME: &str = "HAT";

/// Version of the running loader
pub const LOADER_VERSION: Version = Version::new(1, 1, 1, 0);

pub const MODS_DIR: &str = "Mods";
pub const PRIORITY_LIST_FILE: &str = "priority.txt";
pub const CANDIDATES_FILE: &str = "mods.toml";

/// Written when the priority list does not exist yet
pub const DEFAULT_PRIORITY_LIST: &str = "\
# List mod names here, one per line, to prefer them when several
# copies of the same mod are installed. Earlier lines win.
# Pin a single copy with Name@Version, e.g. FezCore@1.2
";
