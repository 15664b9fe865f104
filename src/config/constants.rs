//! Constants for bundleforge

/// Default project config file, looked up relative to the project root
pub const CONFIG_FILE: &str = "bundle.config.json";

/// Project manifest read for the start-up banner
pub const PACKAGE_JSON: &str = "package.json";

/// Library entry point
pub const ENTRY_POINT: &str = "src/main.js";

/// Distribution directory holding the four bundles
pub const DIST_DIR: &str = "dist";

/// Scratch directory cleaned before every `build`
pub const TEMP_DIR: &str = "build/temp";

/// File stem shared by all bundle file names
pub const FILE_STEM: &str = "main";

/// Global name the universal bundle exports under
pub const EXPORT_NAME: &str = "main_module";

/// Locally installed rollup binary
pub const LOCAL_ROLLUP_BIN: &str = "node_modules/.bin/rollup";

/// Fallback when no local rollup is installed
pub const ROLLUP_BIN: &str = "rollup";

/// Quiet period before a watcher rebuilds
pub const WATCH_DEBOUNCE_MS: u64 = 200;

/// Sources the downlevel transform leaves alone
pub const BABEL_EXCLUDE: &str = "node_modules/**";
