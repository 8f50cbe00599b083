/// Smallest radix a share value may be encoded in.
pub const MIN_BASE: u32 = 2;

/// Largest radix a share value may be encoded in (`0-9` then `a-z`).
pub const MAX_BASE: u32 = 36;

/// Default absolute tolerance used when cross-validating shares against the
/// reconstructed polynomial. With exact arithmetic a consistent share differs
/// by exactly zero.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Directory searched for `conf.toml` when none is given on the command line.
pub const DEFAULT_CONFIG_DIR: &str = ".polysecret";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "conf.toml";

/// Prefix for configuration overrides taken from the environment,
/// e.g. `POLYSECRET_TOLERANCE=0.5`.
pub const ENV_PREFIX: &str = "POLYSECRET";
