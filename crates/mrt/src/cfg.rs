//! Generator configuration and tolerance defaults.
//!
//! Policy
//! - Defaults are fixed constants; callers override fields on `GeneratorCfg`
//!   rather than threading loose numbers through call sites.

/// Absolute elementwise tolerance for "same geometry" checks.
pub const DEFAULT_ATOL: f64 = 1e-6;
/// Transform applications allowed before a degenerate candidate is accepted.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
/// Edge length of each unit cube.
pub const DEFAULT_CUBE_SIZE: f64 = 1.0;

/// Knobs for one generation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorCfg {
    pub cube_size: f64,
    /// Values below 1 behave as 1: the transform is always applied at least once.
    pub max_attempts: u32,
    pub atol: f64,
}

impl Default for GeneratorCfg {
    fn default() -> Self {
        Self {
            cube_size: DEFAULT_CUBE_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            atol: DEFAULT_ATOL,
        }
    }
}
