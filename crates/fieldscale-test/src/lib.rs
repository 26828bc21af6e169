//! fieldscale-test - Regression test framework for Fieldscale
//!
//! Counts and reports comparisons the way a regression suite does,
//! so a single test can check many values and report every failure
//! at the end instead of stopping at the first one.
//!
//! - **Compare** (default): run all comparisons
//! - **Display**: also write intermediate images to `tests/regout`
//!
//! # Usage
//!
//! ```ignore
//! use fieldscale_test::RegParams;
//!
//! let mut rp = RegParams::new("rescale");
//! rp.compare_values(255.0, out as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // fieldscale-test is at crates/fieldscale-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
