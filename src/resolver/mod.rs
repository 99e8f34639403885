//! Pure resolution routines over advisory data and call-graph symbols.
//!
//! - [`latest_fixed`] / [`fix_status`] - the newest version remediating a module
//! - [`package_path`] - the package that declares a call-graph symbol
//! - [`version`] - loose semver precedence used by both

mod fixed;
mod symbol;
pub mod version;

pub use fixed::{fix_status, latest_fixed, FixStatus};
pub use symbol::package_path;
