//! Core data types for advisories, call-graph symbols, and scan reports.
//!
//! - [`Entry`] - An OSV advisory
//! - [`Affected`] - The vulnerable version ranges of one module
//! - [`Range`] / [`RangeEvent`] - Ordered introduced/fixed windows
//! - [`Symbol`] - A function or method from a call graph
//! - [`Report`] - Findings produced by a scan
//!
//! # Example
//!
//! ```
//! use vulnfix::model::{Affected, Range, RangeEvent};
//!
//! let affected = Affected::new("example.com/module").with_range(Range::semver(vec![
//!     RangeEvent::new(Some("v1.0.0"), Some("v1.2.3")),
//! ]));
//!
//! assert_eq!(vulnfix::latest_fixed("example.com/module", &[affected]), "v1.2.3");
//! ```

mod advisory;
mod report;
mod symbol;

pub use advisory::*;
pub use report::*;
pub use symbol::*;
