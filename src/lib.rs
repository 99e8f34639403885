pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod report;
pub mod resolver;

pub use catalog::Catalog;
pub use config::Config;
pub use model::{Affected, Entry, Finding, Range, RangeEvent, Report, Symbol};
pub use resolver::{fix_status, latest_fixed, package_path, FixStatus};
