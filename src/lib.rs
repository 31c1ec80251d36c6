pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod metrics;
pub mod portfolio;
pub mod property;
pub mod report;

pub use analysis::{analyze, analyze_parallel, build_property_report, PropertyReport, StrategyResult};
pub use error::{Error, Result};
pub use property::{GlobalParams, LeaseStrategy, PropertyInput};
