#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/broome/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod summary;
pub mod telemetry;

pub use export::{
    ExportError, ExportFormat, export_daily_records, export_instructions, instructions_csv,
};
pub use summary::RebalanceSummary;
pub use telemetry::DailyRecord;
