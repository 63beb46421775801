pub mod report;

pub use report::{render_json, render_tables, ReportLimits, RunSummary};
