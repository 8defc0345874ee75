pub mod aggregation;
pub mod reports;

pub use reports::ReportService;
