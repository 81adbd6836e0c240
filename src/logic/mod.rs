pub mod aggregation;
pub mod analysis_service;
pub mod calculations;
pub mod imagery;

pub use analysis_service::AnalysisService;
