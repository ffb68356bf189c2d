pub mod models;
pub mod services;
pub mod errors;
pub mod synth;
pub mod performance;
pub mod analytics;
pub mod source;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use synth::{RngSynthesizer, Synthesizer, enrich};
pub use analytics::AnalyticsReport;
pub use source::EmployeeSource;
