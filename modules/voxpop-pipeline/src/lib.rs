pub mod analysis;
pub mod consensus;
pub mod discovery;
pub mod pipeline;
pub mod rate_limit;
pub mod report;
pub mod traits;
pub mod validation;

pub use pipeline::Pipeline;
pub use rate_limit::RateLimiter;
pub use report::ValidationReport;
