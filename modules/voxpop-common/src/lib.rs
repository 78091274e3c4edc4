pub mod types;
pub mod safety;
pub mod keywords;
pub mod patterns;
pub mod scoring;
pub mod config;
pub mod error;

pub use types::*;
pub use safety::*;
pub use keywords::extract_keywords;
pub use patterns::detect_patterns;
pub use scoring::*;
pub use config::Config;
pub use error::VoxpopError;
