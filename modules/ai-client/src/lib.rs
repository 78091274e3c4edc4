pub mod claude;
pub mod traits;

pub use claude::Claude;
pub use traits::VerdictModel;
