pub mod metrics;
pub mod record;

pub use metrics::*;
pub use record::*;
