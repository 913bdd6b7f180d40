pub mod funnel;
pub mod performance;
pub mod rates;
pub mod trend;
pub mod types;

pub use funnel::{analyze_funnel, application_funnel};
pub use performance::{score_job, score_jobs, top_performing, underperforming};
pub use rates::{growth, growth_rate, ratio_percent};
pub use trend::{bucket_by_day, bucket_by_width, trend_for};
pub use types::*;
