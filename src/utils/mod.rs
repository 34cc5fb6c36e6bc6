pub mod constants;
pub mod dates;
pub mod progress;

pub use constants::*;
pub use dates::{format_base_datetime, parse_flexible_date};
pub use progress::ProgressReporter;
