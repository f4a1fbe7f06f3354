pub mod daily_summary_frame;
pub mod error;
