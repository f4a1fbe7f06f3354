pub mod day_fetcher;
pub mod error;
pub mod rate_limiter;
