pub mod classification;
pub mod daily_summary;
pub mod geocoding;
pub mod query;
pub mod raw_day;
pub mod response;
