use crate::fetcher::error::FetcherError;
use crate::store::error::StoreError;
use thiserror::Error;

/// Hard failures of [`crate::WeatherService`].
///
/// Per-day fetch failures, unknown or ambiguous locations and invalid ranges are not
/// errors at this level; they are reported inside [`crate::WeatherServiceResponse`].
/// Frame and settings failures surface as [`crate::FrameError`] and
/// [`crate::SettingsError`] from their own calls.
#[derive(Debug, Error)]
pub enum WeatherServiceError {
    /// Reading or persisting summaries failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The HTTP client could not be constructed.
    #[error(transparent)]
    Fetcher(#[from] FetcherError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_store_error_is_transparent() {
        let store = StoreError::Write(
            "summaries.bin".into(),
            std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"),
        );
        let expected = store.to_string();
        let wrapped = WeatherServiceError::from(store);
        assert_eq!(wrapped.to_string(), expected);
        assert!(wrapped.source().is_some());
    }
}
