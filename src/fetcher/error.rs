use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetcherError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    // The upstream body is kept verbatim so callers can inspect the API's own error.
    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse JSON response from {0}")]
    JsonParse(String, #[source] serde_json::Error),

    #[error("Response from {url} was for {received}, requested {requested}")]
    DateMismatch {
        url: String,
        requested: NaiveDate,
        received: NaiveDate,
    },
}
