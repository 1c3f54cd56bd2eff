//! Fetch error types.

/// Reasons a single retrieval attempt can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
  /// The URL was rejected before any request was made.
  #[error("invalid url {url}: {message}")]
  InvalidUrl { url: String, message: String },

  /// The server answered with a non-success status.
  #[error("unexpected HTTP status {status} from {url}")]
  Status { url: String, status: u16 },

  /// No complete response arrived within the timeout.
  #[error("request to {url} timed out")]
  Timeout { url: String },

  /// DNS resolution or TCP/TLS connection failed.
  #[error("could not connect to {url}: {message}")]
  Connect { url: String, message: String },

  /// Any other transport failure, including a truncated body.
  #[error("transport error for {url}: {message}")]
  Transport { url: String, message: String },

  /// The HTTP client itself could not be constructed.
  #[error("failed to build http client: {message}")]
  Client { message: String },
}

impl FetchError {
  pub(crate) fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
    let url = url.to_string();
    if err.is_timeout() {
      Self::Timeout { url }
    } else if err.is_connect() {
      Self::Connect {
        url,
        message: err.to_string(),
      }
    } else if err.is_builder() {
      Self::InvalidUrl {
        url,
        message: err.to_string(),
      }
    } else if let Some(status) = err.status() {
      Self::Status {
        url,
        status: status.as_u16(),
      }
    } else {
      Self::Transport {
        url,
        message: err.to_string(),
      }
    }
  }
}
