use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid catalog endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("page index {index} is outside the paginator (0..{page_count})")]
    PageOutOfRange { index: usize, page_count: usize },
    #[error("not a row count: {0:?}")]
    InvalidCount(String),
    #[error("bulk select aborted while fetching page {page}: {source}")]
    BulkFetch {
        page: usize,
        #[source]
        source: Box<BrowseError>,
    },
}

impl BrowseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BrowseError::Http(err) => match err.status() {
                Some(status) => ErrorCode::from_status(status.as_u16()),
                None if err.is_decode() => ErrorCode::Upstream,
                None => ErrorCode::Transport,
            },
            BrowseError::InvalidEndpoint(_) => ErrorCode::Internal,
            BrowseError::PageOutOfRange { .. } | BrowseError::InvalidCount(_) => {
                ErrorCode::Validation
            }
            BrowseError::BulkFetch { source, .. } => source.code(),
        }
    }

    /// Display classification for the status line.
    pub fn to_api_error(&self) -> ApiError {
        ApiError::new(self.code(), self.to_string())
    }
}
