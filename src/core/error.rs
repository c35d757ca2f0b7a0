use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The link is not recognizably from the platform.
    #[error("not a recognized platform link: {0}")]
    InvalidLink(String),

    /// The link is from the platform but does not carry a record id.
    #[error("link does not contain an idea id: {0}")]
    MalformedLink(String),

    /// An error occurred during an HTTP request (connect, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// An outbound fetch returned an unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The backend endpoint or key could not be found in the public client bundle.
    #[error("platform config discovery failed: {0}")]
    ConfigDiscovery(String),

    /// The data API rejected a query made with the cached config.
    #[error("upstream query rejected with status {status} at {url}")]
    UpstreamQuery {
        /// The HTTP status code.
        status: u16,
        /// The query URL, without credentials.
        url: String,
    },

    /// The data API answered, but no public record matches the id.
    #[error("no record found for id {id}")]
    RecordNotFound {
        /// The record id taken from the link.
        id: String,
    },

    /// Neither metadata nor body markup yielded a title, description or image.
    #[error("no extractable content in page")]
    NoExtractableContent,

    /// The data received was in an unexpected format.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),
}

impl ImportError {
    /// True for transport failures and non-2xx responses from a plain fetch.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, ImportError::Http(_) | ImportError::Status { .. })
    }

    /// True when the caller's input, not the remote side, is at fault.
    pub fn is_link_error(&self) -> bool {
        matches!(
            self,
            ImportError::InvalidLink(_) | ImportError::MalformedLink(_)
        )
    }

    /// HTTP status the import endpoint answers with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ImportError::InvalidLink(_) | ImportError::MalformedLink(_) => 400,
            ImportError::RecordNotFound { .. } | ImportError::NoExtractableContent => 404,
            _ => 500,
        }
    }

    /// Machine-readable code for the response envelope.
    pub fn code(&self) -> &'static str {
        if self.is_link_error() {
            "INVALID_LINK"
        } else {
            "IMPORT_FAILED"
        }
    }

    /// Message safe to show to the person pasting the link.
    pub fn user_message(&self) -> &'static str {
        match self {
            ImportError::InvalidLink(_) => "Please provide a valid Idestrim link.",
            ImportError::MalformedLink(_) => {
                "Invalid link format. Expected: idestrim.site/idea/[id]"
            }
            ImportError::ConfigDiscovery(_) => {
                "Could not connect to Idestrim. Please try again later."
            }
            ImportError::UpstreamQuery { .. } => {
                "Could not fetch post from Idestrim. Please try again later."
            }
            ImportError::RecordNotFound { .. } => {
                "Post not found. Make sure the link is correct and the post is public."
            }
            ImportError::NoExtractableContent => {
                "Could not extract post data. Please check the link."
            }
            ImportError::Http(_) | ImportError::Status { .. } => {
                "Could not reach the linked page. Please try again later."
            }
            ImportError::Url(_) | ImportError::Data(_) => "Failed to import.",
        }
    }
}
