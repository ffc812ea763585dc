//! Error types for the Etherpad API client

use thiserror::Error;

/// Errors that can occur when talking to an Etherpad server
#[derive(Debug, Error)]
pub enum EtherpadError {
    /// Wire code 1: a parameter was missing or malformed
    #[error("Incorrect parameters to API call: [{message}]")]
    InvalidParameters { message: String },

    /// Wire code 2: the server failed while handling the call
    #[error("Internal error with etherpad: [{message}]")]
    InternalServerError { message: String },

    /// Wire code 3: the server does not know the function
    #[error("Function does not exist: [{message}]")]
    UnknownFunction { message: String },

    /// Wire code 4: the API key was rejected
    #[error("Incorrect Etherpad API key: [{message}]")]
    InvalidApiKey { message: String },

    /// Any wire code outside 0..=4
    #[error("Unexpected response code {code}: [{message}]")]
    UnexpectedCode { code: i64, message: String },

    /// A local precondition failed before any request was sent
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Transport failure, including request timeouts
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The body was not a valid response envelope, or `data` had the wrong shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EtherpadError {
    /// Build the error for a non-zero wire code.
    pub fn from_wire(code: i64, message: Option<String>) -> Self {
        let message = message.unwrap_or_default();
        match code {
            1 => Self::InvalidParameters { message },
            2 => Self::InternalServerError { message },
            3 => Self::UnknownFunction { message },
            4 => Self::InvalidApiKey { message },
            code => Self::UnexpectedCode { code, message },
        }
    }

    /// The wire code that produced this error, if it came from the server.
    pub fn wire_code(&self) -> Option<i64> {
        match self {
            Self::InvalidParameters { .. } => Some(1),
            Self::InternalServerError { .. } => Some(2),
            Self::UnknownFunction { .. } => Some(3),
            Self::InvalidApiKey { .. } => Some(4),
            Self::UnexpectedCode { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The message the server sent along with a failing wire code.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::InvalidParameters { message }
            | Self::InternalServerError { message }
            | Self::UnknownFunction { message }
            | Self::InvalidApiKey { message }
            | Self::UnexpectedCode { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type for Etherpad client operations
pub type Result<T> = std::result::Result<T, EtherpadError>;
