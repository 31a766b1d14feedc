use thiserror::Error;

/// Which API call produced an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListStargazers,
    ListIssues,
    CloseIssue,
    LockIssue,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ListStargazers => "get stargazers",
            Operation::ListIssues => "get issues",
            Operation::CloseIssue => "close issue",
            Operation::LockIssue => "lock issue",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A response whose status did not match the one expected for the operation.
#[derive(Debug, Error, PartialEq)]
#[error("Error {operation} (HTTP {status}): {body}")]
pub struct ApiError {
    pub operation: Operation,
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request never produced a response.
    #[error("Error {operation}: {message}")]
    Transport {
        operation: Operation,
        message: String,
    },

    #[error("Error {operation}: unexpected response body: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// The HTTP status of the failing response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Turns a response into an error unless its status is `expected`.
pub fn expect_status(
    operation: Operation,
    expected: u16,
    status: u16,
    body: &str,
) -> std::result::Result<(), ApiError> {
    if status == expected {
        Ok(())
    } else {
        Err(ApiError {
            operation,
            status,
            body: body.to_string(),
        })
    }
}
