//! Operation-level error taxonomy.

use thiserror::Error;

use crate::godaddy::ApiError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "missing credentials: pass --key/--secret, set GODADDY_TOKEN/GODADDY_SECRET \
         (or GODADDY_API_KEY/GODADDY_API_SECRET), or run with --interactive"
    )]
    MissingCredentials,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The user declined a confirmation prompt.
    #[error("cancelled")]
    Cancelled,

    #[error("console error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// Process exit code for one-shot CLI runs. Declining a prompt is a
    /// user decision, not a failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cancelled => 0,
            Self::MissingField(_) => 1,
            Self::Io(_) | Self::Api(_) => 2,
            Self::MissingCredentials => 3,
        }
    }
}
