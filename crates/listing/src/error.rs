//! Errors raised by the client-side listing helpers.
//!
//! Backend failures have their own type, [`BackendError`], because the
//! controller treats them as data (they are logged and swallowed) rather than
//! as failures of the caller.
//!
//!  [`BackendError`]: crate::backend::BackendError
use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub type Result<T> = std::result::Result<T, ListingError>;
