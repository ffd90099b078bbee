//! Error types for the pixoo control library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the cloud directory or a device.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a usable HTTP response.
    #[error("{operation}: network error: {source}")]
    Network {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// The cloud or the device answered with a non-zero status code.
    #[error("{operation} failed with code {code}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Protocol {
        operation: String,
        code: i64,
        message: Option<String>,
    },

    /// A parameter was rejected before anything was sent.
    #[error("invalid {parameter}: {reason}")]
    Validation {
        parameter: &'static str,
        reason: String,
    },

    /// The response body was not the JSON we expected.
    #[error("{operation}: malformed response: {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    /// Image or GIF decoding error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    pub(crate) fn validation(parameter: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            parameter,
            reason: reason.into(),
        }
    }

    /// The status code carried by a [`Error::Protocol`] error.
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Protocol { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

/// Checks that `value` lies inside `range`, naming `parameter` on failure.
pub(crate) fn ensure_range<T>(
    parameter: &'static str,
    value: T,
    range: std::ops::RangeInclusive<T>,
) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(Error::validation(
            parameter,
            format!(
                "{} is outside {}..={}",
                value,
                range.start(),
                range.end()
            ),
        ))
    }
}
