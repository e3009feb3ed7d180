//! Error type for photom applications.

use std::{
    error::Error,
    fmt::{Debug, Display, Formatter},
};

/// Application level error for photom.
///
/// Carries a human readable message describing what the program was doing
/// when the failure happened, plus the underlying cause if there is one.
#[derive(Debug)]
pub struct PhotomError {
    message: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl Display for PhotomError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(cause) => write!(f, "Error: {}, caused by {}", self.message, cause),
            None => write!(f, "Error: {}", self.message),
        }
    }
}

impl Error for PhotomError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn Error + 'static))
    }
}

impl PhotomError {
    /// Creates a new PhotomError.
    pub fn new<S>(message: S, source: Option<Box<dyn Error + Send + Sync>>) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            source,
        }
    }

    /// Creates a new PhotomError from a std::io::Error.
    pub fn from_io_error<S>(err: std::io::Error, message: S) -> Self
    where
        S: Into<String>,
    {
        Self::new(message, Some(Box::new(err)))
    }

    /// Returns the message of the error without its cause.
    pub fn message(&self) -> &str { &self.message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = PhotomError::from_io_error(io, "Failed to read scene.toml");
        assert_eq!(
            err.to_string(),
            "Error: Failed to read scene.toml, caused by no such file"
        );
        assert!(err.source().is_some());
        assert_eq!(err.message(), "Failed to read scene.toml");
    }

    #[test]
    fn display_without_cause() {
        let err = PhotomError::new("Unknown material", None);
        assert_eq!(err.to_string(), "Error: Unknown material");
        assert!(err.source().is_none());
    }
}
