// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur in filesystem operations.
///
/// Every variant carries the path (segments joined with `/`) or entry name
/// that the failing operation was attempting, so callers can match on the
/// kind and still report context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("path '{0}' does not exist")]
    NotFound(String),

    #[error("entry already exists: {0}")]
    AlreadyExists(String),

    /// A file sits where a directory is required, or the reverse.
    #[error("path is invalid: {0}")]
    InvalidPath(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Stable discriminant of an [`Error`], independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidPath,
    Serialization,
}

impl Error {
    pub fn not_found<S: AsRef<str>>(path: S) -> Self {
        Error::NotFound(path.as_ref().to_string())
    }

    pub fn already_exists<S: AsRef<str>>(path: S) -> Self {
        Error::AlreadyExists(path.as_ref().to_string())
    }

    pub fn invalid_path<S: AsRef<str>>(path: S) -> Self {
        Error::InvalidPath(path.as_ref().to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Error::InvalidPath(_) => ErrorKind::InvalidPath,
            Error::Serialization(_) => ErrorKind::Serialization,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Replaces the payload with `path`, keeping the kind. Serialization
    /// errors keep their message.
    pub(crate) fn at_path<S: AsRef<str>>(self, path: S) -> Self {
        match self {
            Error::NotFound(_) => Error::not_found(path),
            Error::AlreadyExists(_) => Error::already_exists(path),
            Error::InvalidPath(_) => Error::invalid_path(path),
            other @ Error::Serialization(_) => other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_matches_by_kind() {
        let a = Error::not_found("a/b");
        let b = Error::not_found("x");
        assert_ne!(a, b);
        assert_eq!(a.kind(), b.kind());
        assert!(a.is_not_found());
        assert!(!Error::already_exists("a").is_not_found());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::not_found("a/b/c").to_string(),
            "path 'a/b/c' does not exist"
        );
        assert_eq!(
            Error::already_exists("dir").to_string(),
            "entry already exists: dir"
        );
        assert_eq!(
            Error::invalid_path("a/f/x").to_string(),
            "path is invalid: a/f/x"
        );
    }

    #[test]
    fn test_at_path_keeps_kind() {
        let err = Error::already_exists("c").at_path("a/b/c");
        assert_eq!(err, Error::already_exists("a/b/c"));

        let err = Error::Serialization("boom".into()).at_path("ignored");
        assert_eq!(err, Error::Serialization("boom".into()));
    }
}
