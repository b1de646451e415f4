//! Error types for the Homeroom core crate.

use thiserror::Error;

/// Top-level error type for all Homeroom operations.
#[derive(Debug, Error)]
pub enum HomeroomError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("roster error: {0}")]
    Roster(String),

    #[error("MDM error: {0}")]
    Mdm(String),

    #[error("sync state error: {0}")]
    State(String),
}

/// A convenience Result alias that defaults to [`HomeroomError`].
pub type Result<T> = std::result::Result<T, HomeroomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = HomeroomError::Config("missing field".into());
        assert_eq!(err.to_string(), "configuration error: missing field");
    }

    #[test]
    fn io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = HomeroomError::from(io_err);
        assert!(matches!(err, HomeroomError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn roster_error_display() {
        let err = HomeroomError::Roster("pull failed".into());
        assert_eq!(err.to_string(), "roster error: pull failed");
    }

    #[test]
    fn mdm_error_display() {
        let err = HomeroomError::Mdm("timeout".into());
        assert_eq!(err.to_string(), "MDM error: timeout");
    }

    #[test]
    fn result_alias_works() {
        let ok: Result<i32> = Ok(42);
        assert!(ok.is_ok());

        let err: Result<i32> = Err(HomeroomError::Config("bad".into()));
        assert!(err.is_err());
    }
}
