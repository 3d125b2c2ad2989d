use thiserror::Error;

/// Application-level errors using thiserror for structured error handling.
///
/// Every failure in the core is a rejected command: the session state is
/// left untouched and the error is surfaced to the caller. There is no
/// fatal error class.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error("No pitch types selected")]
    NoSelection,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComboError {
    #[error("Combination name cannot be empty")]
    EmptyName,

    #[error("No pitch types selected to save")]
    EmptySelection,

    #[error("No saved combination at index {0}")]
    IndexOutOfRange(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid category index: {0}")]
    InvalidCategory(usize),

    #[error("Invalid pitch index {pitch} in category '{category}'")]
    InvalidPitch { category: String, pitch: usize },
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to load pitch database from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save pitch database to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid pitch database: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum CueError {
    #[error("Failed to load cue audio file: {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to decode cue audio format")]
    DecodeFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to initialize audio output stream")]
    StreamInitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = SignError::NoSelection;
        assert_eq!(err.to_string(), "No pitch types selected");

        let err = ComboError::IndexOutOfRange(7);
        assert_eq!(err.to_string(), "No saved combination at index 7");

        let err = CatalogError::InvalidPitch {
            category: "Fastballs".to_string(),
            pitch: 9,
        };
        assert_eq!(
            err.to_string(),
            "Invalid pitch index 9 in category 'Fastballs'"
        );
    }

    #[test]
    fn test_error_source_chain() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let db_err = DatabaseError::LoadFailed {
            path: "/test/pitches.json".to_string(),
            source: Box::new(io_err),
        };

        assert!(db_err.source().is_some());
        assert_eq!(
            db_err.to_string(),
            "Failed to load pitch database from /test/pitches.json"
        );
    }
}
