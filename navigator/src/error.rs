use releases::ReleaseError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for navigator operations
pub type Result<T> = std::result::Result<T, NavigatorError>;

/// Errors raised by the filter, outline and configuration layers
#[derive(Debug, Error)]
pub enum NavigatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Stored preference '{key}' could not be written: {message}")]
    Preference { key: String, message: String },

    #[error(transparent)]
    Release(#[from] ReleaseError),

    #[error("{0}: {1}")]
    WithContext(String, Box<NavigatorError>),
}

impl NavigatorError {
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(err) => format!("File operation failed: {err}"),
            Self::ConfigNotFound { path } => {
                format!("Configuration file not found at {}", path.display())
            }
            Self::ConfigParse(err) => format!("Configuration is not valid TOML: {err}"),
            Self::InvalidConfig { message } => format!("Invalid configuration: {message}"),
            Self::Url(err) => format!("Invalid URL: {err}"),
            Self::Preference { key, message } => {
                format!("Could not save preference '{key}': {message}")
            }
            Self::Release(err) => err.user_message(),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
        }
    }
}

pub trait ResultExt<T, E> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: Into<NavigatorError>,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let nav_err: NavigatorError = err.into();
            nav_err.with_context(context())
        })
    }
}
