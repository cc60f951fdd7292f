use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Release data error: {0}")]
    Release(#[from] releases::ReleaseError),

    #[error("Navigator error: {0}")]
    Navigator(#[from] navigator::NavigatorError),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Unknown version '{0}'")]
    UnknownVersion(String),

    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("{0}: {1}")]
    WithContext(String, Box<CliError>),
}

impl CliError {
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Io(err) => format!("I/O operation failed: {err}"),
            Self::Release(err) => err.user_message(),
            Self::Navigator(err) => err.user_message(),
            Self::Url(err) => format!("Invalid URL: {err}"),
            Self::UnknownVersion(version) => {
                format!("Version '{version}' does not appear in the release data")
            }
            Self::InvalidDate(raw) => {
                format!("Invalid date '{raw}', expected YYYY-MM-DD or an RFC 3339 timestamp")
            }
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

pub trait ResultExt<T, E> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: Into<CliError>,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let cli_err: CliError = err.into();
            cli_err.with_context(context())
        })
    }
}
