use thiserror::Error;

/// Failure while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable `{0}` is not set")]
    MissingVar(&'static str),

    #[error("environment variable `{0}` is empty")]
    EmptyVar(&'static str),

    #[error(
        "no token verification key configured (set JWT_SECRET, JWT_PUBLIC_KEY_PEM or JWT_PUBLIC_KEY_FILE)"
    )]
    MissingKey,

    #[error("invalid token verification key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),

    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
