//! Domain error types. Plumbing code uses `anyhow`; these are the errors
//! callers inspect.

use thiserror::Error;

/// Errors raised while loading a passage pool.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PassageError {
    #[error("passage pool is empty")]
    EmptyPool,
    #[error("passage #{index} is blank")]
    BlankPassage { index: usize },
    #[error("bundled passage asset `{0}` is missing")]
    MissingAsset(&'static str),
    #[error("passage file is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised by [`crate::config::Config::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("`{field}` must be greater than zero")]
    ZeroTickRate { field: &'static str },
}
