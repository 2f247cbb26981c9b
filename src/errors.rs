// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PopmenuError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("XDG directory error: {0}")]
    XdgError(#[from] xdg::BaseDirectoriesError),

    #[error("Invalid log directory '{path}': {message}")]
    LogDirError { path: String, message: String },

    #[error("Invalid log filter '{0}'")]
    LogFilterError(String),
}
