use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HovertipError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Settings file not found: {}", .0.display())]
    SettingsNotFound(PathBuf),

    #[error("Unknown game system: {0}")]
    UnknownSystem(String),
}

pub type Result<T> = std::result::Result<T, HovertipError>;
