use thiserror::Error;

use crate::core::types::CharacterHandle;

#[derive(Error, Debug)]
pub enum LoadoutError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterHandle),

    #[error("Invalid character profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    #[error("Failed to apply equipment: {0}")]
    ApplyFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoadoutError>;
