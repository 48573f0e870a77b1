use thiserror::Error;

#[derive(Error, Debug)]
pub enum NebulaError {
    /// Catalog request failed (network error or non-2xx response).
    #[error("{0}")]
    Remote(String),

    #[error("Card not found: {0}")]
    NotFound(String),

    #[error("Could not read saved progress: {0}")]
    StorageRead(String),

    #[error("Could not save progress: {0}")]
    StorageWrite(String),

    #[error("{0}")]
    Import(String),

    #[error("Could not render image: {0}")]
    Image(String),

    #[error("Catalog has not been loaded")]
    CatalogNotLoaded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl NebulaError {
    /// Storage failures never abort an operation; callers surface them as warnings.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            NebulaError::StorageRead(_) | NebulaError::StorageWrite(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NebulaError>;
