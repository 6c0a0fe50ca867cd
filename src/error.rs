use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("could not prepare the database directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage is unavailable")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot is not a JSON object")]
    NotAnObject,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("malformed catalog document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} is missing from the catalog document")]
    MissingEntry(String),
}
