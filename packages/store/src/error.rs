//! Error type shared by the user store and the backend client.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Name is required")]
    EmptyName,

    #[error("No user named {0}")]
    NotFound(String),

    #[error("Datastore error: {0}")]
    Datastore(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
