mod config;
mod error;
mod models;
mod store;

pub use config::{FileStoreConfig, STORE_PATH_ENV};
pub use error::{FileDaoError, FileResult};
pub use store::FileGameStore;

use crate::dao::storage::StorageError;

impl From<FileDaoError> for StorageError {
    fn from(err: FileDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
