//! Service layer
//!
//! External collaborators wrapped behind small adapters.

pub mod storage;

pub use storage::{MediaStorage, StoredFile, ValidatedImage};
