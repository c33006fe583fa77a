//! mxc storage library
//!
//! The storage collaborator the upload endpoint hands validated requests to.
//! It defines the [`MediaStore`] trait and a local filesystem backend.
//!
//! # Storage key format
//!
//! Media is scoped by origin: `{origin}/{media_id}` holds the bytes and
//! `{origin}/{media_id}.json` the recorded upload metadata. Keys never
//! contain `..` or a path separator inside a component; key generation is
//! centralized in the `keys` module.

pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{ByteStream, MediaStore, StorageError, StorageResult, StoredMedia};
