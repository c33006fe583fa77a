//! Shared key generation for storage backends.
//!
//! Key format: `{origin}/{media_id}` for the media bytes and
//! `{origin}/{media_id}.json` for its recorded metadata.

use crate::traits::{StorageError, StorageResult};
use mxc_core::{MediaId, ServerName};
use uuid::Uuid;

/// Generate a fresh media id (32 lowercase hex characters).
pub fn generate_media_id() -> MediaId {
    MediaId::new(Uuid::new_v4().simple().to_string())
}

fn check_component(kind: &str, value: &str) -> StorageResult<()> {
    if value.is_empty()
        || value == "."
        || value.contains("..")
        || value.contains('/')
        || value.contains('\\')
        || value.contains('\0')
    {
        return Err(StorageError::InvalidKey(format!(
            "{} '{}' cannot be used as a path component",
            kind, value
        )));
    }
    Ok(())
}

/// Storage key for the media bytes.
pub fn media_key(origin: &ServerName, media_id: &MediaId) -> StorageResult<String> {
    check_component("origin", origin.as_str())?;
    check_component("media id", media_id.as_str())?;
    Ok(format!("{}/{}", origin, media_id))
}

/// Storage key for the metadata record.
pub fn metadata_key(origin: &ServerName, media_id: &MediaId) -> StorageResult<String> {
    Ok(format!("{}.json", media_key(origin, media_id)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_scoped_by_origin() {
        let origin = ServerName::new("example.com");
        let id = MediaId::new("abc");
        assert_eq!(media_key(&origin, &id).unwrap(), "example.com/abc");
        assert_eq!(metadata_key(&origin, &id).unwrap(), "example.com/abc.json");
    }

    #[test]
    fn traversal_is_rejected() {
        let origin = ServerName::new("example.com");
        for bad in ["..", "../etc", "a/b", ""] {
            assert!(matches!(
                media_key(&origin, &MediaId::new(bad)),
                Err(StorageError::InvalidKey(_))
            ));
        }
        assert!(media_key(&ServerName::new("../x"), &MediaId::new("abc")).is_err());
    }

    #[test]
    fn generated_ids_are_unique_hex() {
        let a = generate_media_id();
        let b = generate_media_id();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
