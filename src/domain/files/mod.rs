//! File screen domain: stored file references and media-type labels

pub mod media;
pub mod stored_file;

pub use media::{derive_media_type, MediaKind, GENERIC_MEDIA_TYPE};
pub use stored_file::{new_file_id, StoredFile};
