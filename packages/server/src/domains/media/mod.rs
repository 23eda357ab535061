//! Media domain - avatar and thumbnail uploads to the blob store

pub mod upload;

pub use upload::{object_name, upload_media, MediaBucket};
