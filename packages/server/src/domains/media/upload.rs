use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::common::{AdminCapability, AdminGrant, DirectoryError, DirectoryResult};
use crate::kernel::ServerDeps;

/// Extension used when the original file name has none
const FALLBACK_EXTENSION: &str = "bin";

/// Public buckets uploads may target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaBucket {
    Avatars,
    Thumbnails,
}

impl MediaBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaBucket::Avatars => "avatars",
            MediaBucket::Thumbnails => "thumbnails",
        }
    }
}

impl std::fmt::Display for MediaBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaBucket {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avatars" => Ok(MediaBucket::Avatars),
            "thumbnails" => Ok(MediaBucket::Thumbnails),
            other => Err(DirectoryError::Validation(format!("unknown bucket: {}", other))),
        }
    }
}

/// Extension of `file_name`: the text after its last `.`
fn extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => FALLBACK_EXTENSION,
    }
}

/// Collision-resistant object name: `<random13>_<unix_millis>.<ext>`
pub fn object_name(file_name: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}.{}",
        &random[..13],
        Utc::now().timestamp_millis(),
        extension(file_name)
    )
}

/// Store an image and return its public URL
///
/// Failures are logged and returned; there is no retry.
pub async fn upload_media(
    deps: &ServerDeps,
    grant: &AdminGrant,
    bucket: MediaBucket,
    file_name: &str,
    bytes: Vec<u8>,
) -> DirectoryResult<String> {
    grant.ensure(AdminCapability::UploadMedia)?;

    if bytes.is_empty() {
        return Err(DirectoryError::Validation("upload is empty".to_string()));
    }

    let path = object_name(file_name);
    let content_type = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let size = bytes.len();

    match deps
        .blob_store
        .upload(bucket.as_str(), &path, bytes, &content_type)
        .await
    {
        Ok(url) => {
            info!(bucket = %bucket, path = %path, size, "Media uploaded");
            Ok(url)
        }
        Err(e) => {
            error!(bucket = %bucket, path = %path, error = %e, "Media upload failed");
            Err(DirectoryError::Upload(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Actor, Identity};
    use crate::kernel::test_dependencies::TEST_ADMIN_EMAIL;
    use crate::kernel::TestDependencies;

    async fn grant(deps: &ServerDeps) -> AdminGrant {
        Actor::new(Identity {
            user_id: "admin-1".to_string(),
            email: Some(TEST_ADMIN_EMAIL.to_string()),
        })
        .can(AdminCapability::UploadMedia)
        .check(deps)
        .await
        .unwrap()
    }

    #[test]
    fn object_names_keep_the_last_extension() {
        let name = object_name("my.avatar.PNG");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "PNG");
        let (random, millis) = stem.split_once('_').unwrap();
        assert_eq!(random.len(), 13);
        assert!(millis.parse::<i64>().is_ok());
    }

    #[test]
    fn names_without_extension_fall_back() {
        assert!(object_name("README").ends_with(".bin"));
        assert!(object_name("trailing.").ends_with(".bin"));
    }

    #[test]
    fn bucket_parses_known_names_only() {
        assert_eq!("avatars".parse::<MediaBucket>().unwrap(), MediaBucket::Avatars);
        assert!("secrets".parse::<MediaBucket>().is_err());
    }

    #[tokio::test]
    async fn upload_guesses_content_type_and_returns_url() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.server_deps();
        let grant = grant(&deps).await;

        let url = upload_media(&deps, &grant, MediaBucket::Thumbnails, "cover.jpg", vec![1, 2, 3])
            .await
            .unwrap();

        let uploads = test_deps.blob_store.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].bucket, "thumbnails");
        assert_eq!(uploads[0].content_type, "image/jpeg");
        assert_eq!(uploads[0].size, 3);
        assert!(url.ends_with(&uploads[0].path));
    }

    #[tokio::test]
    async fn upload_failure_is_returned() {
        let test_deps = TestDependencies::new();
        test_deps.blob_store.fail_uploads(true);
        let deps = test_deps.server_deps();
        let grant = grant(&deps).await;

        let result = upload_media(&deps, &grant, MediaBucket::Avatars, "me.png", vec![0]).await;

        assert!(matches!(result, Err(DirectoryError::Upload(_))));
    }
}
