//! Upload validation and the blob-store seam.
//!
//! Files are validated against a MIME allow-list and a size ceiling
//! before anything crosses the storage boundary; a rejected upload never
//! produces network traffic. The blob store itself is an external
//! collaborator behind the [`BlobStore`] trait.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use nidus_core::error::{NidusError, NidusResult};
use uuid::Uuid;

/// Default upload size ceiling: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Content types accepted for program materials: PDF, PowerPoint, Word,
/// and common image formats.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
];

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub allowed_content_types: Vec<String>,
    pub max_size_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_content_types: ALLOWED_CONTENT_TYPES
                .iter()
                .map(|t| (*t).to_string())
                .collect(),
            max_size_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    pub fn validate(
        &self,
        file_name: &str,
        content_type: &str,
        size_bytes: u64,
    ) -> NidusResult<()> {
        if !self
            .allowed_content_types
            .iter()
            .any(|allowed| allowed == content_type)
        {
            return Err(NidusError::Upload(format!(
                "'{file_name}' has unsupported content type '{content_type}'"
            )));
        }
        if size_bytes > self.max_size_bytes {
            return Err(NidusError::Upload(format!(
                "'{file_name}' is {size_bytes} bytes, above the {} byte limit",
                self.max_size_bytes
            )));
        }
        Ok(())
    }
}

/// A file handed to [`Workspace::upload_material`].
///
/// [`Workspace::upload_material`]: crate::service::Workspace::upload_material
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub startup_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
}

/// External blob storage boundary. `put` stores an object and returns
/// its public URL.
pub trait BlobStore: Send + Sync {
    fn put(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = NidusResult<String>> + Send;
}

struct StoredObject {
    #[allow(dead_code)]
    content_type: String,
    bytes: Vec<u8>,
}

/// In-memory blob store backing demo mode and tests.
pub struct MemoryBlobStore {
    base_url: String,
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self {
            base_url: "memory://nidus-materials".into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// Number of stored objects; lets tests assert that rejected uploads
    /// never reached the boundary.
    pub fn object_count(&self) -> usize {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn size_of(&self, key: &str) -> Option<usize> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map(|o| o.bytes.len())
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> NidusResult<String> {
        let mut objects = self
            .objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        objects.insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        Ok(format!("{}/{key}", self.base_url))
    }
}
