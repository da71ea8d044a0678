// File: src/images.rs
// Purpose: Image attachments with batch checks and scoped preview URLs

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Default per-image size ceiling (5 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Default accepted MIME types.
pub const DEFAULT_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// A file picked by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Which images a form accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePolicy {
    pub max_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
            allowed_types: DEFAULT_IMAGE_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ImagePolicy {
    pub fn allows_type(&self, mime_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == mime_type)
    }

    /// Checks a whole batch: every type first, then every size.
    pub fn check_batch(&self, files: &[ImageFile]) -> Result<(), ImageRejection> {
        if let Some(file) = files.iter().find(|f| !self.allows_type(&f.mime_type)) {
            return Err(ImageRejection::FileTypeRejected { file: file.name.clone() });
        }
        if let Some(file) = files.iter().find(|f| f.size() > self.max_bytes) {
            return Err(ImageRejection::FileSizeExceeded {
                file: file.name.clone(),
                limit: size_label(self.max_bytes),
            });
        }
        Ok(())
    }
}

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Human size for a byte limit, rounded up so the shown limit is never
/// smaller than the real one.
fn size_label(bytes: u64) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= MIB {
        let tenths = (bytes * 10).div_ceil(MIB);
        format!("{}.{}MB", tenths / 10, tenths % 10)
    } else if bytes >= KIB {
        format!("{}KB", bytes.div_ceil(KIB))
    } else {
        format!("{} bytes", bytes)
    }
}

/// Why a batch was refused. The display text is what the form shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageRejection {
    #[error("Please select only image files (JPEG, PNG, WebP)")]
    FileTypeRejected { file: String },

    #[error("Each image must be less than {limit}")]
    FileSizeExceeded { file: String, limit: String },
}

/// Issues and revokes preview URLs for attached files.
pub trait PreviewRegistry: Send + Sync {
    fn create(&self, file: &ImageFile) -> String;
    fn revoke(&self, url: &str);
}

/// In-process registry handing out `blob:` style URLs.
#[derive(Debug, Default)]
pub struct ObjectUrls {
    live: Mutex<HashSet<String>>,
}

impl ObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of URLs created and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live.lock().map(|live| live.len()).unwrap_or(0)
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.lock().map(|live| live.contains(url)).unwrap_or(false)
    }
}

impl PreviewRegistry for ObjectUrls {
    fn create(&self, _file: &ImageFile) -> String {
        let url = format!("blob:estate/{}", Uuid::new_v4());
        if let Ok(mut live) = self.live.lock() {
            live.insert(url.clone());
        }
        url
    }

    fn revoke(&self, url: &str) {
        if let Ok(mut live) = self.live.lock() {
            live.remove(url);
        }
    }
}

/// A preview URL that is revoked when the handle is dropped.
pub struct PreviewHandle {
    url: String,
    name: String,
    registry: Arc<dyn PreviewRegistry>,
}

impl PreviewHandle {
    pub fn new(file: &ImageFile, registry: Arc<dyn PreviewRegistry>) -> Self {
        let url = registry.create(file);
        Self {
            url,
            name: file.name.clone(),
            registry,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.revoke(&self.url);
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("url", &self.url)
            .field("name", &self.name)
            .finish()
    }
}

/// Accepted images and their previews, kept index-aligned.
pub struct ImageSet {
    entries: Vec<(ImageFile, PreviewHandle)>,
    policy: ImagePolicy,
    registry: Arc<dyn PreviewRegistry>,
}

impl ImageSet {
    pub fn new(policy: ImagePolicy, registry: Arc<dyn PreviewRegistry>) -> Self {
        Self {
            entries: Vec::new(),
            policy,
            registry,
        }
    }

    pub fn policy(&self) -> &ImagePolicy {
        &self.policy
    }

    /// Appends a batch if every file passes, otherwise keeps the set unchanged.
    pub fn add_batch(&mut self, files: Vec<ImageFile>) -> Result<usize, ImageRejection> {
        if let Err(rejection) = self.policy.check_batch(&files) {
            warn!(files = files.len(), reason = %rejection, "rejected image batch");
            return Err(rejection);
        }

        let added = files.len();
        for file in files {
            let preview = PreviewHandle::new(&file, Arc::clone(&self.registry));
            self.entries.push((file, preview));
        }
        debug!(added, total = self.entries.len(), "accepted image batch");
        Ok(added)
    }

    /// Removes one image; its preview is released with it.
    pub fn remove(&mut self, index: usize) -> Option<ImageFile> {
        if index >= self.entries.len() {
            return None;
        }
        let (file, preview) = self.entries.remove(index);
        drop(preview);
        Some(file)
    }

    pub fn files(&self) -> impl Iterator<Item = &ImageFile> {
        self.entries.iter().map(|(file, _)| file)
    }

    pub fn previews(&self) -> impl Iterator<Item = &PreviewHandle> {
        self.entries.iter().map(|(_, preview)| preview)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ImageSet {
    fn default() -> Self {
        Self::new(ImagePolicy::default(), Arc::new(ObjectUrls::new()))
    }
}

impl fmt::Debug for ImageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSet")
            .field("entries", &self.entries)
            .field("policy", &self.policy)
            .finish()
    }
}
