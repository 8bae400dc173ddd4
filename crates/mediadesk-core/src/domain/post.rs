use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Target platform for a post. Determines the crop dimensions the
/// transformer uses for platform-specific variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Twitter,
    Facebook,
    #[default]
    All,
}

impl Platform {
    /// Exact output dimensions for the platform-specific crop.
    /// `All` has no single crop target.
    pub fn crop_dimensions(self) -> Option<(u32, u32)> {
        match self {
            Platform::Instagram => Some((1080, 1080)),
            Platform::Twitter => Some((1200, 675)),
            Platform::Facebook => Some((1200, 628)),
            Platform::All => None,
        }
    }
}

/// Workflow status of a post. An open enum: any authorized actor may set
/// any status in an update. The only enforced rule is the delete lock on
/// `Approved` and `Posted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PostStatus {
    #[default]
    Draft,
    Pending,
    Approved,
    Posted,
    Rejected,
}

/// Metadata for one uploaded image pair (original + thumbnail).
///
/// Created only by a successful upload pipeline run and never mutated
/// afterwards; removal happens through the containing post's media list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub file_name: String,
    pub file_url: String,
    pub thumbnail_url: String,
    /// Size in bytes of the persisted (possibly compressed) file, not the
    /// caller's original.
    pub file_size: u64,
    pub mime_type: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Post entity - one unit of editorial content with its attached media.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub platform: Platform,
    pub status: PostStatus,
    /// Insertion order is display order.
    pub media: Vec<MediaItem>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post. Title and content are trimmed; the store
    /// layer owns the timestamps.
    pub fn new(title: &str, content: &str, created_by: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            platform: Platform::default(),
            status: PostStatus::default(),
            media: Vec::new(),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// A locked post rejects deletion and normal edits. Status itself may
    /// still be changed by an authorized actor.
    pub fn is_locked(&self) -> bool {
        matches!(self.status, PostStatus::Approved | PostStatus::Posted)
    }

    /// Apply a partial update: only supplied fields change, and
    /// `updated_at` is always refreshed.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(content) = patch.content {
            self.content = content.trim().to_string();
        }
        if let Some(platform) = patch.platform {
            self.platform = platform;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(media) = patch.media {
            self.media = media;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial-field update for a post. `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub platform: Option<Platform>,
    pub status: Option<PostStatus>,
    pub media: Option<Vec<MediaItem>>,
}
