//! Data Transfer Objects - request/response types for the API.
//!
//! JSON field names are camelCase to match the admin UI's wire format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mediadesk_core::domain::{MediaItem, Platform, Post, PostStatus};

/// Request to create a post. Only the title is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub status: Option<PostStatus>,
    #[serde(default)]
    pub media: Option<Vec<MediaItem>>,
}

/// Partial update: absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub status: Option<PostStatus>,
    #[serde(default)]
    pub media: Option<Vec<MediaItem>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Pre-flight authorization for a client-driven upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadIntentRequest {
    pub post_id: Uuid,
    pub file_name: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadIntentResponse {
    pub authorized: bool,
    pub message: String,
    pub email: String,
}

/// Metadata returned by a successful multipart upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalUploadResponse {
    pub success: bool,
    pub file_url: String,
    pub thumbnail_url: String,
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: String,
}
