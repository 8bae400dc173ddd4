//! Post CRUD handlers. Every route requires an allow-listed identity and
//! every successful mutation appends exactly one audit entry.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use mediadesk_core::domain::{AuditAction, AuditLogEntry, Post, PostPatch};
use mediadesk_shared::dto::{
    CreatePostRequest, CreatePostResponse, MessageResponse, PostListResponse, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts
pub async fn list(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    Ok(HttpResponse::Ok().json(PostListResponse { posts }))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let mut post = Post::new(
        &req.title,
        req.content.as_deref().unwrap_or(""),
        identity.email.clone(),
    );
    if let Some(platform) = req.platform {
        post.platform = platform;
    }
    if let Some(status) = req.status {
        post.status = status;
    }
    if let Some(media) = req.media {
        post.media = media;
    }

    let saved = state.posts.insert(post).await?;

    state
        .audit
        .append(AuditLogEntry::new(
            AuditAction::PostCreated,
            &identity.email,
            saved.id,
        ))
        .await?;

    Ok(HttpResponse::Ok().json(CreatePostResponse {
        id: saved.id,
        message: "Post created successfully".to_string(),
    }))
}

/// GET /api/posts/{post_id}
pub async fn get(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/posts/{post_id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    // A locked post's title/content/media are immutable through the normal
    // edit path; status alone may still be changed by an authorized actor.
    let edits_content = req.title.is_some() || req.content.is_some() || req.media.is_some();
    if post.is_locked() && edits_content {
        return Err(AppError::Locked(
            "Cannot edit an approved or posted post".to_string(),
        ));
    }

    state
        .posts
        .update(
            post_id,
            PostPatch {
                title: req.title,
                content: req.content,
                platform: req.platform,
                status: req.status,
                media: req.media,
            },
        )
        .await?;

    state
        .audit
        .append(AuditLogEntry::new(
            AuditAction::PostUpdated,
            &identity.email,
            post_id,
        ))
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Post updated successfully".to_string(),
    }))
}

/// DELETE /api/posts/{post_id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.is_locked() {
        return Err(AppError::Locked(
            "Cannot delete an approved or posted post".to_string(),
        ));
    }

    state.posts.delete(post_id).await?;

    state
        .audit
        .append(AuditLogEntry::new(
            AuditAction::PostDeleted,
            &identity.email,
            post_id,
        ))
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Post deleted successfully".to_string(),
    }))
}
