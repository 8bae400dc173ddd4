//! Upload handlers: the authorization pre-flight and the multipart upload
//! endpoint that runs the pipeline.

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use mediadesk_core::domain::{AuditAction, AuditLogEntry};
use mediadesk_core::pipeline::{UploadFile, UploadOptions};
use mediadesk_core::validate::{ALLOWED_MIME_TYPES, MAX_FILE_SIZE};
use mediadesk_shared::dto::{LocalUploadResponse, UploadIntentRequest, UploadIntentResponse};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/upload-intent
///
/// Authorizes an upload before any bytes move and records the intent in
/// the audit trail. Size/type checks here are advisory; the pipeline
/// re-checks them at the upload boundary.
pub async fn upload_intent(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UploadIntentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.file_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Missing required fields: postId, fileName".to_string(),
        ));
    }

    if let Some(size) = req.file_size
        && size > MAX_FILE_SIZE
    {
        return Err(AppError::BadRequest(
            "File size exceeds 5MB limit".to_string(),
        ));
    }

    if let Some(mime) = &req.mime_type
        && !ALLOWED_MIME_TYPES.contains(&mime.as_str())
    {
        return Err(AppError::BadRequest(
            "Invalid file type. Allowed: JPG, PNG, WEBP".to_string(),
        ));
    }

    state
        .audit
        .append(
            AuditLogEntry::new(AuditAction::UploadAuthorized, &identity.email, req.post_id)
                .with_file_name(&req.file_name)
                .with_details(format!(
                    "File size: {}, Type: {}",
                    req.file_size.map_or("unknown".to_string(), |s| s.to_string()),
                    req.mime_type.as_deref().unwrap_or("unknown"),
                )),
        )
        .await?;

    Ok(HttpResponse::Ok().json(UploadIntentResponse {
        authorized: true,
        message: "Upload authorized".to_string(),
        email: identity.email,
    }))
}

#[derive(Debug, MultipartForm)]
pub struct LocalUploadForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
    #[multipart(rename = "postId")]
    pub post_id: Text<String>,
    pub thumbnail: Option<Text<String>>,
}

/// POST /api/local-upload
///
/// Multipart upload that runs the full pipeline: validate, compress,
/// thumbnail, persist, and hand back the metadata the caller attaches to
/// its post. Takes an optional bearer identity for provenance.
pub async fn local_upload(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    form: MultipartForm<LocalUploadForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let post_id: Uuid = form
        .post_id
        .parse()
        .map_err(|_| AppError::BadRequest("postId is required".to_string()))?;

    let file_name = form
        .file
        .file_name
        .clone()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;

    let mime_type = form
        .file
        .content_type
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let bytes = std::fs::read(form.file.file.path())
        .map_err(|e| AppError::Internal(format!("failed to read upload: {e}")))?;

    let options = UploadOptions {
        post_id,
        uploaded_by: identity
            .0
            .map(|id| id.email)
            .unwrap_or_else(|| "local-upload".to_string()),
        thumbnail: form
            .thumbnail
            .map(|flag| flag.as_str() == "true")
            .unwrap_or(false),
    };

    let item = state
        .pipeline
        .upload(
            UploadFile {
                name: file_name,
                bytes,
                mime_type,
            },
            &options,
            None,
        )
        .await?;

    Ok(HttpResponse::Ok().json(LocalUploadResponse {
        success: true,
        file_url: item.file_url,
        thumbnail_url: item.thumbnail_url,
        file_name: item.file_name,
        file_size: item.file_size,
        mime_type: item.mime_type,
    }))
}
