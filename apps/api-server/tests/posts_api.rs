//! End-to-end tests over the HTTP surface: auth gating, post CRUD with the
//! delete lock, the audit trail, and the multipart upload path.

use std::io::Cursor;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::json;

use api_server::handlers::configure_routes;
use api_server::state::AppState;
use mediadesk_core::domain::AuditAction;
use mediadesk_core::gate::AuthorizationGate;
use mediadesk_core::ports::{AuditLogRepository, PostRepository};
use mediadesk_core::pipeline::UploadPipeline;
use mediadesk_infra::auth::{JwtConfig, JwtIdentityVerifier};
use mediadesk_infra::repository::{InMemoryAuditLogRepository, InMemoryPostRepository};
use mediadesk_infra::storage::InMemoryObjectStore;
use mediadesk_infra::transform::RasterTransformer;

const STAFF: &str = "staff@example.edu";

struct TestCtx {
    state: AppState,
    verifier: Arc<JwtIdentityVerifier>,
    posts: Arc<InMemoryPostRepository>,
    audit: Arc<InMemoryAuditLogRepository>,
    store: Arc<InMemoryObjectStore>,
}

fn test_ctx() -> TestCtx {
    let verifier = Arc::new(JwtIdentityVerifier::new(JwtConfig::default()));
    let posts = Arc::new(InMemoryPostRepository::new());
    let audit = Arc::new(InMemoryAuditLogRepository::new());
    let store = Arc::new(InMemoryObjectStore::new());

    let state = AppState {
        posts: posts.clone(),
        audit: audit.clone(),
        pipeline: Arc::new(UploadPipeline::new(
            store.clone(),
            Arc::new(RasterTransformer::new()),
        )),
        gate: Arc::new(AuthorizationGate::new(
            verifier.clone(),
            vec![STAFF.to_string()],
        )),
    };

    TestCtx {
        state,
        verifier,
        posts,
        audit,
        store,
    }
}

fn bearer(ctx: &TestCtx, email: &str) -> (&'static str, String) {
    let token = ctx.verifier.issue(email).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

async fn create_post(
    ctx: &TestCtx,
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    title: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(ctx, STAFF))
        .set_json(json!({"title": title}))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(app, req).await;
    body["id"].as_str().expect("post id").to_string()
}

#[actix_web::test]
async fn missing_bearer_is_401_and_nothing_is_stored() {
    let ctx = test_ctx();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({"title": "Launch"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(ctx.posts.list_recent().await.unwrap().is_empty());
    assert_eq!(ctx.audit.count().await, 0);
}

#[actix_web::test]
async fn unlisted_email_is_403() {
    let ctx = test_ctx();
    let app = app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/posts")
        .insert_header(bearer(&ctx, "outsider@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn create_requires_a_title() {
    let ctx = test_ctx();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&ctx, STAFF))
        .set_json(json!({"title": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.audit.count().await, 0);
}

#[actix_web::test]
async fn created_post_defaults_to_draft_and_is_audited() {
    let ctx = test_ctx();
    let app = app!(ctx);

    let id = create_post(&ctx, &app, "Launch").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{id}"))
        .insert_header(bearer(&ctx, STAFF))
        .to_request();
    let post: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(post["title"], "Launch");
    assert_eq!(post["status"], "Draft");
    assert_eq!(post["platform"], "all");
    assert_eq!(post["createdBy"], STAFF);
    assert_eq!(post["media"], json!([]));

    let entries = ctx.audit.recent(10).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::PostCreated);
    assert_eq!(entries[0].performed_by, STAFF);
    assert_eq!(entries[0].post_id.to_string(), id);
}

#[actix_web::test]
async fn list_orders_newest_first() {
    let ctx = test_ctx();
    let app = app!(ctx);

    create_post(&ctx, &app, "first").await;
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    create_post(&ctx, &app, "second").await;

    let req = test::TestRequest::get()
        .uri("/api/posts")
        .insert_header(bearer(&ctx, STAFF))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["title"], "second");
    assert_eq!(posts[1]["title"], "first");
}

#[actix_web::test]
async fn update_merges_partial_fields_and_appends_one_audit_entry() {
    let ctx = test_ctx();
    let app = app!(ctx);
    let id = create_post(&ctx, &app, "Launch").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{id}"))
        .insert_header(bearer(&ctx, STAFF))
        .set_json(json!({"status": "Pending"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{id}"))
        .insert_header(bearer(&ctx, STAFF))
        .to_request();
    let post: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(post["status"], "Pending");
    assert_eq!(post["title"], "Launch");

    let entries = ctx.audit.recent(10).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, AuditAction::PostUpdated);
}

#[actix_web::test]
async fn posted_post_rejects_delete_and_remains() {
    let ctx = test_ctx();
    let app = app!(ctx);
    let id = create_post(&ctx, &app, "Launch").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{id}"))
        .insert_header(bearer(&ctx, STAFF))
        .set_json(json!({"status": "Posted"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{id}"))
        .insert_header(bearer(&ctx, STAFF))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{id}"))
        .insert_header(bearer(&ctx, STAFF))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // No POST_DELETED entry was appended.
    let entries = ctx.audit.recent(10).await.unwrap();
    assert!(entries.iter().all(|e| e.action != AuditAction::PostDeleted));
}

#[actix_web::test]
async fn locked_post_allows_status_change_but_not_content_edits() {
    let ctx = test_ctx();
    let app = app!(ctx);
    let id = create_post(&ctx, &app, "Launch").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{id}"))
        .insert_header(bearer(&ctx, STAFF))
        .set_json(json!({"status": "Approved"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{id}"))
        .insert_header(bearer(&ctx, STAFF))
        .set_json(json!({"title": "Edited"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    // Status remains an open enum: Approved back to Rejected is allowed.
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{id}"))
        .insert_header(bearer(&ctx, STAFF))
        .set_json(json!({"status": "Rejected"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn draft_post_deletes_cleanly() {
    let ctx = test_ctx();
    let app = app!(ctx);
    let id = create_post(&ctx, &app, "Scratch").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{id}"))
        .insert_header(bearer(&ctx, STAFF))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{id}"))
        .insert_header(bearer(&ctx, STAFF))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let entries = ctx.audit.recent(10).await.unwrap();
    assert_eq!(entries[0].action, AuditAction::PostDeleted);
}

#[actix_web::test]
async fn unknown_post_id_is_404() {
    let ctx = test_ctx();
    let app = app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", uuid::Uuid::new_v4()))
        .insert_header(bearer(&ctx, STAFF))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

// --- upload surface ---

fn test_jpeg(width: u32, height: u32) -> Vec<u8> {
    use image::{DynamicImage, ImageBuffer, Rgb};
    let img = DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
    }));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();
    buf
}

const BOUNDARY: &str = "----mediadesk-test-boundary";

fn multipart_body(post_id: &str, file_name: &str, mime: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"postId\"\r\n\r\n{post_id}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"thumbnail\"\r\n\r\ntrue\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(post_id: &str, file_name: &str, mime: &str, bytes: &[u8]) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/local-upload")
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(post_id, file_name, mime, bytes))
        .to_request()
}

#[actix_web::test]
async fn jpeg_upload_returns_metadata_with_persisted_size() {
    let ctx = test_ctx();
    let app = app!(ctx);
    let id = create_post(&ctx, &app, "Launch").await;

    let jpeg = test_jpeg(1600, 1200);
    let original_size = jpeg.len() as u64;

    let req = multipart_request(&id, "photo.jpg", "image/jpeg", &jpeg);
    let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp["success"], true);
    assert_eq!(resp["fileName"], "photo.jpg");
    assert_eq!(resp["mimeType"], "image/jpeg");
    assert!(resp["fileSize"].as_u64().unwrap() <= original_size);
    let file_url = resp["fileUrl"].as_str().unwrap();
    assert!(file_url.starts_with(&format!("/uploads/{id}/")));
    assert!(resp["thumbnailUrl"].as_str().unwrap().contains("/thumb-"));

    // Original plus thumbnail were persisted; the post itself is untouched.
    assert_eq!(ctx.store.len().await, 2);
    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{id}"))
        .insert_header(bearer(&ctx, STAFF))
        .to_request();
    let post: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(post["status"], "Draft");
}

#[actix_web::test]
async fn oversize_upload_is_rejected_before_any_storage_write() {
    let ctx = test_ctx();
    let app = app!(ctx);
    let id = create_post(&ctx, &app, "Launch").await;

    let six_mib = vec![0u8; 6 * 1024 * 1024];
    let req = multipart_request(&id, "big.png", "image/png", &six_mib);
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.store.is_empty().await);
}

#[actix_web::test]
async fn disallowed_upload_type_is_rejected() {
    let ctx = test_ctx();
    let app = app!(ctx);
    let id = create_post(&ctx, &app, "Launch").await;

    let req = multipart_request(&id, "clip.gif", "image/gif", b"GIF89a");
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.store.is_empty().await);
}

#[actix_web::test]
async fn upload_intent_authorizes_and_records_the_intent() {
    let ctx = test_ctx();
    let app = app!(ctx);
    let id = create_post(&ctx, &app, "Launch").await;

    let req = test::TestRequest::post()
        .uri("/api/upload-intent")
        .insert_header(bearer(&ctx, STAFF))
        .set_json(json!({
            "postId": id,
            "fileName": "photo.jpg",
            "fileSize": 2 * 1024 * 1024,
            "mimeType": "image/jpeg"
        }))
        .to_request();
    let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp["authorized"], true);
    assert_eq!(resp["email"], STAFF);

    let entries = ctx.audit.recent(10).await.unwrap();
    assert_eq!(entries[0].action, AuditAction::UploadAuthorized);
    assert_eq!(entries[0].file_name.as_deref(), Some("photo.jpg"));
}

#[actix_web::test]
async fn upload_intent_rejects_oversize_and_bad_mime() {
    let ctx = test_ctx();
    let app = app!(ctx);
    let id = create_post(&ctx, &app, "Launch").await;

    let req = test::TestRequest::post()
        .uri("/api/upload-intent")
        .insert_header(bearer(&ctx, STAFF))
        .set_json(json!({"postId": id, "fileName": "big.jpg", "fileSize": 6 * 1024 * 1024}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::post()
        .uri("/api/upload-intent")
        .insert_header(bearer(&ctx, STAFF))
        .set_json(json!({"postId": id, "fileName": "clip.gif", "mimeType": "image/gif"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::post()
        .uri("/api/upload-intent")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn health_check_is_public() {
    let ctx = test_ctx();
    let app = app!(ctx);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["status"], "ok");
}
