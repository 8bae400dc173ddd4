//! File validation rules - pure predicates applied before any upload work.
//!
//! The same three checks run twice: once as an advisory pre-flight on the
//! client-facing path and again at the upload boundary.

/// Maximum accepted file size in bytes (5 MiB).
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// MIME types accepted for upload.
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// File extensions accepted for upload (lowercased, with leading dot).
pub const ALLOWED_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

/// A file as declared by the caller: name, size, and MIME type. No bytes -
/// validation never reads content.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

/// Check a single file against the size, MIME, and extension rules.
/// Returns a human-readable reason on failure.
pub fn validate_file(file: &FileCandidate) -> Result<(), String> {
    if file.size > MAX_FILE_SIZE {
        return Err(format!(
            "File \"{}\" exceeds maximum size of {}MB ({:.1}MB)",
            file.name,
            MAX_FILE_SIZE / (1024 * 1024),
            file.size as f64 / (1024.0 * 1024.0),
        ));
    }

    if !ALLOWED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(format!(
            "File \"{}\" has invalid format. Allowed: JPG, PNG, WEBP",
            file.name
        ));
    }

    let extension = file
        .name
        .rsplit_once('.')
        .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!(
            "File \"{}\" has invalid extension. Allowed: {}",
            file.name,
            ALLOWED_EXTENSIONS.join(", ")
        ));
    }

    Ok(())
}

/// Partition a batch into accepted files and per-file error messages.
/// Order is preserved on both sides; no short-circuit on first failure.
pub fn validate_files(files: &[FileCandidate]) -> (Vec<FileCandidate>, Vec<String>) {
    let mut valid = Vec::new();
    let mut errors = Vec::new();

    for file in files {
        match validate_file(file) {
            Ok(()) => valid.push(file.clone()),
            Err(reason) => errors.push(reason),
        }
    }

    (valid, errors)
}
