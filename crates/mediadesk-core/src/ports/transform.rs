use crate::domain::Platform;
use crate::error::TransformError;

/// One image derivation: the bytes plus the MIME type they were encoded as.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Image derivations - each is an independent decode/redraw/encode pass
/// over an in-memory bitmap.
///
/// Every method fails with `TransformError` on an undecodable source.
/// Callers treat that as terminal for the one file, never for a batch.
pub trait ImageTransformer: Send + Sync {
    /// Re-encode to at most 1 MiB with the longest dimension capped at
    /// 1920px, preserving the source format where possible. Encoding
    /// trouble falls back to the original bytes; only an undecodable
    /// source is an error. Unless the source exceeded the dimension cap,
    /// output is never larger than the input.
    fn compress(&self, bytes: &[u8], mime_type: &str) -> Result<EncodedImage, TransformError>;

    /// Scale to fit within a 300x300 box preserving aspect ratio,
    /// re-encoded as JPEG quality 80.
    fn thumbnail(&self, bytes: &[u8]) -> Result<EncodedImage, TransformError>;

    /// Center-crop to the platform's aspect ratio then scale to its exact
    /// pixel dimensions, quality 90, preserving the source MIME type where
    /// the encoder supports it. Returns the source unchanged for
    /// `Platform::All` (no crop target).
    fn platform_crop(
        &self,
        bytes: &[u8],
        mime_type: &str,
        platform: Platform,
    ) -> Result<EncodedImage, TransformError>;

    /// 10x10 downscale encoded as a low-quality JPEG, returned as an
    /// inline `data:` URL for use as a loading placeholder.
    fn blur_placeholder(&self, bytes: &[u8]) -> Result<String, TransformError>;

    /// Decode and report (width, height).
    fn dimensions(&self, bytes: &[u8]) -> Result<(u32, u32), TransformError>;
}
