//! Raster transformer backed by the `image` crate.
//!
//! Every derivation is an independent decode / redraw / encode pass. An
//! undecodable source is a hard `TransformError`; encode-side trouble in
//! the compression path falls back to the original bytes.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};

use mediadesk_core::domain::Platform;
use mediadesk_core::error::TransformError;
use mediadesk_core::ports::{EncodedImage, ImageTransformer};

/// Longest output dimension for the compressed variant.
const COMPRESS_MAX_DIMENSION: u32 = 1920;

/// Target upper bound for the compressed variant, in bytes.
const COMPRESS_TARGET_BYTES: usize = 1024 * 1024;

/// JPEG qualities tried in order while the output exceeds the target.
const COMPRESS_QUALITY_SWEEP: [u8; 6] = [85, 75, 65, 55, 45, 35];

/// Thumbnail bounding box edge.
const THUMBNAIL_SIZE: u32 = 300;

#[derive(Debug, Default, Clone, Copy)]
pub struct RasterTransformer;

impl RasterTransformer {
    pub fn new() -> Self {
        Self
    }

    fn decode(bytes: &[u8]) -> Result<DynamicImage, TransformError> {
        image::load_from_memory(bytes).map_err(|e| TransformError::Decode(e.to_string()))
    }

    fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, TransformError> {
        // JPEG has no alpha channel.
        let rgb = img.to_rgb8();
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, quality)
            .write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| TransformError::Encode(e.to_string()))?;
        Ok(buf)
    }

    fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, TransformError> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(|e| TransformError::Encode(e.to_string()))?;
        Ok(buf)
    }

    fn encode_webp(img: &DynamicImage) -> Result<Vec<u8>, TransformError> {
        let rgba = img.to_rgba8();
        let mut buf = Vec::new();
        WebPEncoder::new_lossless(&mut buf)
            .encode(
                rgba.as_raw(),
                rgba.width(),
                rgba.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| TransformError::Encode(e.to_string()))?;
        Ok(buf)
    }

    /// Encode in the source format where the encoder supports it,
    /// otherwise JPEG. Quality applies to JPEG only; PNG is lossless and
    /// the bundled WebP encoder has no lossy mode.
    fn encode_as(
        img: &DynamicImage,
        mime_type: &str,
        quality: u8,
    ) -> Result<EncodedImage, TransformError> {
        let (bytes, mime) = match mime_type {
            "image/png" => (Self::encode_png(img)?, "image/png"),
            "image/webp" => (Self::encode_webp(img)?, "image/webp"),
            _ => (Self::encode_jpeg(img, quality)?, "image/jpeg"),
        };
        Ok(EncodedImage {
            bytes,
            mime_type: mime.to_string(),
        })
    }
}

impl ImageTransformer for RasterTransformer {
    fn compress(&self, bytes: &[u8], mime_type: &str) -> Result<EncodedImage, TransformError> {
        let img = Self::decode(bytes)?;

        let over_cap = img.width().max(img.height()) > COMPRESS_MAX_DIMENSION;
        let resized = if over_cap {
            img.resize(
                COMPRESS_MAX_DIMENSION,
                COMPRESS_MAX_DIMENSION,
                FilterType::Lanczos3,
            )
        } else {
            img
        };

        let encoded = if mime_type == "image/jpeg" {
            // Walk the quality sweep until the target size is met; keep the
            // last attempt if it never is.
            let mut best = None;
            for quality in COMPRESS_QUALITY_SWEEP {
                match Self::encode_jpeg(&resized, quality) {
                    Ok(buf) => {
                        let done = buf.len() <= COMPRESS_TARGET_BYTES;
                        best = Some(buf);
                        if done {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "jpeg compression pass failed, keeping original");
                        break;
                    }
                }
            }
            best
        } else {
            match Self::encode_as(&resized, mime_type, 85) {
                Ok(encoded) => Some(encoded.bytes),
                Err(e) => {
                    tracing::warn!(error = %e, "compression failed, keeping original");
                    None
                }
            }
        };

        // The dimension cap wins; otherwise never hand back something
        // bigger than what came in.
        match encoded {
            Some(buf) if over_cap || buf.len() < bytes.len() => Ok(EncodedImage {
                bytes: buf,
                mime_type: mime_type.to_string(),
            }),
            _ => Ok(EncodedImage {
                bytes: bytes.to_vec(),
                mime_type: mime_type.to_string(),
            }),
        }
    }

    fn thumbnail(&self, bytes: &[u8]) -> Result<EncodedImage, TransformError> {
        let img = Self::decode(bytes)?;
        let scaled = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);
        Ok(EncodedImage {
            bytes: Self::encode_jpeg(&scaled, 80)?,
            mime_type: "image/jpeg".to_string(),
        })
    }

    fn platform_crop(
        &self,
        bytes: &[u8],
        mime_type: &str,
        platform: Platform,
    ) -> Result<EncodedImage, TransformError> {
        let Some((width, height)) = platform.crop_dimensions() else {
            // `all` has no single crop target.
            return Ok(EncodedImage {
                bytes: bytes.to_vec(),
                mime_type: mime_type.to_string(),
            });
        };

        let img = Self::decode(bytes)?;
        // Center-crop to the target ratio, then scale to exact dimensions.
        let cropped = img.resize_to_fill(width, height, FilterType::Lanczos3);
        Self::encode_as(&cropped, mime_type, 90)
    }

    fn blur_placeholder(&self, bytes: &[u8]) -> Result<String, TransformError> {
        let img = Self::decode(bytes)?;
        let tiny = img.resize_exact(10, 10, FilterType::Triangle);
        let jpeg = Self::encode_jpeg(&tiny, 10)?;
        Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(jpeg)))
    }

    fn dimensions(&self, bytes: &[u8]) -> Result<(u32, u32), TransformError> {
        let img = Self::decode(bytes)?;
        Ok((img.width(), img.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
        buf
    }

    fn decoded_dimensions(encoded: &EncodedImage) -> (u32, u32) {
        let img = image::load_from_memory(&encoded.bytes).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn thumbnail_long_edge_is_300_and_aspect_preserved() {
        let t = RasterTransformer::new();
        let src = test_image(800, 600, ImageFormat::Png);

        let thumb = t.thumbnail(&src).unwrap();

        assert_eq!(thumb.mime_type, "image/jpeg");
        let (w, h) = decoded_dimensions(&thumb);
        assert_eq!(w.max(h), 300);
        assert_eq!((w, h), (300, 225));
    }

    #[test]
    fn thumbnail_of_portrait_input_caps_height() {
        let t = RasterTransformer::new();
        let src = test_image(400, 800, ImageFormat::Png);

        let thumb = t.thumbnail(&src).unwrap();

        let (w, h) = decoded_dimensions(&thumb);
        assert_eq!((w, h), (150, 300));
    }

    #[test]
    fn platform_crop_hits_exact_dimensions_for_any_input_aspect() {
        let t = RasterTransformer::new();
        for (src_w, src_h) in [(2000, 500), (500, 2000), (1080, 1080)] {
            let src = test_image(src_w, src_h, ImageFormat::Jpeg);
            for platform in [Platform::Instagram, Platform::Twitter, Platform::Facebook] {
                let out = t.platform_crop(&src, "image/jpeg", platform).unwrap();
                let expected = platform.crop_dimensions().unwrap();
                assert_eq!(decoded_dimensions(&out), expected);
            }
        }
    }

    #[test]
    fn platform_crop_for_all_returns_source_unchanged() {
        let t = RasterTransformer::new();
        let src = test_image(100, 100, ImageFormat::Png);
        let out = t.platform_crop(&src, "image/png", Platform::All).unwrap();
        assert_eq!(out.bytes, src);
        assert_eq!(out.mime_type, "image/png");
    }

    #[test]
    fn compress_never_errors_for_a_decodable_image() {
        let t = RasterTransformer::new();
        for format in [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP] {
            let mime = match format {
                ImageFormat::Jpeg => "image/jpeg",
                ImageFormat::Png => "image/png",
                _ => "image/webp",
            };
            let src = test_image(640, 480, format);
            let out = t.compress(&src, mime).unwrap();
            assert!(out.bytes.len() <= src.len());
        }
    }

    #[test]
    fn compress_caps_longest_dimension_at_1920() {
        let t = RasterTransformer::new();
        let src = test_image(2400, 1200, ImageFormat::Jpeg);

        let out = t.compress(&src, "image/jpeg").unwrap();

        let img = image::load_from_memory(&out.bytes).unwrap();
        assert!(img.width().max(img.height()) <= 1920);
    }

    #[test]
    fn compress_fails_for_undecodable_input() {
        let t = RasterTransformer::new();
        let err = t.compress(b"definitely not an image", "image/jpeg");
        assert!(matches!(err, Err(TransformError::Decode(_))));
    }

    #[test]
    fn thumbnail_fails_for_undecodable_input() {
        let t = RasterTransformer::new();
        assert!(matches!(
            t.thumbnail(b"garbage"),
            Err(TransformError::Decode(_))
        ));
    }

    #[test]
    fn blur_placeholder_is_an_inline_jpeg_data_url() {
        let t = RasterTransformer::new();
        let src = test_image(200, 100, ImageFormat::Png);

        let data_url = t.blur_placeholder(&src).unwrap();

        let encoded = data_url.strip_prefix("data:image/jpeg;base64,").unwrap();
        let jpeg = BASE64.decode(encoded).unwrap();
        let img = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((img.width(), img.height()), (10, 10));
    }

    #[test]
    fn dimensions_reports_source_size() {
        let t = RasterTransformer::new();
        let src = test_image(321, 123, ImageFormat::Png);
        assert_eq!(t.dimensions(&src).unwrap(), (321, 123));
    }
}
