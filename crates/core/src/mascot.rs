//! Mascot image decoding and layer preparation.
//!
//! Uploads are sniffed from their bytes (not trusted from the filename),
//! decoded with the `image` crate, and resized to the mascot layer width
//! before being written as PNG for the compositor.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::error::CoreError;
use crate::request::MascotUpload;
use crate::video::FRAME_HEIGHT;

/// Upload extensions accepted by the form.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

const SUPPORTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// A decoded mascot bitmap.
#[derive(Debug, Clone)]
pub struct MascotImage {
    image: DynamicImage,
    format: ImageFormat,
}

/// Decode an uploaded mascot.
///
/// Rejects filenames with an unsupported extension, byte streams that are
/// not PNG/JPEG/GIF/WebP, and images that fail to decode. Animated GIFs
/// contribute their first frame.
pub fn decode_mascot(upload: &MascotUpload) -> Result<MascotImage, CoreError> {
    if let Some(name) = upload.file_name.as_deref() {
        if let Some((_, ext)) = name.rsplit_once('.') {
            let ext = ext.to_lowercase();
            if !SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Unsupported image format '.{ext}'. Supported: {}",
                    SUPPORTED_IMAGE_EXTENSIONS.join(", ")
                )));
            }
        }
    }

    let format = image::guess_format(&upload.bytes)
        .map_err(|_| CoreError::Validation("Mascot upload is not a recognized image".into()))?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(CoreError::Validation(format!(
            "Unsupported image format {format:?}. Upload a PNG, JPG, GIF or WebP image"
        )));
    }

    let image = image::load_from_memory_with_format(&upload.bytes, format)
        .map_err(|e| CoreError::Validation(format!("Failed to decode mascot image: {e}")))?;

    Ok(MascotImage { image, format })
}

impl MascotImage {
    /// Wrap an already decoded bitmap.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image,
            format: ImageFormat::Png,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Format the upload was decoded from.
    pub fn source_format(&self) -> ImageFormat {
        self.format
    }

    /// Layer size for the given target width, preserving aspect ratio.
    ///
    /// Images taller than the frame at that width are scaled down to
    /// `FRAME_HEIGHT` instead, so the layer never exceeds the frame.
    pub fn layer_size(&self, target_width: u32) -> (u32, u32) {
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 {
            return (target_width, target_width.min(FRAME_HEIGHT));
        }
        let (width, height) = (f64::from(width), f64::from(height));
        let scale = (f64::from(target_width) / width).min(f64::from(FRAME_HEIGHT) / height);
        let fit = |side: f64, bound: u32| ((side * scale).round() as u32).clamp(1, bound);
        (fit(width, target_width), fit(height, FRAME_HEIGHT))
    }

    /// Resize to fit `target_width` and the frame height (aspect preserved)
    /// and write a PNG to `path`.
    ///
    /// Returns the written layer's dimensions. This is blocking work; call
    /// it from `spawn_blocking` inside async code.
    pub fn write_layer(&self, path: &Path, target_width: u32) -> Result<(u32, u32), CoreError> {
        let (width, height) = self.layer_size(target_width);
        let resized = self.image.resize_exact(width, height, FilterType::Lanczos3);
        resized
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| CoreError::Internal(format!("Failed to write mascot layer: {e}")))?;
        Ok((width, height))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;
    use bytes::Bytes;
    use image::{Rgba, RgbaImage};

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Bytes {
        let img = RgbaImage::from_pixel(width, height, Rgba([0, 86, 179, 255]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        Bytes::from(buf.into_inner())
    }

    fn upload(name: &str, bytes: Bytes) -> MascotUpload {
        MascotUpload {
            file_name: Some(name.to_string()),
            bytes,
        }
    }

    #[test]
    fn decodes_png_upload() {
        let mascot = decode_mascot(&upload("mascot.png", png_bytes(40, 80))).unwrap();
        assert_eq!(mascot.dimensions(), (40, 80));
        assert_eq!(mascot.source_format(), ImageFormat::Png);
    }

    #[test]
    fn rejects_unsupported_extension() {
        let err = decode_mascot(&upload("mascot.bmp", png_bytes(4, 4))).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains(".bmp"));
    }

    #[test]
    fn rejects_non_image_bytes() {
        let err = decode_mascot(&upload("mascot.png", Bytes::from_static(b"not an image")));
        assert_matches!(err, Err(CoreError::Validation(_)));
    }

    #[test]
    fn layer_size_preserves_aspect_ratio() {
        let mascot = MascotImage::from_dynamic(DynamicImage::new_rgba8(1000, 500));
        assert_eq!(mascot.layer_size(648), (648, 324));
    }

    #[test]
    fn layer_size_upscales_small_images() {
        let mascot = MascotImage::from_dynamic(DynamicImage::new_rgba8(100, 200));
        assert_eq!(mascot.layer_size(648), (648, 1296));
    }

    #[test]
    fn layer_size_caps_tall_images_at_frame_height() {
        let mascot = MascotImage::from_dynamic(DynamicImage::new_rgba8(100, 300));
        assert_eq!(mascot.layer_size(648), (640, 1920));
    }

    #[test]
    fn layer_size_of_thin_sliver_stays_within_frame() {
        let mascot = MascotImage::from_dynamic(DynamicImage::new_rgba8(1, 2000));
        let (w, h) = mascot.layer_size(648);
        assert_eq!(h, FRAME_HEIGHT);
        assert_eq!(w, 1);
        assert!(u64::from(w) * u64::from(h) * 4 < 16 * 1024 * 1024);
    }

    #[test]
    fn write_layer_of_tall_upload_fits_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mascot.png");
        let mascot = decode_mascot(&upload("tall.png", png_bytes(1, 2000))).unwrap();

        let (w, h) = mascot.write_layer(&path, 648).unwrap();
        assert_eq!((w, h), (1, 1920));
        assert_eq!(image::open(&path).unwrap().dimensions(), (1, 1920));
    }

    #[test]
    fn write_layer_produces_resized_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mascot.png");
        let mascot = decode_mascot(&upload("m.png", png_bytes(200, 100))).unwrap();

        let (w, h) = mascot.write_layer(&path, 648).unwrap();
        assert_eq!((w, h), (648, 324));

        let written = image::open(&path).unwrap();
        assert_eq!(written.dimensions(), (648, 324));
    }
}
