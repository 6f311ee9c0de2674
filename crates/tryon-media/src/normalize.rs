//! Decode, color-normalize, resize and encode images.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageOutputFormat};
use tracing::debug;
use tryon_models::EncodedImage;

use crate::config::MediaConfig;
use crate::error::{MediaError, MediaResult};

/// MIME type of every encoded payload.
pub const ENCODED_MIME_TYPE: &str = "image/jpeg";

/// Pixel layout of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
    /// 16-bit or floating point layouts
    Other,
}

impl ColorMode {
    fn from_color_type(color: ColorType) -> Self {
        match color {
            ColorType::L8 => ColorMode::Gray,
            ColorType::La8 => ColorMode::GrayAlpha,
            ColorType::Rgb8 => ColorMode::Rgb,
            ColorType::Rgba8 => ColorMode::Rgba,
            _ => ColorMode::Other,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, ColorMode::GrayAlpha | ColorMode::Rgba)
    }
}

/// In-memory bitmap owned by a single submission.
#[derive(Debug, Clone)]
pub struct Image {
    inner: DynamicImage,
}

impl Image {
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    pub fn color_mode(&self) -> ColorMode {
        ColorMode::from_color_type(self.inner.color())
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.inner
    }
}

impl From<DynamicImage> for Image {
    fn from(inner: DynamicImage) -> Self {
        Self { inner }
    }
}

/// Decode raw bytes and convert to a layout the API accepts.
///
/// Alpha, palette and high bit-depth images become 8-bit RGB. 8-bit grayscale
/// and RGB pass through.
pub fn normalize(raw: &[u8]) -> MediaResult<Image> {
    let decoded = image::load_from_memory(raw).map_err(|e| MediaError::decode(e.to_string()))?;

    let mode = ColorMode::from_color_type(decoded.color());
    let inner = match mode {
        ColorMode::Gray | ColorMode::Rgb => decoded,
        _ => {
            debug!("Converting {:?} image to RGB", mode);
            DynamicImage::ImageRgb8(decoded.to_rgb8())
        }
    };

    Ok(Image { inner })
}

/// Size an image of `width` x `height` is scaled to so that neither side
/// exceeds `max_dimension`.
///
/// The longest side becomes exactly `max_dimension`; the other side is
/// floored and never below one pixel.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dimension {
        return (width, height);
    }

    let scale = |side: u32| -> u32 {
        let scaled = u64::from(side) * u64::from(max_dimension) / u64::from(longest);
        (scaled as u32).max(1)
    };

    if width >= height {
        (max_dimension, scale(height))
    } else {
        (scale(width), max_dimension)
    }
}

/// Downsample so that the longest side is at most `max_dimension`.
/// Images already within bounds are returned untouched.
pub fn resize(image: Image, max_dimension: u32) -> Image {
    let (width, height) = image.dimensions();
    let (new_width, new_height) = target_dimensions(width, height, max_dimension);

    if (new_width, new_height) == (width, height) {
        return image;
    }

    debug!(
        "Resizing image {}x{} -> {}x{}",
        width, height, new_width, new_height
    );

    Image {
        inner: image
            .inner
            .resize_exact(new_width, new_height, FilterType::Lanczos3),
    }
}

/// Serialize to JPEG at `quality`.
pub fn encode(image: &Image, quality: u8) -> MediaResult<EncodedImage> {
    let mut buf = Vec::new();
    image
        .inner
        .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Jpeg(quality))?;

    Ok(EncodedImage::new(ENCODED_MIME_TYPE, buf))
}

/// Configured decode → normalize → resize → encode pipeline.
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    max_dimension: u32,
    jpeg_quality: u8,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::new(&MediaConfig::default())
    }
}

impl ImageNormalizer {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            max_dimension: config.max_dimension,
            jpeg_quality: config.jpeg_quality,
        }
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    pub fn normalize(&self, raw: &[u8]) -> MediaResult<Image> {
        normalize(raw)
    }

    pub fn resize(&self, image: Image) -> Image {
        resize(image, self.max_dimension)
    }

    pub fn encode(&self, image: &Image) -> MediaResult<EncodedImage> {
        encode(image, self.jpeg_quality)
    }

    /// Decode and resize for display only.
    pub fn preview(&self, raw: &[u8]) -> MediaResult<Image> {
        Ok(self.resize(self.normalize(raw)?))
    }

    /// Full pipeline; returns the preview image and its inline payload.
    pub fn prepare(&self, raw: &[u8]) -> MediaResult<(Image, EncodedImage)> {
        let image = self.preview(raw)?;
        let encoded = self.encode(&image)?;

        debug!(
            width = image.width(),
            height = image.height(),
            bytes = encoded.len(),
            "Encoded image"
        );

        Ok((image, encoded))
    }

    /// [`ImageNormalizer::preview`] on a blocking thread.
    ///
    /// Decoding and Lanczos resampling of multi-megapixel photos would
    /// otherwise stall the async runtime.
    pub async fn preview_async(&self, raw: Vec<u8>) -> MediaResult<Image> {
        let normalizer = self.clone();
        tokio::task::spawn_blocking(move || normalizer.preview(&raw))
            .await
            .map_err(|e| MediaError::internal(format!("Blocking task join error: {}", e)))?
    }

    /// [`ImageNormalizer::prepare`] on a blocking thread.
    pub async fn prepare_async(&self, raw: Vec<u8>) -> MediaResult<(Image, EncodedImage)> {
        let normalizer = self.clone();
        tokio::task::spawn_blocking(move || normalizer.prepare(&raw))
            .await
            .map_err(|e| MediaError::internal(format!("Blocking task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, LumaA, Rgb, Rgba};

    fn png_bytes(image: DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .unwrap();
        buf
    }

    fn rgb_image(width: u32, height: u32) -> Image {
        Image::from(DynamicImage::ImageRgb8(ImageBuffer::from_pixel(
            width,
            height,
            Rgb([120, 30, 200]),
        )))
    }

    #[test]
    fn test_normalize_drops_alpha() {
        let rgba = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(8, 4, Rgba([1, 2, 3, 128])));
        let image = normalize(&png_bytes(rgba)).unwrap();

        assert_eq!(image.color_mode(), ColorMode::Rgb);
        assert!(!image.color_mode().has_alpha());
        assert_eq!(image.dimensions(), (8, 4));
    }

    #[test]
    fn test_normalize_drops_gray_alpha() {
        let la = DynamicImage::ImageLumaA8(ImageBuffer::from_pixel(6, 3, LumaA([90, 40])));
        let image = normalize(&png_bytes(la)).unwrap();

        assert_eq!(image.color_mode(), ColorMode::Rgb);
        assert_eq!(image.dimensions(), (6, 3));
    }

    #[test]
    fn test_normalize_converts_palette_image() {
        // GIF is always palette based.
        let source = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(7, 5, Rgb([255, 0, 0])));
        let mut gif = Vec::new();
        source
            .write_to(&mut Cursor::new(&mut gif), ImageOutputFormat::Gif)
            .unwrap();

        let image = normalize(&gif).unwrap();
        assert_eq!(image.color_mode(), ColorMode::Rgb);
        assert_eq!(image.dimensions(), (7, 5));
        assert!(encode(&image, 85).is_ok());
    }

    #[tokio::test]
    async fn test_prepare_async_matches_sync() {
        let bytes = png_bytes(DynamicImage::new_rgba8(2000, 1000));
        let normalizer = ImageNormalizer::default();

        let (image, encoded) = normalizer.prepare_async(bytes.clone()).await.unwrap();
        assert_eq!(image.dimensions(), (1024, 512));
        assert_eq!(encoded.mime_type(), "image/jpeg");

        let preview = normalizer.preview_async(bytes).await.unwrap();
        assert_eq!(preview.dimensions(), (1024, 512));

        let err = normalizer.prepare_async(b"junk".to_vec()).await.unwrap_err();
        assert!(matches!(err, MediaError::Decode(_)));
    }

    #[test]
    fn test_normalize_keeps_gray() {
        let gray = DynamicImage::new_luma8(5, 5);
        let image = normalize(&png_bytes(gray)).unwrap();
        assert_eq!(image.color_mode(), ColorMode::Gray);
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let err = normalize(b"definitely not an image").unwrap_err();
        assert!(matches!(err, MediaError::Decode(_)));
        assert_eq!(err.kind(), "decode");
    }

    #[test]
    fn test_normalize_rejects_truncated_png() {
        let bytes = png_bytes(DynamicImage::new_rgb8(32, 32));
        let err = normalize(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, MediaError::Decode(_)));
    }

    #[test]
    fn test_target_dimensions_within_bounds() {
        for (w, h) in [(1, 1), (1024, 1024), (1024, 10), (640, 480), (3, 1024)] {
            assert_eq!(target_dimensions(w, h, 1024), (w, h));
        }
    }

    #[test]
    fn test_target_dimensions_over_bounds() {
        for (w, h) in [
            (2048, 1000),
            (1000, 3000),
            (1025, 1025),
            (4032, 3024),
            (3000, 7),
            (1025, 1),
            (99_999, 1234),
        ] {
            let (nw, nh) = target_dimensions(w, h, 1024);
            assert_eq!(nw.max(nh), 1024, "{}x{}", w, h);

            let expected = f64::from(w) / f64::from(h);
            if nw >= nh {
                let ideal = f64::from(nw) / expected;
                assert!((f64::from(nh) - ideal).abs() <= 1.0, "{}x{}", w, h);
            } else {
                let ideal = f64::from(nh) * expected;
                assert!((f64::from(nw) - ideal).abs() <= 1.0, "{}x{}", w, h);
            }
        }
    }

    #[test]
    fn test_target_dimensions_never_zero() {
        assert_eq!(target_dimensions(5000, 1, 1024), (1024, 1));
        assert_eq!(target_dimensions(1, 5000, 1024), (1, 1024));
    }

    #[test]
    fn test_resize_identity() {
        let image = rgb_image(800, 600);
        let resized = resize(image, 1024);
        assert_eq!(resized.dimensions(), (800, 600));
    }

    #[test]
    fn test_resize_downsamples() {
        let resized = resize(rgb_image(2048, 1000), 1024);
        assert_eq!(resized.dimensions(), (1024, 500));

        let resized = resize(rgb_image(1000, 3000), 1024);
        assert_eq!(resized.dimensions(), (341, 1024));
    }

    #[test]
    fn test_encode_roundtrip_dimensions() {
        let image = rgb_image(300, 170);
        let encoded = encode(&image, 85).unwrap();
        assert_eq!(encoded.mime_type(), "image/jpeg");

        let data_url = encoded.to_data_url();
        assert!(data_url.starts_with("data:image/jpeg;base64,"));

        let parsed = EncodedImage::from_data_url(&data_url).unwrap();
        let decoded = image::load_from_memory(parsed.bytes()).unwrap();
        assert_eq!(decoded.dimensions(), (300, 170));
    }

    #[test]
    fn test_prepare_pipeline() {
        let rgba = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
            1500,
            500,
            Rgba([10, 20, 30, 0]),
        ));
        let normalizer = ImageNormalizer::default();
        let (image, encoded) = normalizer.prepare(&png_bytes(rgba)).unwrap();

        assert_eq!(image.dimensions(), (1024, 341));
        assert_eq!(image.color_mode(), ColorMode::Rgb);

        let decoded = image::load_from_memory(encoded.bytes()).unwrap();
        assert_eq!(decoded.dimensions(), (1024, 341));
    }
}
