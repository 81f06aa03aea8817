//! Displayable image handles
//!
//! An `ImageHandle` is only ever built from bytes that decoded
//! successfully, so every handle in the gallery can be displayed.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use iced::widget::image::Handle;
use image::ImageFormat;
use std::fmt;

use crate::error::ResolveError;

/// Immutable, cheaply clonable image data
#[derive(Clone)]
pub struct ImageHandle {
    /// Shared with `widget`, so the image is held in memory once
    bytes: Bytes,
    format: ImageFormat,
    width: u32,
    height: u32,
    /// Created once so iced can cache the uploaded texture
    widget: Handle,
}

impl ImageHandle {
    /// Decode the bytes once to prove they are a displayable image
    pub fn decode(bytes: Vec<u8>) -> Result<Self, ResolveError> {
        let format = image::guess_format(&bytes).map_err(|_| ResolveError::UnsupportedFormat)?;

        let decoded = image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| ResolveError::Decode(e.to_string()))?;

        let bytes = Bytes::from(bytes);
        let widget = Handle::from_bytes(bytes.clone());

        Ok(Self {
            bytes,
            format,
            width: decoded.width(),
            height: decoded.height(),
            widget,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Pixel dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Encode as a `data:` URI
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), BASE64.encode(self.bytes()))
    }

    /// Handle for iced's image widget
    pub fn widget_handle(&self) -> Handle {
        self.widget.clone()
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.as_ptr() == other.bytes.as_ptr() || self.bytes == other.bytes
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{DynamicImage, RgbaImage};
    use std::io::Cursor;

    /// Encode a small PNG in memory
    pub(crate) fn sample_png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(width, height));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    pub(crate) fn sample_handle() -> ImageHandle {
        ImageHandle::decode(sample_png_bytes(2, 2)).unwrap()
    }

    #[test]
    fn test_decode_png() {
        let handle = ImageHandle::decode(sample_png_bytes(4, 3)).unwrap();
        assert_eq!(handle.format(), ImageFormat::Png);
        assert_eq!(handle.dimensions(), (4, 3));
        assert_eq!(handle.mime_type(), "image/png");
    }

    #[test]
    fn test_rejects_non_image_bytes() {
        let result = ImageHandle::decode(b"definitely not an image".to_vec());
        assert_eq!(result.unwrap_err(), ResolveError::UnsupportedFormat);
    }

    #[test]
    fn test_rejects_truncated_image() {
        let mut bytes = sample_png_bytes(8, 8);
        bytes.truncate(20);
        let result = ImageHandle::decode(bytes);
        assert!(matches!(result, Err(ResolveError::Decode(_))));
    }

    #[test]
    fn test_widget_handle_shares_buffer() {
        let handle = sample_handle();
        let copy = handle.clone();
        assert_eq!(copy.bytes().as_ptr(), handle.bytes().as_ptr());

        match handle.widget_handle() {
            Handle::Bytes(_, shared) => assert_eq!(shared.as_ptr(), handle.bytes().as_ptr()),
            other => panic!("expected a bytes handle, got {:?}", other),
        }
    }

    #[test]
    fn test_data_uri_prefix() {
        let handle = sample_handle();
        let uri = handle.to_data_uri();
        assert!(uri.starts_with("data:image/png;base64,"));
        let payload = uri.trim_start_matches("data:image/png;base64,");
        assert_eq!(BASE64.decode(payload).unwrap(), handle.bytes());
    }
}
