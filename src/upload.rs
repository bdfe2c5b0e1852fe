use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::error::{Error, Result};

/// Decodes an uploaded JPEG or PNG file.
pub fn decode_upload(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(Error::Decode("the upload is empty".to_string()));
    }

    let format = image::guess_format(bytes)?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(Error::Decode(format!(
            "unsupported image format {format:?}, expected JPEG or PNG"
        )));
    }

    let image = image::load_from_memory_with_format(bytes, format)?;
    debug!(
        "Decoded {format:?} upload, {}x{} {:?}",
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn decodes_png_and_jpeg() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(10, 7, Rgb([1, 2, 3])));

        let png = decode_upload(&encode(&image, ImageFormat::Png)).unwrap();
        assert_eq!((png.width(), png.height()), (10, 7));

        let jpeg = decode_upload(&encode(&image, ImageFormat::Jpeg)).unwrap();
        assert_eq!((jpeg.width(), jpeg.height()), (10, 7));
    }

    #[test]
    fn rejects_empty_upload() {
        assert!(matches!(decode_upload(&[]), Err(Error::Decode(_))));
    }

    #[test]
    fn rejects_garbage() {
        let result = decode_upload(b"definitely not an image");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn rejects_other_formats() {
        // GIF header, the upload field only offers JPEG and PNG
        let result = decode_upload(b"GIF89a\x01\x00\x01\x00\x00\x00\x00;");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn rejects_truncated_png() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(16, 16, Rgb([9, 9, 9])));
        let bytes = encode(&image, ImageFormat::Png);
        let result = decode_upload(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
