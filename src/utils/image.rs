//! Image decoding helpers.

use crate::core::errors::{RipenessError, RipenessResult};
use image::DynamicImage;
use std::path::Path;

/// Decodes an image file. The format is guessed from the content.
pub fn load_image(path: impl AsRef<Path>) -> RipenessResult<DynamicImage> {
    let path = path.as_ref();
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;
    Ok(reader.decode()?)
}

/// Decodes an in-memory image, e.g. an uploaded file.
pub fn load_image_from_bytes(bytes: &[u8]) -> RipenessResult<DynamicImage> {
    if bytes.is_empty() {
        return Err(RipenessError::InvalidInput {
            message: "image data is empty".to_string(),
        });
    }
    Ok(image::load_from_memory(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = RgbImage::from_pixel(8, 6, Rgb([10, 200, 30]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_load_image_from_bytes() {
        let img = load_image_from_bytes(&png_bytes()).unwrap();
        assert_eq!((img.width(), img.height()), (8, 6));
        assert_eq!(img.to_rgb8().get_pixel(0, 0), &Rgb([10, 200, 30]));
    }

    #[test]
    fn test_load_image_from_path_ignores_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banana.upload");
        std::fs::write(&path, png_bytes()).unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!(img.width(), 8);
    }

    #[test]
    fn test_garbage_bytes_are_image_load_errors() {
        let err = load_image_from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, RipenessError::ImageLoad(_)));
    }

    #[test]
    fn test_empty_bytes_rejected() {
        assert!(matches!(
            load_image_from_bytes(&[]),
            Err(RipenessError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_image("does/not/exist.jpg").unwrap_err();
        assert!(matches!(err, RipenessError::Io(_)));
    }
}
