//! Central square cropping.
//!
//! The classifier was trained on the middle of the photo, so every image is cut
//! down to a square covering [`CROP_FRACTION`] of its shorter side before it is
//! resized.

use crate::core::constants::CROP_FRACTION;
use crate::core::errors::ImageProcessError;
use image::DynamicImage;

/// Pixel rectangle selected by the central crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    /// Left edge, in pixels.
    pub x: u32,
    /// Top edge, in pixels.
    pub y: u32,
    /// Width and height of the square, in pixels.
    pub side: u32,
}

/// Central square cropping utilities.
pub struct ImageCropper;

impl ImageCropper {
    /// Computes the central square for an image of the given size.
    ///
    /// Both edges of the floating point box are rounded half-to-even on each
    /// axis, the way the photo was cropped when the model was trained. The
    /// side is `right - left` on the shorter axis and is reused for the longer
    /// one, so the result is always square and inside the image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageProcessError::EmptyImage`] if either side is zero.
    pub fn crop_box(width: u32, height: u32) -> Result<CropBox, ImageProcessError> {
        if width == 0 || height == 0 {
            return Err(ImageProcessError::EmptyImage { width, height });
        }

        let exact_side = width.min(height) as f64 * CROP_FRACTION;
        let edges = |dim: u32| -> (u32, u32) {
            let start = (dim as f64 - exact_side) / 2.0;
            let end = start + exact_side;
            (
                start.round_ties_even().max(0.0) as u32,
                (end.round_ties_even() as u32).min(dim),
            )
        };

        let (x0, x1) = edges(width);
        let (y0, y1) = edges(height);
        let side = (if width <= height { x1 - x0 } else { y1 - y0 }).max(1);

        Ok(CropBox {
            x: x0.min(width - side),
            y: y0.min(height - side),
            side,
        })
    }

    /// Returns a new image holding the central square of `image`.
    ///
    /// The input is left untouched.
    pub fn crop_center(image: &DynamicImage) -> Result<DynamicImage, ImageProcessError> {
        let CropBox { x, y, side } = Self::crop_box(image.width(), image.height())?;
        Ok(image.crop_imm(x, y, side, side))
    }
}
