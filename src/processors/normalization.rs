//! Image normalization for the ripeness classifier.
//!
//! [`ImageNormalizer`] chains RGB conversion, resizing and pixel scaling into
//! the exact input the classifier expects.

use crate::core::constants::{MODEL_INPUT_CHANNELS, MODEL_INPUT_SIZE, PIXEL_MAX_VALUE};
use crate::core::errors::{ProcessingStage, RipenessError, RipenessResult};
use crate::core::tensor::NormalizedTensor;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use ndarray::Array4;

/// Turns a cropped image into the classifier's input tensor.
///
/// Steps: convert to 3-channel RGB, resize to
/// [`MODEL_INPUT_SIZE`]×[`MODEL_INPUT_SIZE`] with bicubic (Catmull-Rom)
/// filtering, divide by 255, add the batch axis.
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    target_size: u32,
    filter: FilterType,
}

impl ImageNormalizer {
    /// Creates the normalizer matching the trained model.
    pub fn new() -> Self {
        Self {
            target_size: MODEL_INPUT_SIZE,
            filter: FilterType::CatmullRom,
        }
    }

    /// Resizes `image` to the model resolution, converting it to RGB first.
    ///
    /// Alpha is dropped and grayscale is expanded to three equal channels.
    pub fn resize(&self, image: &DynamicImage) -> RgbImage {
        let rgb = image.to_rgb8();
        if rgb.dimensions() == (self.target_size, self.target_size) {
            return rgb;
        }
        imageops::resize(&rgb, self.target_size, self.target_size, self.filter)
    }

    /// Scales every channel of `img` by 1/255 into a `(1, H, W, 3)` array.
    pub fn to_array(&self, img: &RgbImage) -> RipenessResult<Array4<f32>> {
        let (width, height) = img.dimensions();
        let values: Vec<f32> = img
            .as_raw()
            .iter()
            .map(|&v| v as f32 / PIXEL_MAX_VALUE)
            .collect();

        Array4::from_shape_vec(
            (1, height as usize, width as usize, MODEL_INPUT_CHANNELS),
            values,
        )
        .map_err(|e| {
            RipenessError::processing(
                ProcessingStage::Normalization,
                format!("building {width}x{height} tensor"),
                e,
            )
        })
    }

    /// Produces the validated `(1, 150, 150, 3)` tensor for `image`.
    pub fn normalize(&self, image: &DynamicImage) -> RipenessResult<NormalizedTensor> {
        if image.width() == 0 || image.height() == 0 {
            return Err(RipenessError::InvalidInput {
                message: format!(
                    "cannot normalize an empty image ({}x{})",
                    image.width(),
                    image.height()
                ),
            });
        }

        let resized = self.resize(image);
        let array = self.to_array(&resized)?;
        NormalizedTensor::new(array)
    }
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};

    #[test]
    fn test_output_shape_and_range() {
        let img = RgbImage::from_fn(213, 97, |x, y| {
            Rgb([(x % 256) as u8, (y * 2 % 256) as u8, ((x + y) % 256) as u8])
        });
        let tensor = ImageNormalizer::new()
            .normalize(&DynamicImage::ImageRgb8(img))
            .unwrap();

        assert_eq!(tensor.shape(), &[1, 150, 150, 3]);
        assert!(tensor.view().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_flat_color_maps_to_value_over_255() {
        let img = RgbImage::from_pixel(180, 180, Rgb([200, 100, 50]));
        let tensor = ImageNormalizer::new()
            .normalize(&DynamicImage::ImageRgb8(img))
            .unwrap();

        let expected = [200.0 / 255.0, 100.0 / 255.0, 50.0 / 255.0];
        for ((_, _, _, c), &value) in tensor.view().indexed_iter() {
            assert_eq!(value, expected[c]);
        }
    }

    #[test]
    fn test_extreme_values() {
        let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(150, 150, Rgb([0, 0, 0])));
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(150, 150, Rgb([255, 255, 255])));
        let normalizer = ImageNormalizer::new();

        let black = normalizer.normalize(&black).unwrap();
        let white = normalizer.normalize(&white).unwrap();
        assert!(black.view().iter().all(|&v| v == 0.0));
        assert!(white.view().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_alpha_channel_is_dropped() {
        let img = RgbaImage::from_pixel(40, 40, Rgba([255, 0, 0, 10]));
        let tensor = ImageNormalizer::new()
            .normalize(&DynamicImage::ImageRgba8(img))
            .unwrap();

        assert_eq!(tensor.shape()[3], 3);
        assert_eq!(tensor.view()[[0, 75, 75, 0]], 1.0);
        assert_eq!(tensor.view()[[0, 75, 75, 2]], 0.0);
    }

    #[test]
    fn test_grayscale_is_expanded() {
        let img = GrayImage::from_pixel(60, 60, Luma([51]));
        let tensor = ImageNormalizer::new()
            .normalize(&DynamicImage::ImageLuma8(img))
            .unwrap();

        let expected = 51.0 / 255.0;
        for c in 0..3 {
            assert_eq!(tensor.view()[[0, 0, 0, c]], expected);
        }
    }

    #[test]
    fn test_to_array_keeps_hwc_layout() {
        let img = RgbImage::from_fn(2, 1, |x, _| Rgb([255 * x as u8, 0, 51]));
        let array = ImageNormalizer::new().to_array(&img).unwrap();

        assert_eq!(array.shape(), &[1, 1, 2, 3]);
        assert_eq!(array[[0, 0, 0, 0]], 0.0);
        assert_eq!(array[[0, 0, 1, 0]], 1.0);
        assert_eq!(array[[0, 0, 1, 2]], 51.0 / 255.0);
    }
}
