//! The normalized input tensor handed to the classifier.

use crate::core::constants::MODEL_INPUT_SHAPE;
use crate::core::errors::{RipenessError, RipenessResult};
use ndarray::{Array4, ArrayView4};

/// A single-image NHWC batch of shape `(1, 150, 150, 3)` with values in `[0, 1]`.
///
/// The shape and range are checked on construction, so every value of this
/// type satisfies the classifier's input contract.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTensor {
    data: Array4<f32>,
}

impl NormalizedTensor {
    /// Wraps an array, checking shape and value range.
    pub fn new(data: Array4<f32>) -> RipenessResult<Self> {
        if data.shape() != MODEL_INPUT_SHAPE {
            return Err(RipenessError::tensor_shape_mismatch(
                "normalized_tensor",
                &MODEL_INPUT_SHAPE,
                data.shape(),
                "classifier input",
            ));
        }

        if let Some(bad) = data
            .iter()
            .find(|v| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(RipenessError::InvalidInput {
                message: format!("normalized tensor value {bad} outside [0, 1]"),
            });
        }

        Ok(Self { data })
    }

    /// Returns the tensor shape, always [`MODEL_INPUT_SHAPE`].
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Borrows the underlying array.
    pub fn view(&self) -> ArrayView4<'_, f32> {
        self.data.view()
    }

    /// Consumes the tensor, returning the underlying array.
    pub fn into_array(self) -> Array4<f32> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_model_shape() {
        let tensor = NormalizedTensor::new(Array4::from_elem((1, 150, 150, 3), 0.5)).unwrap();
        assert_eq!(tensor.shape(), &[1, 150, 150, 3]);
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let err = NormalizedTensor::new(Array4::zeros((1, 3, 150, 150))).unwrap_err();
        assert!(matches!(err, RipenessError::TensorOperation { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut data = Array4::zeros((1, 150, 150, 3));
        data[[0, 10, 10, 1]] = 255.0;
        assert!(NormalizedTensor::new(data).is_err());
    }

    #[test]
    fn test_rejects_nan() {
        let mut data = Array4::zeros((1, 150, 150, 3));
        data[[0, 0, 0, 0]] = f32::NAN;
        assert!(NormalizedTensor::new(data).is_err());
    }
}
