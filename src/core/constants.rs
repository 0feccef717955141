//! Fixed constants of the ripeness model.
//!
//! These values are tied to how the classifier was trained. Changing any of
//! them without retraining the model silently degrades accuracy.

/// Fraction of the shorter image side kept by the central crop.
pub const CROP_FRACTION: f64 = 0.6;

/// Height and width of the model input, in pixels.
pub const MODEL_INPUT_SIZE: u32 = 150;

/// Number of color channels in the model input.
pub const MODEL_INPUT_CHANNELS: usize = 3;

/// Batch size of a single classification request.
pub const MODEL_BATCH_SIZE: usize = 1;

/// Divisor mapping 8-bit channel values into `[0.0, 1.0]`.
pub const PIXEL_MAX_VALUE: f32 = 255.0;

/// Length of the classifier output vector.
pub const NUM_LABELS: usize = 5;

/// Shape of the normalized input tensor, NHWC.
pub const MODEL_INPUT_SHAPE: [usize; 4] = [
    MODEL_BATCH_SIZE,
    MODEL_INPUT_SIZE as usize,
    MODEL_INPUT_SIZE as usize,
    MODEL_INPUT_CHANNELS,
];

/// Name used for the ripeness model in logs and errors.
pub const DEFAULT_MODEL_NAME: &str = "banana_ripeness";
