//! Image loading for caption pipelines.

use std::path::Path;

use burn::prelude::*;
use burn::tensor::{backend::Backend, Tensor, TensorData};

use super::error::DataError;

/// Reads an image file into a `[height, width, 3]` tensor of raw 0-255
/// channel values.
///
/// Non-RGB inputs (grayscale, RGBA, palette) are converted to RGB before
/// the copy; open and decode failures propagate as [`DataError::Image`].
pub fn load_image_from_path<B: Backend, P: AsRef<Path>>(
    path: P,
    device: &B::Device,
) -> Result<Tensor<B, 3>, DataError> {
    let decoded = image::open(path.as_ref())?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let pixels: Vec<f32> = rgb.into_raw().into_iter().map(f32::from).collect();
    let data = TensorData::new(pixels, [height as usize, width as usize, 3]);
    Ok(Tensor::from_data(data, device))
}
