//! Deterministic tensor construction for tests and benches.
//!
//! Burn 0.18 tensor constructors want `Into<TensorData>`, which runtime-sized
//! slices do not satisfy directly; the helpers here go through a rank-1
//! `from_floats` + `Shape` reshape so callers can build tensors of any rank
//! from plain `Vec<f32>` data.

use burn::{
    prelude::*,
    tensor::{backend::Backend, Tensor},
};

/// Builds an f32 tensor of the given shape from a flat row-major slice.
pub fn tensor_from_f32_vec<B: Backend, const D: usize>(
    data: &[f32],
    shape: &[usize],
    device: &B::Device,
) -> Tensor<B, D> {
    let expected_size: usize = shape.iter().product();
    assert_eq!(
        data.len(),
        expected_size,
        "Data length {} doesn't match shape {:?} (expected {})",
        data.len(),
        shape,
        expected_size
    );

    let data_vec: Vec<f32> = data.to_vec();
    let flat_tensor = Tensor::<B, 1>::from_floats(data_vec.as_slice(), device);
    flat_tensor.reshape(burn::tensor::Shape::from(shape))
}

/// A reproducible sine-pattern tensor, for inputs where the exact values do
/// not matter but runs must agree with each other.
pub fn sine_pattern_tensor<B: Backend, const D: usize>(
    shape: &[usize],
    device: &B::Device,
) -> Tensor<B, D> {
    let size: usize = shape.iter().product();
    let data: Vec<f32> = (0..size).map(|i| (i as f32 * 0.01).sin()).collect();
    tensor_from_f32_vec(data.as_slice(), shape, device)
}

/// A deterministic `[batch, locations, channels]` spatial feature map.
pub fn spatial_features<B: Backend>(
    batch_size: usize,
    num_locations: usize,
    num_channels: usize,
    device: &B::Device,
) -> Tensor<B, 3> {
    sine_pattern_tensor(&[batch_size, num_locations, num_channels], device)
}
