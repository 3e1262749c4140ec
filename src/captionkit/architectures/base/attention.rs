//! Location-softmax attention shared by the caption cells.
//!
//! Every spatial location is scored by a single dense unit over the
//! concatenation of the image features at that location and a tiled query
//! (the recurrent state or output, depending on the cell). Scores are
//! normalized with softmax across locations, and the attended image vector
//! is the weighted sum of the features under that distribution.

use burn::module::Module;
use burn::nn::{Initializer, Linear, LinearConfig};
use burn::prelude::*;
use burn::tensor::{activation, backend::Backend, Tensor};

/// Single-unit dense scorer with softmax over the location axis.
#[derive(Module, Debug)]
pub struct LocationAttention<B: Backend> {
    scorer: Linear<B>,
}

impl<B: Backend> LocationAttention<B> {
    /// `d_input` is the per-location width of the scorer input: feature
    /// channels plus the tiled query width.
    pub fn new(d_input: usize, initializer: Initializer, device: &B::Device) -> Self {
        let scorer = LinearConfig::new(d_input, 1)
            .with_initializer(initializer)
            .init(device);
        Self { scorer }
    }

    /// Attention distribution over locations.
    ///
    /// `attention_inputs` is `[batch, locations, d_input]`; the result is
    /// `[batch, locations, 1]`, non-negative and summing to one over the
    /// location axis for every batch row.
    pub fn weights(&self, attention_inputs: Tensor<B, 3>) -> Tensor<B, 3> {
        activation::softmax(self.scorer.forward(attention_inputs), 1)
    }

    /// Weighted sum of `features` under the distribution computed from
    /// `attention_inputs`.
    ///
    /// `features` is `[batch, locations, channels]`; the attended vector is
    /// `[batch, channels]`, a convex combination of the per-location feature
    /// vectors.
    pub fn attend(&self, features: Tensor<B, 3>, attention_inputs: Tensor<B, 3>) -> Tensor<B, 2> {
        let weights = self.weights(attention_inputs);
        (features * weights).sum_dim(1).squeeze::<2>(1)
    }
}
