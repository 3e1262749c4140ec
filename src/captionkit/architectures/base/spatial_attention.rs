//! Spatial Attention decoder cell (Lu et al.,
//! <https://arxiv.org/abs/1612.01887>).
//!
//! The language LSTM updates FIRST, fed the mean image feature alongside the
//! token embedding; attention is then conditioned on the fresh LSTM output.

use burn::module::Module;
use burn::nn::{Lstm, LstmConfig, LstmState};
use burn::prelude::*;
use burn::tensor::{backend::Backend, Tensor};

use super::attention::LocationAttention;
use super::cell::ImageCaptionCell;
use super::config::CaptionCellConfig;
use super::ops::tile_with_new_axis;

/// Update-then-attend caption cell.
#[derive(Module, Debug)]
pub struct SpatialAttentionCell<B: Backend> {
    language_lstm: Lstm<B>,
    attention: LocationAttention<B>,
    /// Per-example feature map, fixed for the life of the cell.
    #[module(skip)]
    spatial_image_features: Tensor<B, 3>,
    #[module(skip)]
    num_units: usize,
}

impl<B: Backend> SpatialAttentionCell<B> {
    /// Builds the cell around `spatial_image_features`
    /// (`[batch, locations, channels]`).
    ///
    /// The language LSTM consumes the per-channel feature mean concatenated
    /// with a `d_embedding`-wide token embedding; the attention scorer sees
    /// the features concatenated with the tiled fresh LSTM output.
    pub fn new(
        d_embedding: usize,
        config: &CaptionCellConfig,
        spatial_image_features: Tensor<B, 3>,
        device: &B::Device,
    ) -> Self {
        let [_, _, num_image_features] = spatial_image_features.dims();
        let num_units = config.num_units;

        let language_lstm = LstmConfig::new(num_image_features + d_embedding, num_units, config.bias)
            .with_initializer(config.initializer.clone())
            .init(device);
        let attention = LocationAttention::new(
            num_image_features + num_units,
            config.initializer.clone(),
            device,
        );

        Self {
            language_lstm,
            attention,
            spatial_image_features,
            num_units,
        }
    }
}

impl<B: Backend> ImageCaptionCell<B> for SpatialAttentionCell<B> {
    fn step(
        &self,
        inputs: Tensor<B, 2>,
        state: LstmState<B, 2>,
    ) -> (Tensor<B, 2>, LstmState<B, 2>) {
        let [batch_size, locations, _] = self.spatial_image_features.dims();
        assert_eq!(
            inputs.dims()[0],
            batch_size,
            "input batch does not match the feature map batch"
        );

        let mean_features = self
            .spatial_image_features
            .clone()
            .mean_dim(1)
            .squeeze::<2>(1);
        let lstm_inputs = Tensor::cat(vec![mean_features, inputs], 1);
        let (outputs, next_state) = self
            .language_lstm
            .forward(lstm_inputs.unsqueeze_dim::<3>(1), Some(state));
        let outputs = outputs.squeeze::<2>(1);

        // Query the feature map with the output of this step.
        let tiled_query: Tensor<B, 3> = tile_with_new_axis(outputs.clone(), 1, locations);
        let attention_inputs =
            Tensor::cat(vec![self.spatial_image_features.clone(), tiled_query], 2);
        let attended = self
            .attention
            .attend(self.spatial_image_features.clone(), attention_inputs);

        (Tensor::cat(vec![attended, outputs], 1), next_state)
    }

    fn state_size(&self) -> usize {
        self.num_units
    }

    fn output_size(&self) -> usize {
        self.num_units + self.num_image_features()
    }

    fn spatial_image_features(&self) -> &Tensor<B, 3> {
        &self.spatial_image_features
    }
}
