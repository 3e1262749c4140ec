//! The recurrent-cell contract shared by the caption architectures.
//!
//! A caption cell wraps a language LSTM together with a fixed per-example
//! spatial feature map and exposes the uniform `step` contract, so decode
//! drivers can unroll any attention mechanism interchangeably.

use burn::module::Module;
use burn::nn::LstmState;
use burn::prelude::*;
use burn::tensor::{backend::Backend, Tensor};

use super::show_attend_and_tell::ShowAttendAndTellCell;
use super::spatial_attention::SpatialAttentionCell;

/// A recurrent cell that attends over a spatial image feature map.
///
/// Implementations own their parameters and hold no step-to-step state;
/// the LSTM state is passed by value and replaced by the returned next
/// state.
pub trait ImageCaptionCell<B: Backend> {
    /// One decode step: `[batch, embedding]` and the previous state in,
    /// `[batch, output_size]` and the next state out.
    fn step(&self, inputs: Tensor<B, 2>, state: LstmState<B, 2>)
        -> (Tensor<B, 2>, LstmState<B, 2>);

    /// Hidden size of the wrapped language LSTM. The cells add no state of
    /// their own.
    fn state_size(&self) -> usize;

    /// Width of the per-step output: LSTM output plus attended image
    /// channels.
    fn output_size(&self) -> usize;

    /// The per-example feature map this cell attends over,
    /// `[batch, locations, channels]`.
    fn spatial_image_features(&self) -> &Tensor<B, 3>;

    /// Channel count of the feature map.
    fn num_image_features(&self) -> usize {
        self.spatial_image_features().dims()[2]
    }

    /// Zeroed LSTM state for a batch.
    fn zero_state(&self, batch_size: usize, device: &B::Device) -> LstmState<B, 2> {
        LstmState::new(
            Tensor::zeros([batch_size, self.state_size()], device),
            Tensor::zeros([batch_size, self.state_size()], device),
        )
    }

    /// Drives `step` across the time axis of `inputs`.
    ///
    /// `inputs` is `[batch, steps, embedding]`; per-step outputs are stacked
    /// into `[batch, steps, output_size]` and returned with the final state.
    /// A missing initial state starts from zeros.
    fn unroll(
        &self,
        inputs: Tensor<B, 3>,
        state: Option<LstmState<B, 2>>,
    ) -> (Tensor<B, 3>, LstmState<B, 2>) {
        let [batch_size, steps, d_embedding] = inputs.dims();
        let device = inputs.device();
        let mut state = state.unwrap_or_else(|| self.zero_state(batch_size, &device));

        let mut outputs = Vec::with_capacity(steps);
        for t in 0..steps {
            let step_inputs = inputs
                .clone()
                .slice([0..batch_size, t..t + 1, 0..d_embedding])
                .squeeze::<2>(1);
            let (output, next_state) = self.step(step_inputs, state);
            state = next_state;
            outputs.push(output.unsqueeze_dim::<3>(1));
        }

        (Tensor::cat(outputs, 1), state)
    }
}

/// The attention mechanisms this crate ships, behind one dispatchable type.
#[derive(Module, Debug)]
pub enum CaptionCell<B: Backend> {
    /// Attention conditioned on the previous state, computed before the
    /// LSTM update.
    ShowAttendAndTell(ShowAttendAndTellCell<B>),
    /// LSTM update first, attention conditioned on the new output.
    SpatialAttention(SpatialAttentionCell<B>),
}

impl<B: Backend> ImageCaptionCell<B> for CaptionCell<B> {
    fn step(
        &self,
        inputs: Tensor<B, 2>,
        state: LstmState<B, 2>,
    ) -> (Tensor<B, 2>, LstmState<B, 2>) {
        match self {
            CaptionCell::ShowAttendAndTell(cell) => cell.step(inputs, state),
            CaptionCell::SpatialAttention(cell) => cell.step(inputs, state),
        }
    }

    fn state_size(&self) -> usize {
        match self {
            CaptionCell::ShowAttendAndTell(cell) => cell.state_size(),
            CaptionCell::SpatialAttention(cell) => cell.state_size(),
        }
    }

    fn output_size(&self) -> usize {
        match self {
            CaptionCell::ShowAttendAndTell(cell) => cell.output_size(),
            CaptionCell::SpatialAttention(cell) => cell.output_size(),
        }
    }

    fn spatial_image_features(&self) -> &Tensor<B, 3> {
        match self {
            CaptionCell::ShowAttendAndTell(cell) => cell.spatial_image_features(),
            CaptionCell::SpatialAttention(cell) => cell.spatial_image_features(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::config::CaptionCellConfig;
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    fn feature_map(
        batch: usize,
        locations: usize,
        channels: usize,
    ) -> Tensor<TestBackend, 3> {
        let device = Default::default();
        let data: Vec<f32> = (0..batch * locations * channels)
            .map(|i| (i as f32 * 0.11).cos())
            .collect();
        Tensor::<TestBackend, 1>::from_floats(data.as_slice(), &device)
            .reshape([batch, locations, channels])
    }

    #[test]
    fn test_enum_dispatch_matches_inner_cell_sizes() {
        let device = Default::default();
        let config = CaptionCellConfig::new(16);

        let show = CaptionCell::ShowAttendAndTell(ShowAttendAndTellCell::new(
            8,
            &config,
            feature_map(2, 5, 12),
            &device,
        ));
        let spatial = CaptionCell::SpatialAttention(SpatialAttentionCell::new(
            8,
            &config,
            feature_map(2, 5, 12),
            &device,
        ));

        for cell in [&show, &spatial] {
            assert_eq!(cell.state_size(), 16);
            assert_eq!(cell.output_size(), 16 + 12);
            assert_eq!(cell.num_image_features(), 12);
            assert_eq!(cell.spatial_image_features().dims(), [2, 5, 12]);
        }
    }

    #[test]
    fn test_zero_state_shapes() {
        let device = Default::default();
        let config = CaptionCellConfig::new(10);
        let cell = CaptionCell::SpatialAttention(SpatialAttentionCell::new(
            4,
            &config,
            feature_map(3, 2, 6),
            &device,
        ));

        let state = cell.zero_state(3, &device);
        assert_eq!(state.cell.dims(), [3, 10]);
        assert_eq!(state.hidden.dims(), [3, 10]);

        let values: Vec<f32> = state.hidden.into_data().to_vec().unwrap();
        assert!(values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_unroll_stacks_step_outputs() {
        let device = Default::default();
        let config = CaptionCellConfig::new(6);
        let cell = CaptionCell::ShowAttendAndTell(ShowAttendAndTellCell::new(
            3,
            &config,
            feature_map(2, 4, 5),
            &device,
        ));

        let embeddings_data: Vec<f32> = (0..2 * 7 * 3).map(|i| (i as f32 * 0.05).sin()).collect();
        let embeddings = Tensor::<TestBackend, 1>::from_floats(embeddings_data.as_slice(), &device)
            .reshape([2, 7, 3]);

        let (outputs, final_state) = cell.unroll(embeddings.clone(), None);
        assert_eq!(outputs.dims(), [2, 7, cell.output_size()]);
        assert_eq!(final_state.hidden.dims(), [2, 6]);

        // The unrolled sequence must agree with stepping by hand.
        let mut state = cell.zero_state(2, &device);
        for t in 0..7 {
            let step_inputs = embeddings
                .clone()
                .slice([0..2, t..t + 1, 0..3])
                .squeeze::<2>(1);
            let (step_output, next_state) = cell.step(step_inputs, state);
            state = next_state;

            let unrolled_step: Vec<f32> = outputs
                .clone()
                .slice([0..2, t..t + 1, 0..cell.output_size()])
                .squeeze::<2>(1)
                .into_data()
                .to_vec()
                .unwrap();
            let manual_step: Vec<f32> = step_output.into_data().to_vec().unwrap();
            for (a, b) in unrolled_step.iter().zip(manual_step.iter()) {
                assert!((a - b).abs() < 1e-6, "unroll diverges at step {}", t);
            }
        }
    }
}
