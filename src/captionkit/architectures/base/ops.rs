//! Axis-manipulation helpers shared by the caption architectures.

use burn::prelude::*;
use burn::tensor::{backend::Backend, Tensor};

/// Inserts a new axis at `axis` and repeats the tensor along it.
///
/// The output rank `D2` must be `D + 1`. Inserting several axes is done by
/// chaining calls, innermost insertion first. The caption cells use this to
/// broadcast a `[batch, query]` attention query over every spatial location,
/// producing `[batch, locations, query]`.
pub fn tile_with_new_axis<B: Backend, const D: usize, const D2: usize>(
    tensor: Tensor<B, D>,
    axis: usize,
    repeats: usize,
) -> Tensor<B, D2> {
    assert_eq!(
        D2,
        D + 1,
        "tile_with_new_axis inserts exactly one axis (got rank {} -> {})",
        D,
        D2
    );
    assert!(
        axis <= D,
        "axis {} out of range for rank-{} tensor",
        axis,
        D
    );

    let mut times = vec![1; D2];
    times[axis] = repeats;
    tensor.unsqueeze_dim::<D2>(axis).repeat(&times)
}

/// Merges a run of axes into a single axis placed at the first named
/// position.
///
/// `axes` must be adjacent and ascending; the merged axis has the product of
/// their sizes. Useful for flattening a `[batch, h, w, channels]` feature
/// grid into the `[batch, locations, channels]` layout the cells consume.
pub fn collapse_dims<B: Backend, const D: usize, const D2: usize>(
    tensor: Tensor<B, D>,
    axes: &[usize],
) -> Tensor<B, D2> {
    assert!(!axes.is_empty(), "collapse_dims requires at least one axis");
    assert!(
        axes.windows(2).all(|pair| pair[1] == pair[0] + 1),
        "collapse_dims axes must be adjacent and ascending, got {:?}",
        axes
    );
    let first = axes[0];
    let last = axes[axes.len() - 1];
    assert!(
        last < D,
        "axis {} out of range for rank-{} tensor",
        last,
        D
    );
    assert_eq!(
        D2,
        D - axes.len() + 1,
        "collapse_dims merges {} axes of a rank-{} tensor into rank {}",
        axes.len(),
        D,
        D - axes.len() + 1
    );

    tensor.flatten(first, last)
}
