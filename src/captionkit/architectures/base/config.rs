//! Hyperparameter configuration shared by the caption cells.

use burn::config::Config;
use burn::nn::Initializer;

/// Options forwarded to the wrapped language LSTM and the attention scorer.
///
/// The surface mirrors the wrapped recurrent unit: the cells add no
/// hyperparameters of their own beyond the spatial feature tensor supplied
/// at construction.
#[derive(Config, Debug)]
pub struct CaptionCellConfig {
    /// Hidden size of the wrapped language LSTM.
    pub num_units: usize,
    /// Whether the LSTM gates carry bias terms.
    #[config(default = true)]
    pub bias: bool,
    /// Weight initializer applied to the LSTM gates and the attention
    /// scorer.
    #[config(default = "Initializer::XavierNormal{gain:1.0}")]
    pub initializer: Initializer,
}

impl CaptionCellConfig {
    /// Rejects configurations that cannot produce a usable cell.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_units == 0 {
            return Err("num_units must be positive".to_string());
        }
        Ok(())
    }
}
