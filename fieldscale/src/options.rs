//! Estimator configuration

use crate::{FieldscaleError, FieldscaleResult};
use fieldscale_filter::clahe::ClaheOptions;
use fieldscale_filter::diffusion::{DEFAULT_DIFFUSION_RADIUS, DEFAULT_ITERATIONS};
use fieldscale_filter::enhance::DEFAULT_GAMMA;
use fieldscale_filter::grid::GridShape;
use fieldscale_filter::suppress::{
    DEFAULT_MAX_DIFF, DEFAULT_MIN_DIFF, DEFAULT_SUPPRESSION_RADIUS, ScanOrder,
};
use fieldscale_filter::temporal::DEFAULT_TEMPORAL_ALPHA;

/// Options for [`Fieldscale`](crate::Fieldscale)
///
/// The defaults reproduce the reference parameters: an 8x8 grid,
/// suppression radius 2 with thresholds of 400 counts, seven diffusion
/// rounds of radius 1, gamma 1.5 and CLAHE with an 8x8 tile grid and
/// clip limit 2.0.
///
/// # Examples
///
/// ```
/// use fieldscale::FieldscaleOptions;
///
/// let options = FieldscaleOptions {
///     gamma: 0.0,
///     clahe: false,
///     ..Default::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldscaleOptions {
    /// Threshold for clipping high outliers in the max grid
    pub max_diff: f64,
    /// Threshold for clipping low outliers in the max grid
    pub min_diff: f64,
    /// Number of diffusion rounds (> 0)
    pub iteration: u32,
    /// Gamma exponent applied after rescaling; 0 disables
    pub gamma: f64,
    /// Apply local contrast equalization as the final stage
    pub clahe: bool,
    /// Blend bound fields with those of the previous frame
    pub video: bool,
    /// Grid laid over each frame
    pub grid: GridShape,
    /// Neighborhood radius for extrema suppression; values past the grid
    /// edge cover the whole grid
    pub suppression_radius: u32,
    /// Neighborhood radius for diffusion; values past the grid edge cover
    /// the whole grid
    pub diffusion_radius: u32,
    /// Weight of the current frame in video mode, in (0, 1]
    pub temporal_alpha: f64,
    /// Neighbor read policy during suppression
    pub scan_order: ScanOrder,
    /// Parameters of the built-in local contrast equalizer
    pub clahe_options: ClaheOptions,
}

impl Default for FieldscaleOptions {
    fn default() -> Self {
        Self {
            max_diff: DEFAULT_MAX_DIFF,
            min_diff: DEFAULT_MIN_DIFF,
            iteration: DEFAULT_ITERATIONS,
            gamma: DEFAULT_GAMMA,
            clahe: true,
            video: false,
            grid: GridShape::default(),
            suppression_radius: DEFAULT_SUPPRESSION_RADIUS,
            diffusion_radius: DEFAULT_DIFFUSION_RADIUS,
            temporal_alpha: DEFAULT_TEMPORAL_ALPHA,
            scan_order: ScanOrder::default(),
            clahe_options: ClaheOptions::default(),
        }
    }
}

impl FieldscaleOptions {
    /// Check every option
    ///
    /// # Errors
    ///
    /// Returns [`FieldscaleError::Configuration`] describing the first
    /// invalid option.
    pub fn validate(&self) -> FieldscaleResult<()> {
        if !self.max_diff.is_finite() || self.max_diff < 0.0 {
            return Err(config(format!("max_diff must be finite and >= 0, got {}", self.max_diff)));
        }
        if !self.min_diff.is_finite() || self.min_diff < 0.0 {
            return Err(config(format!("min_diff must be finite and >= 0, got {}", self.min_diff)));
        }
        if self.iteration == 0 {
            return Err(config("iteration must be > 0".to_string()));
        }
        if !self.gamma.is_finite() || self.gamma < 0.0 {
            return Err(config(format!(
                "gamma must be > 0, or 0 to disable, got {}",
                self.gamma
            )));
        }
        if !(self.temporal_alpha > 0.0 && self.temporal_alpha <= 1.0) {
            return Err(config(format!(
                "temporal_alpha must be in (0, 1], got {}",
                self.temporal_alpha
            )));
        }
        self.grid.validate()?;
        self.clahe_options.validate()?;
        Ok(())
    }
}

fn config(msg: String) -> FieldscaleError {
    FieldscaleError::Configuration(msg)
}
