//! The Fieldscale estimator
//!
//! Runs the full pipeline on one frame:
//!
//! ```text
//! grid min/max -> suppress max grid (high, then low) -> diffuse
//!   -> resample to frame size -> [temporal blend] -> rescale
//!   -> [gamma] -> [local contrast]
//! ```
//!
//! All stages except the temporal blend are pure. In video mode the
//! estimator keeps the fields used for the last frame; they are replaced
//! only after a frame has been fully processed, so a failed call leaves
//! the sequence state untouched.

use crate::{FieldscaleOptions, FieldscaleResult};
use fieldscale_core::{Grid, Pix};
use fieldscale_filter::clahe::{Clahe, LocalContrast};
use fieldscale_filter::diffusion::{Direction, diffuse};
use fieldscale_filter::enhance::gamma_correct;
use fieldscale_filter::grid::gridwise_min_max;
use fieldscale_filter::rescale::rescale_with_fields;
use fieldscale_filter::suppress::{Extrema, suppress_local_extrema};
use fieldscale_filter::temporal::{BoundFields, TemporalBlender};
use fieldscale_transform::resize_linear_to;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Adaptive rescaler for high bit depth thermal frames
///
/// # Examples
///
/// ```
/// use fieldscale::{Fieldscale, FieldscaleOptions, Pix, PixelDepth};
///
/// let mut fs = Fieldscale::new(FieldscaleOptions::default()).unwrap();
/// let samples = vec![21000u32; 64 * 48];
/// let frame = Pix::from_samples(64, 48, PixelDepth::Bit16, &samples).unwrap();
/// let out = fs.process(&frame).unwrap();
/// assert_eq!(out.depth(), PixelDepth::Bit8);
/// assert_eq!(out.dimensions(), (64, 48));
/// ```
pub struct Fieldscale {
    options: FieldscaleOptions,
    local_contrast: Box<dyn LocalContrast>,
    blender: TemporalBlender,
}

impl fmt::Debug for Fieldscale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fieldscale")
            .field("options", &self.options)
            .field("blender", &self.blender)
            .finish_non_exhaustive()
    }
}

impl Fieldscale {
    /// Create an estimator
    ///
    /// # Errors
    ///
    /// Returns [`FieldscaleError::Configuration`](crate::FieldscaleError::Configuration)
    /// if the options are invalid.
    pub fn new(options: FieldscaleOptions) -> FieldscaleResult<Self> {
        options.validate()?;
        let local_contrast = Box::new(Clahe::new(options.clahe_options)?);
        let blender = TemporalBlender::new(options.temporal_alpha)?;
        Ok(Self {
            options,
            local_contrast,
            blender,
        })
    }

    /// Replace the local contrast equalizer used when `clahe` is enabled
    pub fn with_local_contrast(mut self, local_contrast: impl LocalContrast + 'static) -> Self {
        self.local_contrast = Box::new(local_contrast);
        self
    }

    /// Options in use
    pub fn options(&self) -> &FieldscaleOptions {
        &self.options
    }

    /// Fields used for the previous frame (video mode only)
    pub fn previous_fields(&self) -> Option<&BoundFields> {
        self.blender.previous()
    }

    /// Forget the previous frame and start a new sequence
    pub fn reset(&mut self) {
        self.blender.reset();
    }

    /// Compute the suppressed and diffused `(min_grid, max_grid)`
    ///
    /// Does not touch the temporal state.
    pub fn estimate_grids(&self, pix: &Pix) -> FieldscaleResult<(Grid, Grid)> {
        let opts = &self.options;
        let (min_grid, mut max_grid) = gridwise_min_max(pix, opts.grid)?;

        let high = suppress_local_extrema(
            &mut max_grid,
            opts.suppression_radius,
            opts.max_diff,
            Extrema::Max,
            opts.scan_order,
        );
        let low = suppress_local_extrema(
            &mut max_grid,
            opts.suppression_radius,
            opts.min_diff,
            Extrema::Min,
            opts.scan_order,
        );

        let min_grid = diffuse(&min_grid, Direction::Decrease, opts.iteration, opts.diffusion_radius);
        let max_grid = diffuse(&max_grid, Direction::Increase, opts.iteration, opts.diffusion_radius);

        debug!(
            suppressed_high = high,
            suppressed_low = low,
            min_grid_low = min_grid.min_value(),
            max_grid_high = max_grid.max_value(),
            "estimated grids"
        );
        Ok((min_grid, max_grid))
    }

    /// Compute full resolution bound fields for `pix`, without blending
    pub fn estimate_fields(&self, pix: &Pix) -> FieldscaleResult<BoundFields> {
        let (min_grid, max_grid) = self.estimate_grids(pix)?;
        Ok(BoundFields {
            min: resize_linear_to(&min_grid, pix)?,
            max: resize_linear_to(&max_grid, pix)?,
        })
    }

    /// Rescale one frame to 8 bpp
    ///
    /// In video mode the frame's fields are blended with the previous
    /// frame's and stored for the next call.
    pub fn process(&mut self, pix: &Pix) -> FieldscaleResult<Pix> {
        let fields = self.estimate_fields(pix)?;

        let blended = self.options.video && self.blender.can_blend(&fields);
        let fields = if self.options.video {
            self.blender.blend(fields)?
        } else {
            fields
        };

        let rescaled = rescale_with_fields(pix, &fields.min, &fields.max)?;
        let shaped = gamma_correct(&rescaled, self.options.gamma)?;
        let out = if self.options.clahe {
            self.local_contrast.equalize(&shaped)?
        } else {
            shaped
        };

        debug!(
            width = pix.width(),
            height = pix.height(),
            depth = pix.depth().bits(),
            blended,
            "processed frame"
        );

        if self.options.video {
            self.blender.commit(fields);
        }
        Ok(out)
    }

    /// Read an image file and rescale it
    ///
    /// # Errors
    ///
    /// Returns [`FieldscaleError::Io`](crate::FieldscaleError::Io) if the
    /// file cannot be read or decoded.
    pub fn process_path<P: AsRef<Path>>(&mut self, path: P) -> FieldscaleResult<Pix> {
        let pix = fieldscale_io::read_image(path)?;
        self.process(&pix)
    }
}
