//! Temporal blending of bound fields
//!
//! In video mode each frame's fields are mixed with the fields used for
//! the previous frame, so the tone mapping drifts smoothly instead of
//! jumping with every change in scene content:
//!
//! ```text
//! blended = alpha * current + (1 - alpha) * previous
//! ```
//!
//! The blended fields (not the raw ones) become `previous` for the next
//! frame.

use crate::{FilterError, FilterResult};
use fieldscale_core::Field;
use tracing::debug;

/// Default weight of the current frame
pub const DEFAULT_TEMPORAL_ALPHA: f64 = 0.1;

/// Lower and upper bound fields for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct BoundFields {
    /// Per-pixel lower bound
    pub min: Field,
    /// Per-pixel upper bound
    pub max: Field,
}

impl BoundFields {
    /// Dimensions shared by both fields, as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.min.dimensions()
    }
}

/// Blend two fields: `alpha * current + (1 - alpha) * previous`
pub fn blend_fields(current: &Field, previous: &Field, alpha: f64) -> FilterResult<Field> {
    Ok(Field::linear_combination_two(alpha, current, 1.0 - alpha, previous)?)
}

/// Carries bound fields from one frame to the next
#[derive(Debug, Clone)]
pub struct TemporalBlender {
    alpha: f64,
    previous: Option<BoundFields>,
}

impl Default for TemporalBlender {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_TEMPORAL_ALPHA,
            previous: None,
        }
    }
}

impl TemporalBlender {
    /// Create a blender with the given weight for the current frame
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] unless `0 < alpha <= 1`.
    pub fn new(alpha: f64) -> FilterResult<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(FilterError::InvalidParameters(format!(
                "temporal alpha must be in (0, 1], got {}",
                alpha
            )));
        }
        Ok(Self {
            alpha,
            previous: None,
        })
    }

    /// Weight of the current frame
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fields stored from the last committed frame
    pub fn previous(&self) -> Option<&BoundFields> {
        self.previous.as_ref()
    }

    /// Whether `current` would be blended with stored fields
    ///
    /// False for the first frame and after a change of frame size.
    pub fn can_blend(&self, current: &BoundFields) -> bool {
        self.previous
            .as_ref()
            .is_some_and(|prev| prev.dimensions() == current.dimensions())
    }

    /// Blend `current` with the stored fields without updating state
    ///
    /// Returns `current` unchanged when there is nothing to blend with.
    pub fn blend(&self, current: BoundFields) -> FilterResult<BoundFields> {
        let Some(prev) = self.previous.as_ref() else {
            return Ok(current);
        };
        if prev.dimensions() != current.dimensions() {
            debug!(
                previous = ?prev.dimensions(),
                current = ?current.dimensions(),
                "frame size changed, restarting temporal sequence"
            );
            return Ok(current);
        }
        Ok(BoundFields {
            min: blend_fields(&current.min, &prev.min, self.alpha)?,
            max: blend_fields(&current.max, &prev.max, self.alpha)?,
        })
    }

    /// Store the fields used for this frame
    pub fn commit(&mut self, fields: BoundFields) {
        self.previous = Some(fields);
    }

    /// Blend and store in one step
    pub fn apply(&mut self, current: BoundFields) -> FilterResult<BoundFields> {
        let blended = self.blend(current)?;
        self.commit(blended.clone());
        Ok(blended)
    }

    /// Forget the stored fields and start a new sequence
    pub fn reset(&mut self) {
        self.previous = None;
    }
}
