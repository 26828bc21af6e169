//! Field-guided rescaling to 8 bpp
//!
//! Each pixel is clipped into its own `[min_field, max_field]` band and
//! then stretched linearly so the band covers 0..=255.
//!
//! # Inverted and empty bands
//!
//! Where `min_field > max_field` the lower bound is pulled down onto the
//! upper bound, leaving an empty band at `max_field`. Any pixel whose band
//! is empty after that (or whose bounds are NaN) maps to
//! [`DEGENERATE_BAND_VALUE`].

use crate::{FilterError, FilterResult};
use fieldscale_core::{Field, Pix, PixelDepth};

/// Output value for pixels whose band has zero width
pub const DEGENERATE_BAND_VALUE: u8 = 0;

/// Map a single sample into 0..=255 given its band
///
/// The result is truncated toward zero.
#[inline]
pub fn rescale_value(value: f64, min_bound: f64, max_bound: f64) -> u8 {
    let lo = if min_bound > max_bound { max_bound } else { min_bound };
    let hi = max_bound;

    let width = hi - lo;
    if !(width > 0.0) {
        return DEGENERATE_BAND_VALUE;
    }

    let clipped = if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    };
    ((clipped - lo) / width * 255.0) as u8
}

/// Rescale an image into 8 bpp using per-pixel bounds
///
/// # Arguments
/// * `pix` - Input 8, 16 or 32 bpp grayscale image
/// * `min_field` - Per-pixel lower bound, same size as `pix`
/// * `max_field` - Per-pixel upper bound, same size as `pix`
///
/// # Errors
///
/// Returns [`FilterError::ShapeMismatch`] if either field differs in size
/// from the image.
pub fn rescale_with_fields(pix: &Pix, min_field: &Field, max_field: &Field) -> FilterResult<Pix> {
    for field in [min_field, max_field] {
        if field.dimensions() != pix.dimensions() {
            return Err(FilterError::ShapeMismatch {
                expected: pix.dimensions(),
                actual: field.dimensions(),
            });
        }
    }

    let (w, h) = pix.dimensions();
    let mut out_mut = Pix::new(w, h, PixelDepth::Bit8)?.to_mut();
    out_mut.copy_resolution_from(pix);

    for y in 0..h {
        let min_row = min_field.row(y);
        let max_row = max_field.row(y);
        for x in 0..w {
            let val = f64::from(pix.get_pixel_unchecked(x, y));
            let mapped = rescale_value(val, min_row[x as usize], max_row[x as usize]);
            out_mut.set_pixel_unchecked(x, y, u32::from(mapped));
        }
    }

    Ok(out_mut.into())
}
