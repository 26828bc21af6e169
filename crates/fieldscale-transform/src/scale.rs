//! Field resampling
//!
//! Stretches a coarse grid to image resolution with bilinear
//! interpolation. Grid values are treated as samples at cell centers:
//! destination pixel `d` maps to source coordinate
//! `(d + 0.5) * src / dst - 0.5`, and coordinates outside the outer cell
//! centers clamp to the edge cell. Min and max fields resampled through
//! the same geometry therefore stay aligned pixel for pixel.

use crate::{TransformError, TransformResult};
use fieldscale_core::{Field, Pix};

/// Interpolation tap along one axis: the two source indices and the
/// weight given to the second one.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    i0: u32,
    i1: u32,
    frac: f64,
}

fn axis_taps(src: u32, dst: u32) -> Vec<Tap> {
    let scale = f64::from(src) / f64::from(dst);
    let last = src - 1;
    (0..dst)
        .map(|d| {
            let pos = (f64::from(d) + 0.5) * scale - 0.5;
            let base = pos.floor();
            if base < 0.0 {
                Tap {
                    i0: 0,
                    i1: 0,
                    frac: 0.0,
                }
            } else if base >= f64::from(last) {
                Tap {
                    i0: last,
                    i1: last,
                    frac: 0.0,
                }
            } else {
                let i0 = base as u32;
                Tap {
                    i0,
                    i1: i0 + 1,
                    frac: pos - base,
                }
            }
        })
        .collect()
}

/// Resize a field to `width` x `height` with bilinear interpolation
///
/// # Arguments
/// * `field` - Source field (typically an 8x8 grid)
/// * `width` - Target width, must be > 0
/// * `height` - Target height, must be > 0
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for a zero target size.
pub fn resize_linear(field: &Field, width: u32, height: u32) -> TransformResult<Field> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "target size must be non-zero, got {}x{}",
            width, height
        )));
    }

    let (src_w, src_h) = field.dimensions();
    if (src_w, src_h) == (width, height) {
        return Ok(field.clone());
    }

    let xtaps = axis_taps(src_w, width);
    let ytaps = axis_taps(src_h, height);

    // Written as a + (b - a) * t so equal neighbors reproduce their value exactly
    let lerp = |a: f64, b: f64, t: f64| a + (b - a) * t;

    let mut out = Vec::with_capacity((width as usize) * (height as usize));
    for ty in &ytaps {
        let row0 = field.row(ty.i0);
        let row1 = field.row(ty.i1);
        for tx in &xtaps {
            let top = lerp(row0[tx.i0 as usize], row0[tx.i1 as usize], tx.frac);
            let bottom = lerp(row1[tx.i0 as usize], row1[tx.i1 as usize], tx.frac);
            out.push(lerp(top, bottom, ty.frac));
        }
    }

    Ok(Field::from_data(width, height, out)?)
}

/// Resize a field to the dimensions of `pix`
pub fn resize_linear_to(field: &Field, pix: &Pix) -> TransformResult<Field> {
    resize_linear(field, pix.width(), pix.height())
}
