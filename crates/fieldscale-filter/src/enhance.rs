//! Tone shaping
//!
//! Gamma correction of the rescaled 8 bpp image through a 256-entry
//! tone reproduction curve (TRC).

use crate::{FilterError, FilterResult};
use fieldscale_core::{Pix, PixMut, PixelDepth};

/// Default gamma exponent
pub const DEFAULT_GAMMA: f64 = 1.5;

/// A 256-entry lookup table for tone reproduction curve mapping.
pub type TrcLut = [u8; 256];

/// Generate a gamma TRC lookup table.
///
/// The mapping is `output = 255 * (input / 255) ^ gamma`, truncated.
/// Values of `gamma` above 1 darken the midtones, values below 1
/// brighten them.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless `gamma` is finite
/// and > 0.
pub fn gamma_trc(gamma: f64) -> FilterResult<TrcLut> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "gamma must be finite and > 0, got {}",
            gamma
        )));
    }

    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let x = i as f64 / 255.0;
        *entry = (255.0 * x.powf(gamma)) as u8;
    }
    Ok(lut)
}

/// Remap an 8 bpp image in place through a lookup table.
pub fn trc_map(pix: &mut PixMut, lut: &TrcLut) -> FilterResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }

    let w = pix.width();
    let h = pix.height();
    for y in 0..h {
        for x in 0..w {
            let val = pix.get_pixel_unchecked(x, y) as u8;
            pix.set_pixel_unchecked(x, y, u32::from(lut[val as usize]));
        }
    }
    Ok(())
}

/// Apply gamma correction to an 8 bpp image.
///
/// `gamma == 0` disables the correction and returns the input unchanged.
pub fn gamma_correct(pix: &Pix, gamma: f64) -> FilterResult<Pix> {
    if gamma == 0.0 {
        return Ok(pix.clone());
    }
    let lut = gamma_trc(gamma)?;
    let mut pm = pix.to_mut();
    trc_map(&mut pm, &lut)?;
    Ok(pm.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_trc_endpoints() {
        let lut = gamma_trc(1.5).unwrap();
        assert_eq!(lut[0], 0);
        assert_eq!(lut[255], 255);
        // 255 * (128/255)^1.5 = 90.69
        assert_eq!(lut[128], 90);
        assert!(lut.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_gamma_trc_rejects_bad_values() {
        assert!(gamma_trc(0.0).is_err());
        assert!(gamma_trc(-1.0).is_err());
        assert!(gamma_trc(f64::INFINITY).is_err());
    }

    #[test]
    fn test_gamma_zero_is_identity() {
        let pix = Pix::from_samples(3, 1, PixelDepth::Bit8, &[0, 100, 255]).unwrap();
        let out = gamma_correct(&pix, 0.0).unwrap();
        assert_eq!(out.data(), pix.data());
    }

    #[test]
    fn test_gamma_correct_requires_8bpp() {
        let pix = Pix::new(2, 2, PixelDepth::Bit16).unwrap();
        assert!(gamma_correct(&pix, 1.5).is_err());
    }
}
