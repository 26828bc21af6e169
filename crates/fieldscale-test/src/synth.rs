//! Synthetic thermal frames
//!
//! Regression tests build their inputs here instead of loading sample
//! files, so every expected value can be derived by hand.

use crate::TestResult;
use fieldscale_core::{Pix, PixelDepth};

/// Uniform 16-bit frame.
pub fn uniform(width: u32, height: u32, value: u32) -> TestResult<Pix> {
    let samples = vec![value; (width as usize) * (height as usize)];
    Ok(Pix::from_samples(width, height, PixelDepth::Bit16, &samples)?)
}

/// 16-bit frame with a uniform background and one bright rectangle.
///
/// The rectangle covers `x0..x0 + size` by `y0..y0 + size`, clipped to
/// the frame.
pub fn hot_square(
    width: u32,
    height: u32,
    background: u32,
    hot: u32,
    (x0, y0): (u32, u32),
    size: u32,
) -> TestResult<Pix> {
    let mut pm = uniform(width, height, background)?.to_mut();
    for y in y0..(y0 + size).min(height) {
        for x in x0..(x0 + size).min(width) {
            pm.set_pixel_unchecked(x, y, hot);
        }
    }
    Ok(pm.into())
}

/// 16-bit horizontal ramp from `low` at x = 0 to `high` at the right edge.
pub fn ramp(width: u32, height: u32, low: u32, high: u32) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, PixelDepth::Bit16)?.to_mut();
    let span = f64::from(high) - f64::from(low);
    let denom = f64::from(width.saturating_sub(1).max(1));
    for y in 0..height {
        for x in 0..width {
            let v = f64::from(low) + span * f64::from(x) / denom;
            pm.set_pixel_unchecked(x, y, v.round() as u32);
        }
    }
    Ok(pm.into())
}

/// 16-bit scene resembling a thermal frame: a warm vertical gradient,
/// a periodic texture and a few hot spots.
pub fn thermal_scene(width: u32, height: u32, seed: u32) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, PixelDepth::Bit16)?.to_mut();
    let spots = [
        (width / 4, height / 3, 9000.0),
        (3 * width / 4, height / 2, 14000.0),
        (width / 2, 4 * height / 5, 6000.0),
    ];
    let phase = f64::from(seed % 17);
    for y in 0..height {
        for x in 0..width {
            let base = 21000.0 + 3000.0 * f64::from(y) / f64::from(height.max(1));
            let texture =
                250.0 * ((f64::from(x) + phase) * 0.37).sin() * ((f64::from(y) - phase) * 0.21).cos();
            let mut v = base + texture;
            for &(sx, sy, amp) in &spots {
                let dx = f64::from(x) - f64::from(sx);
                let dy = f64::from(y) - f64::from(sy);
                v += amp * (-(dx * dx + dy * dy) / 18.0).exp();
            }
            pm.set_pixel_unchecked(x, y, v.clamp(0.0, 65535.0) as u32);
        }
    }
    Ok(pm.into())
}
