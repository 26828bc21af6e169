//! Field resampling regression test
//!
//! Checks the interpolation geometry used to stretch 8x8 bound grids to
//! full frame resolution.
//!
//! Run with:
//! ```
//! cargo test -p fieldscale-transform --test scale_reg
//! ```

use fieldscale_core::Field;
use fieldscale_test::RegParams;
use fieldscale_transform::{resize_linear, resize_linear_to};

fn ramp_grid(cols: u32, rows: u32) -> Field {
    let data = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| f64::from(r * 100 + c * 10)))
        .collect();
    Field::from_data(cols, rows, data).unwrap()
}

#[test]
fn scale_reg_grid_to_frame() {
    let mut rp = RegParams::new("scale_grid");

    let grid = ramp_grid(8, 8);
    let field = resize_linear(&grid, 64, 48).unwrap();
    rp.compare_values(64.0, f64::from(field.width()), 0.0);
    rp.compare_values(48.0, f64::from(field.height()), 0.0);

    // Corners clamp to the corner cells
    rp.compare_values(0.0, field.get_pixel(0, 0).unwrap(), 1e-9);
    rp.compare_values(770.0, field.get_pixel(63, 47).unwrap(), 1e-9);

    // Output never leaves the range of the grid
    let lo = field.min_value().unwrap();
    let hi = field.max_value().unwrap();
    rp.compare_values(0.0, lo, 1e-9);
    rp.compare_values(770.0, hi, 1e-9);

    // A ramp grid stays monotone along both axes
    let mut monotone = true;
    for y in 0..48 {
        let row = field.row(y);
        monotone &= row.windows(2).all(|w| w[1] >= w[0] - 1e-9);
    }
    for x in 0..64 {
        for y in 1..48 {
            monotone &=
                field.get_pixel_unchecked(x, y) >= field.get_pixel_unchecked(x, y - 1) - 1e-9;
        }
    }
    rp.check(monotone, "resampled ramp is monotone");

    assert!(rp.cleanup(), "scale grid regression test failed");
}

#[test]
fn scale_reg_cell_centers() {
    let mut rp = RegParams::new("scale_centers");

    // With an integer factor, each interior cell center lands between two
    // pixels whose average reproduces the cell value.
    let grid = ramp_grid(4, 4);
    let field = resize_linear(&grid, 32, 32).unwrap();
    for r in 1..3u32 {
        for c in 1..3u32 {
            let (x, y) = (c * 8 + 3, r * 8 + 3);
            let avg = (field.get_pixel_unchecked(x, y)
                + field.get_pixel_unchecked(x + 1, y)
                + field.get_pixel_unchecked(x, y + 1)
                + field.get_pixel_unchecked(x + 1, y + 1))
                / 4.0;
            rp.compare_values(grid.get_pixel_unchecked(c, r), avg, 1e-9);
        }
    }

    let pix = fieldscale_test::synth::uniform(20, 10, 0).unwrap();
    let matched = resize_linear_to(&grid, &pix).unwrap();
    rp.check(matched.dimensions() == (20, 10), "resize to pix dimensions");

    assert!(rp.cleanup(), "scale centers regression test failed");
}
