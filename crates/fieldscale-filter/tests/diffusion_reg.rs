//! Grid diffusion regression test
//!
//! Run with:
//! ```
//! cargo test -p fieldscale-filter --test diffusion_reg
//! ```

use fieldscale_core::Grid;
use fieldscale_filter::{Direction, diffuse, propagate};
use fieldscale_test::RegParams;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_grid(rng: &mut StdRng) -> Grid {
    let data = (0..64).map(|_| rng.gen_range(15000.0..30000.0)).collect();
    Grid::from_data(8, 8, data).unwrap()
}

#[test]
fn diffusion_reg_monotonicity() {
    let mut rp = RegParams::new("diffusion_monotone");
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..25 {
        let grid = random_grid(&mut rng);
        let up = propagate(&grid, Direction::Increase);
        let down = propagate(&grid, Direction::Decrease);

        let ok_up = grid.data().iter().zip(up.data()).all(|(a, b)| b >= a);
        let ok_down = grid.data().iter().zip(down.data()).all(|(a, b)| b <= a);
        rp.check(ok_up, "increase never lowers a cell");
        rp.check(ok_down, "decrease never raises a cell");

        // Diffusion stays inside the original range
        rp.check(
            up.max_value() == grid.max_value() && down.min_value() == grid.min_value(),
            "global extremes are preserved",
        );
    }

    assert!(rp.cleanup(), "diffusion monotonicity regression test failed");
}

#[test]
fn diffusion_reg_spreads_peak() {
    let mut rp = RegParams::new("diffusion_spread");

    let mut grid = Grid::new_with_value(8, 8, 1000.0).unwrap();
    grid.set_pixel(0, 0, 1400.0).unwrap();
    let out = diffuse(&grid, Direction::Increase, 7, 1);

    // After seven rounds the peak has reached the far corner
    rp.check(out.get_pixel(7, 7).unwrap() > 1000.0, "peak reaches the far corner");
    rp.compare_values(1400.0, out.get_pixel(0, 0).unwrap(), 0.0);
    // Cells nearer the peak end higher
    rp.check(
        out.get_pixel(1, 1).unwrap() > out.get_pixel(4, 4).unwrap(),
        "falloff away from the peak",
    );

    // Fixed point on a uniform grid, including values with no exact
    // binary representation
    for v in [27123.0, 0.1, 1400.3, 27123.7] {
        let flat = Grid::new_with_value(8, 8, v).unwrap();
        rp.compare_fields(&flat, &diffuse(&flat, Direction::Increase, 7, 1), 0.0);
        rp.compare_fields(&flat, &diffuse(&flat, Direction::Decrease, 7, 1), 0.0);
        rp.compare_fields(&flat, &diffuse(&flat, Direction::Increase, 3, 2), 0.0);
        rp.compare_fields(&flat, &diffuse(&flat, Direction::Decrease, 3, 2), 0.0);
    }

    assert!(rp.cleanup(), "diffusion spread regression test failed");
}
