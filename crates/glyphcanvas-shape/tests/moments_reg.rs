//! Moment and Hu invariant regression test
//!
//! Checks translation invariance of the Hu invariants and the ordering of
//! the derived circularity metric between disks and elongated ellipses.
//!
//! Run with:
//! ```
//! cargo test -p glyphcanvas-shape --test moments_reg
//! ```

use glyphcanvas_shape::{HuInvariants, Moments};
use glyphcanvas_test::{RegParams, fixtures};
use std::f64::consts::PI;

#[test]
fn moments_reg() {
    let mut rp = RegParams::new("moments");

    // -----------------------------------------------------------
    // Translation invariance
    // -----------------------------------------------------------
    let disk = fixtures::filled_disk(80, 80, 30, 30, 10).unwrap();
    let ellipse = fixtures::filled_ellipse(80, 80, 35, 30, 25, 6).unwrap();

    for (name, region) in [("disk", &disk), ("ellipse", &ellipse)] {
        let shifted = fixtures::translate(region, 17, 9).unwrap();
        let m1 = Moments::from_region(region);
        let m2 = Moments::from_region(&shifted);
        rp.compare_values(m1.m00, m2.m00, 0.0);
        rp.compare_values(m1.cx + 17.0, m2.cx, 1e-9);
        rp.compare_values(m1.cy + 9.0, m2.cy, 1e-9);

        let hu1 = HuInvariants::from_moments(&m1);
        let hu2 = HuInvariants::from_moments(&m2);
        for k in 0..7 {
            rp.compare_values(hu1.get(k), hu2.get(k), 1e-9);
        }
        eprintln!("{} hu = {:?}", name, hu1.as_array());
    }

    // -----------------------------------------------------------
    // A disk's first invariant approaches 1 / (2 pi)
    // -----------------------------------------------------------
    let big_disk = fixtures::filled_disk(80, 80, 40, 40, 30).unwrap();
    let hu = HuInvariants::from_moments(&Moments::from_region(&big_disk));
    rp.compare_values(1.0 / (2.0 * PI), hu.get(0), 0.002);
    rp.compare_values(0.0, hu.get(1), 1e-4);

    // -----------------------------------------------------------
    // Circularity: disk vs 10:1 ellipse of similar area
    // -----------------------------------------------------------
    let round = fixtures::filled_disk(80, 80, 40, 40, 10).unwrap();
    let long = fixtures::filled_ellipse(80, 80, 40, 40, 32, 3).unwrap();
    let c_round = HuInvariants::from_moments(&Moments::from_region(&round)).circularity();
    let c_long = HuInvariants::from_moments(&Moments::from_region(&long)).circularity();
    eprintln!("circularity: disk = {:.4}, ellipse = {:.4}", c_round, c_long);
    rp.check(c_round > c_long, "disk is more circular than a 10:1 ellipse");
    rp.check(c_round > 0.95, "disk circularity near 1");
    rp.check(c_long < 0.6, "ellipse circularity near 0.5");

    // -----------------------------------------------------------
    // Ellipse axis ratio
    // -----------------------------------------------------------
    let m = Moments::from_region(&long);
    rp.check(m.ellipse_axis_ratio() < 0.05, "10:1 ellipse axis ratio");
    rp.compare_values(1.0, Moments::from_region(&round).ellipse_axis_ratio(), 0.02);

    assert!(rp.cleanup(), "moments regression test failed");
}
